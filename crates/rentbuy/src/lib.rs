//! Command-line front end for the buy-vs-rent simulator
//!
//! Resolves a `ParameterSet` from defaults, scenario files and flags, runs
//! `rentbuy_core` and renders the results as text or JSON.

pub mod format;
pub mod logging;
pub mod report;
pub mod scenario;

pub use logging::init_logging;
pub use report::{Report, render_parameters, render_table};
pub use scenario::{ParameterOverrides, load_scenario, resolve_parameters};
