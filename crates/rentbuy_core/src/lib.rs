//! Buy-vs-rent Monte Carlo simulation library
//!
//! This crate estimates how buying a home with a mortgage compares to renting
//! and investing the difference in equities. It supports:
//! - Normal property returns and a two-regime ("good year"/"bad year") stock model
//! - Interest-only and annuity-amortized mortgage parts
//! - Yearly reinvestment of the owning-vs-renting cash-flow differential
//! - Mean cost and wealth series plus the final outcome distribution
//!
//! ```ignore
//! use rentbuy_core::{MonteCarloConfig, ParameterSet, monte_carlo_simulate};
//!
//! let params = ParameterSet {
//!     rent_to_cost: 30.0,
//!     ..Default::default()
//! };
//! let summary = monte_carlo_simulate(&params, &MonteCarloConfig::seeded(10_000, 42))?;
//! let net = summary.wealth.get("owning_minus_renting");
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod cash_flow;
pub mod error;
pub mod mortgage;
pub mod params;
pub mod paths;
pub mod simulation;
pub mod summary;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use error::SimulationError;
pub use params::{ParameterDescriptor, ParameterSet};
pub use simulation::{MonteCarloConfig, monte_carlo_simulate};
pub use summary::{FinalDistribution, NamedSeries, OutcomeSummary, ResultSeries};
