//! End-to-end tests for the simulation pipeline
//!
//! Tests are organized by topic:
//! - `outcomes` - Shape, finiteness and economic behaviour of results
//! - `determinism` - Seeded reproducibility and degenerate-randomness paths
