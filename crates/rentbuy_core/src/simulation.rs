use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
use serde::{Deserialize, Serialize};

use crate::cash_flow::PathSeries;
use crate::error::{Result, SimulationError};
use crate::mortgage::LoanSchedule;
use crate::params::ParameterSet;
use crate::paths::PathGenerator;
use crate::summary::{OutcomeSummary, PathAccumulator};

/// Number of simulated paths when none is configured
pub const DEFAULT_ITERATIONS: usize = 10_000;

/// Upper bound on simulated paths per evaluation
pub const MAX_ITERATIONS: usize = 1_000_000;

/// Paths evaluated by one worker with one RNG
const MAX_BATCH_SIZE: usize = 100;

/// How many paths to simulate and how to seed them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    pub iterations: usize,
    /// Fixed seed for reproducible runs; a random one is drawn when `None`
    pub seed: Option<u64>,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: None,
        }
    }
}

impl MonteCarloConfig {
    #[must_use]
    pub fn seeded(iterations: usize, seed: u64) -> Self {
        Self {
            iterations,
            seed: Some(seed),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(SimulationError::validation(
                "iterations",
                "must be greater than 0",
            ));
        }
        if self.iterations > MAX_ITERATIONS {
            return Err(SimulationError::validation(
                "iterations",
                format!("cannot exceed {MAX_ITERATIONS}"),
            ));
        }
        Ok(())
    }
}

/// Simulate one path: property values first, then stock growth, both drawn
/// from `rng`.
pub fn simulate_path<'a, R: Rng + ?Sized>(
    params: &ParameterSet,
    generator: &PathGenerator,
    loan: &'a LoanSchedule,
    rng: &mut R,
) -> PathSeries<'a> {
    let property_value = generator.property_values(rng);
    let stock_growth = generator.stock_growth(rng);
    PathSeries::evaluate(params, loan, property_value, stock_growth)
}

/// Run the full buy-vs-rent Monte Carlo evaluation.
///
/// Parameters are validated before anything is simulated. Paths are split
/// into fixed-size batches, each with its own RNG seeded from the master
/// seed in batch order, and batch sums are merged in that same order. The
/// result for a given seed is therefore identical whether or not batches
/// run in parallel.
pub fn monte_carlo_simulate(
    params: &ParameterSet,
    config: &MonteCarloConfig,
) -> Result<OutcomeSummary> {
    params.validate()?;
    config.validate()?;

    let seed = config.seed.unwrap_or_else(rand::random);
    let _span = tracing::debug_span!(
        "monte_carlo_simulate",
        iterations = config.iterations,
        horizon = params.horizon_years,
        seed
    )
    .entered();
    let started = Instant::now();

    let loan = LoanSchedule::new(params)?;
    let generator = PathGenerator::new(params)?;

    let num_iterations = config.iterations;
    let num_batches = num_iterations.div_ceil(MAX_BATCH_SIZE);
    let mut master = SmallRng::seed_from_u64(seed);
    let batch_seeds: Vec<u64> = (0..num_batches).map(|_| master.next_u64()).collect();

    let run_batch = |(i, batch_seed): (usize, &u64)| {
        let batch_size = if i == num_batches - 1 {
            num_iterations - i * MAX_BATCH_SIZE
        } else {
            MAX_BATCH_SIZE
        };

        let mut rng = SmallRng::seed_from_u64(*batch_seed);
        let mut acc = PathAccumulator::new();
        for _ in 0..batch_size {
            acc.add(&simulate_path(params, &generator, &loan, &mut rng));
        }
        acc
    };

    #[cfg(feature = "parallel")]
    let batches: Vec<PathAccumulator> = batch_seeds.par_iter().enumerate().map(run_batch).collect();

    #[cfg(not(feature = "parallel"))]
    let batches: Vec<PathAccumulator> = batch_seeds.iter().enumerate().map(run_batch).collect();

    let mut total = PathAccumulator::new();
    for batch in batches {
        total.merge(batch);
    }

    let summary = total.summarize(params, &loan)?;
    tracing::debug!(
        batches = num_batches,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "simulation finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        MonteCarloConfig::default().validate().unwrap();
        assert_eq!(MonteCarloConfig::default().iterations, 10_000);

        let err = MonteCarloConfig::seeded(0, 1).validate().unwrap_err();
        assert_eq!(err.field(), Some("iterations"));

        let err = MonteCarloConfig::seeded(MAX_ITERATIONS + 1, 1)
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), Some("iterations"));
    }

    #[test]
    fn test_partial_last_batch() {
        let params = ParameterSet {
            horizon_years: 5,
            amortization_years: 5,
            ..Default::default()
        };
        let summary = monte_carlo_simulate(&params, &MonteCarloConfig::seeded(250, 3)).unwrap();
        assert_eq!(summary.num_paths, 250);
    }

    #[test]
    fn test_validation_runs_before_simulation() {
        let params = ParameterSet {
            amortization_years: 80,
            ..Default::default()
        };
        let err = monte_carlo_simulate(&params, &MonteCarloConfig::seeded(10, 1)).unwrap_err();
        assert_eq!(err.field(), Some("amortization_years"));
    }

    #[test]
    fn test_zero_interest_amortization_fails() {
        let params = ParameterSet {
            interest_rate: 0.0,
            ..Default::default()
        };
        let err = monte_carlo_simulate(&params, &MonteCarloConfig::seeded(10, 1)).unwrap_err();
        assert!(matches!(err, SimulationError::Numerical { .. }));
    }

    #[test]
    fn test_unseeded_runs_complete() {
        let params = ParameterSet {
            horizon_years: 10,
            amortization_years: 10,
            ..Default::default()
        };
        let config = MonteCarloConfig {
            iterations: 50,
            seed: None,
        };
        let summary = monte_carlo_simulate(&params, &config).unwrap();
        assert_eq!(summary.years.len(), 10);
    }
}
