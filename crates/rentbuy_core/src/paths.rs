//! Random annual return paths
//!
//! Property returns are Normal. Stock returns follow a two-regime mixture:
//! every year of every path independently draws a Bernoulli to choose the
//! "good year" or "bad year" Normal. All draws come from the caller's RNG, so
//! a seeded generator reproduces a path exactly.

use rand::Rng;
use rand::distr::{Bernoulli, Distribution};
use rand_distr::Normal;

use crate::error::{Result, SimulationError};
use crate::params::ParameterSet;

fn normal(field: &'static str, mean: f64, sigma: f64) -> Result<Normal<f64>> {
    Normal::new(mean, sigma).map_err(|_| {
        SimulationError::validation(
            field,
            format!("std_dev must be non-negative and finite, got {sigma}"),
        )
    })
}

fn draw<R: Rng + ?Sized, D: Distribution<f64>>(dist: &D, rng: &mut R, years: usize) -> Vec<f64> {
    (0..years).map(|_| dist.sample(rng)).collect()
}

/// `years` independent Normal annual returns. A zero `sigma` yields `mean`
/// exactly.
pub fn normal_returns<R: Rng + ?Sized>(
    rng: &mut R,
    mean: f64,
    sigma: f64,
    years: usize,
) -> Result<Vec<f64>> {
    Ok(draw(&normal("sigma", mean, sigma)?, rng, years))
}

/// Cumulative product of `(1 + r)`, scaled by `initial`.
///
/// Element `t` is the value at the end of year `t`.
#[must_use]
pub fn compound(initial: f64, returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(initial, |value, r| {
            *value *= 1.0 + r;
            Some(*value)
        })
        .collect()
}

/// Two-regime yearly stock return model
#[derive(Debug, Clone, Copy)]
pub struct RegimeModel {
    is_good_year: Bernoulli,
    good: Normal<f64>,
    bad: Normal<f64>,
}

impl RegimeModel {
    pub fn new(
        good_year_prob: f64,
        (good_mean, good_sigma): (f64, f64),
        (bad_mean, bad_sigma): (f64, f64),
    ) -> Result<Self> {
        let is_good_year = Bernoulli::new(good_year_prob).map_err(|_| {
            SimulationError::validation(
                "good_year_prob",
                format!("must be between 0 and 1, got {good_year_prob}"),
            )
        })?;
        Ok(Self {
            is_good_year,
            good: normal("good_year_sigma", good_mean, good_sigma)?,
            bad: normal("bad_year_sigma", bad_mean, bad_sigma)?,
        })
    }

    /// Draw `years` independent annual returns
    pub fn sample_returns<R: Rng + ?Sized>(&self, rng: &mut R, years: usize) -> Vec<f64> {
        draw(self, rng, years)
    }
}

impl Distribution<f64> for RegimeModel {
    /// One year's return: pick the regime, then draw from its Normal
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.is_good_year.sample(rng) {
            self.good.sample(rng)
        } else {
            self.bad.sample(rng)
        }
    }
}

/// Generates the property value and stock growth paths for one parameter set
#[derive(Debug, Clone, Copy)]
pub struct PathGenerator {
    initial_price: f64,
    years: usize,
    property: Normal<f64>,
    stocks: RegimeModel,
}

impl PathGenerator {
    pub fn new(params: &ParameterSet) -> Result<Self> {
        Ok(Self {
            initial_price: params.property_price,
            years: params.horizon_years,
            property: normal("property_sigma", params.property_mean, params.property_sigma)?,
            stocks: RegimeModel::new(
                params.good_year_prob,
                (params.good_year_mean, params.good_year_sigma),
                (params.bad_year_mean, params.bad_year_sigma),
            )?,
        })
    }

    #[must_use]
    pub fn years(&self) -> usize {
        self.years
    }

    /// Property value at the end of each year, starting from the purchase price
    pub fn property_values<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        compound(self.initial_price, &draw(&self.property, rng, self.years))
    }

    /// Cumulative stock-market growth factor at the end of each year
    pub fn stock_growth<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        compound(1.0, &self.stocks.sample_returns(rng, self.years))
    }
}
