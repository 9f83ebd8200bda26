//! Reduction of simulated paths into display-ready mean series
//!
//! Paths are folded into a [`PathAccumulator`] (per-year sums), accumulators
//! from independent batches are merged, and [`PathAccumulator::summarize`]
//! turns the sums into two [`ResultSeries`]: the yearly cost breakdown and the
//! wealth comparison.

use serde::Serialize;

use crate::cash_flow::PathSeries;
use crate::error::{Result, SimulationError};
use crate::mortgage::LoanSchedule;
use crate::params::ParameterSet;

/// Tolerance for floating-point percentile lookup
pub const PERCENTILE_TOLERANCE: f64 = 0.001;

/// Percentiles of final net wealth reported with every run
pub const FINAL_PERCENTILES: [f64; 5] = [0.05, 0.25, 0.50, 0.75, 0.95];

/// Series keys of the cost breakdown view
pub mod cost_keys {
    pub const RENT: &str = "rent";
    pub const MAINTENANCE: &str = "maintenance";
    pub const LOAN: &str = "loan";
    pub const OWNING_MINUS_RENTING: &str = "owning_minus_renting";
}

/// Series keys of the wealth comparison view
pub mod wealth_keys {
    pub const PROPERTY_VALUE: &str = "property_value";
    pub const TOTAL_DEBT: &str = "total_debt";
    pub const INVESTED_DOWN_PAYMENT: &str = "invested_down_payment";
    pub const REINVESTED_DIFFERENCE: &str = "reinvested_difference";
    pub const OWNING_MINUS_RENTING: &str = "owning_minus_renting";
}

/// One line of a chart: yearly cross-path means
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedSeries {
    pub key: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub values: Vec<f64>,
}

/// A set of named series sharing the year axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSeries {
    pub title: &'static str,
    pub y_axis: &'static str,
    pub series: Vec<NamedSeries>,
}

impl ResultSeries {
    /// Values of the series named `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[f64]> {
        self.series
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.values.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.series.iter().map(|s| s.key)
    }

    fn ensure_finite(&self) -> Result<()> {
        for s in &self.series {
            if let Some((year, value)) = s.values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                return Err(SimulationError::Numerical {
                    quantity: s.key,
                    year: Some(year),
                    value: *value,
                });
            }
        }
        Ok(())
    }
}

/// Distribution of the owning-minus-renting outcome at the horizon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalDistribution {
    /// `(percentile, value)` pairs, percentile in 0..=1
    pub percentiles: Vec<(f64, f64)>,
    /// Share of paths where owning ends ahead of renting
    pub owning_ahead: f64,
}

impl FinalDistribution {
    fn from_values(mut values: Vec<f64>) -> Self {
        if values.is_empty() {
            return Self {
                percentiles: Vec::new(),
                owning_ahead: 0.0,
            };
        }

        let owning_ahead = values.iter().filter(|v| **v > 0.0).count() as f64 / values.len() as f64;
        values.sort_by(f64::total_cmp);

        let last = values.len() - 1;
        let percentiles = FINAL_PERCENTILES
            .iter()
            .map(|p| {
                let idx = ((last as f64) * p).round() as usize;
                (*p, values[idx.min(last)])
            })
            .collect();

        Self {
            percentiles,
            owning_ahead,
        }
    }

    /// Value at percentile `target` (e.g. 0.5), if it was computed
    #[must_use]
    pub fn percentile(&self, target: f64) -> Option<f64> {
        self.percentiles
            .iter()
            .find(|(p, _)| (*p - target).abs() < PERCENTILE_TOLERANCE)
            .map(|(_, v)| *v)
    }
}

/// Everything a presentation layer needs to draw the two result views
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeSummary {
    /// Year indices `0..horizon`
    pub years: Vec<usize>,
    pub num_paths: usize,
    pub costs: ResultSeries,
    pub wealth: ResultSeries,
    pub final_distribution: FinalDistribution,
}

/// Per-year sums over a group of paths
#[derive(Debug, Clone, Default)]
pub struct PathAccumulator {
    paths: usize,
    property_value: Vec<f64>,
    rent: Vec<f64>,
    maintenance: Vec<f64>,
    differential: Vec<f64>,
    invested_down_payment: Vec<f64>,
    reinvested_differential: Vec<f64>,
    net_wealth: Vec<f64>,
    final_net_wealth: Vec<f64>,
}

fn add_into(sums: &mut Vec<f64>, values: &[f64]) {
    if sums.is_empty() {
        sums.resize(values.len(), 0.0);
    }
    for (sum, v) in sums.iter_mut().zip(values) {
        *sum += v;
    }
}

fn mean_of(sums: &[f64], count: usize) -> Vec<f64> {
    sums.iter().map(|s| s / count as f64).collect()
}

impl PathAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn paths(&self) -> usize {
        self.paths
    }

    pub fn add(&mut self, path: &PathSeries<'_>) {
        self.paths += 1;
        add_into(&mut self.property_value, &path.property_value);
        add_into(&mut self.rent, &path.rent);
        add_into(&mut self.maintenance, &path.maintenance);
        add_into(&mut self.differential, &path.differential);
        add_into(&mut self.invested_down_payment, &path.invested_down_payment);
        add_into(&mut self.reinvested_differential, &path.reinvested_differential);
        add_into(&mut self.net_wealth, &path.net_wealth);
        self.final_net_wealth.push(path.final_net_wealth());
    }

    /// Fold `other` into `self`. Merging in a fixed order keeps sums reproducible.
    pub fn merge(&mut self, other: PathAccumulator) {
        self.paths += other.paths;
        add_into(&mut self.property_value, &other.property_value);
        add_into(&mut self.rent, &other.rent);
        add_into(&mut self.maintenance, &other.maintenance);
        add_into(&mut self.differential, &other.differential);
        add_into(&mut self.invested_down_payment, &other.invested_down_payment);
        add_into(&mut self.reinvested_differential, &other.reinvested_differential);
        add_into(&mut self.net_wealth, &other.net_wealth);
        self.final_net_wealth.extend(other.final_net_wealth);
    }

    /// Cross-path means for both result views.
    ///
    /// Fails if no path was accumulated or any mean is not finite.
    pub fn summarize(self, params: &ParameterSet, loan: &LoanSchedule) -> Result<OutcomeSummary> {
        if self.paths == 0 {
            return Err(SimulationError::validation(
                "iterations",
                "at least one path is required",
            ));
        }
        let n = self.paths;
        let never_paid = params.never_paid_principal();

        let costs = ResultSeries {
            title: "Costs Over Time",
            y_axis: "CHF",
            series: vec![
                NamedSeries {
                    key: cost_keys::RENT,
                    label: "Rent",
                    color: "red",
                    values: mean_of(&self.rent, n),
                },
                NamedSeries {
                    key: cost_keys::MAINTENANCE,
                    label: "Maintenance",
                    color: "blue",
                    values: mean_of(&self.maintenance, n),
                },
                NamedSeries {
                    key: cost_keys::LOAN,
                    label: "Loan",
                    color: "purple",
                    values: loan.total_cost().to_vec(),
                },
                NamedSeries {
                    key: cost_keys::OWNING_MINUS_RENTING,
                    label: "Owning minus Renting",
                    color: "green",
                    values: mean_of(&self.differential, n),
                },
            ],
        };

        let wealth = ResultSeries {
            title: "Returns Over Time",
            y_axis: "CHF",
            series: vec![
                NamedSeries {
                    key: wealth_keys::PROPERTY_VALUE,
                    label: "Flat Value",
                    color: "red",
                    values: mean_of(&self.property_value, n),
                },
                NamedSeries {
                    key: wealth_keys::TOTAL_DEBT,
                    label: "Total Debt",
                    color: "blue",
                    values: loan
                        .remaining_balance()
                        .iter()
                        .map(|b| never_paid + b)
                        .collect(),
                },
                NamedSeries {
                    key: wealth_keys::INVESTED_DOWN_PAYMENT,
                    label: "Return if Downpayment Invested",
                    color: "purple",
                    values: mean_of(&self.invested_down_payment, n),
                },
                NamedSeries {
                    key: wealth_keys::REINVESTED_DIFFERENCE,
                    label: "Return on Difference in Case of Rent",
                    color: "green",
                    values: mean_of(&self.reinvested_differential, n),
                },
                NamedSeries {
                    key: wealth_keys::OWNING_MINUS_RENTING,
                    label: "Owning minus Renting",
                    color: "orange",
                    values: mean_of(&self.net_wealth, n),
                },
            ],
        };

        costs.ensure_finite()?;
        wealth.ensure_finite()?;

        Ok(OutcomeSummary {
            years: (0..loan.years()).collect(),
            num_paths: n,
            costs,
            wealth,
            final_distribution: FinalDistribution::from_values(self.final_net_wealth),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params() -> ParameterSet {
        ParameterSet {
            property_price: 1_000.0,
            horizon_years: 3,
            amortization_years: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_means_over_paths() {
        let params = small_params();
        let loan = LoanSchedule::new(&params).unwrap();

        let mut acc = PathAccumulator::new();
        acc.add(&PathSeries::evaluate(
            &params,
            &loan,
            vec![1_000.0, 1_000.0, 1_000.0],
            vec![1.0, 1.0, 1.0],
        ));
        acc.add(&PathSeries::evaluate(
            &params,
            &loan,
            vec![2_000.0, 2_000.0, 2_000.0],
            vec![1.0, 1.0, 1.0],
        ));
        assert_eq!(acc.paths(), 2);

        let summary = acc.summarize(&params, &loan).unwrap();
        assert_eq!(summary.years, vec![0, 1, 2]);
        assert_eq!(summary.num_paths, 2);

        let property = summary.wealth.get(wealth_keys::PROPERTY_VALUE).unwrap();
        assert_eq!(property, &[1_500.0, 1_500.0, 1_500.0]);

        let rent = summary.costs.get(cost_keys::RENT).unwrap();
        assert!((rent[0] - 1_500.0 / 40.0).abs() < 1e-9);

        let debt = summary.wealth.get(wealth_keys::TOTAL_DEBT).unwrap();
        assert!((debt[2] - params.never_paid_principal()).abs() < 1e-9);
    }

    #[test]
    fn test_every_series_has_horizon_length() {
        let params = small_params();
        let loan = LoanSchedule::new(&params).unwrap();
        let mut acc = PathAccumulator::new();
        acc.add(&PathSeries::evaluate(
            &params,
            &loan,
            vec![1_010.0, 1_020.0, 1_030.0],
            vec![1.1, 1.2, 1.3],
        ));
        let summary = acc.summarize(&params, &loan).unwrap();

        assert_eq!(
            summary.costs.keys().collect::<Vec<_>>(),
            ["rent", "maintenance", "loan", "owning_minus_renting"]
        );
        assert_eq!(summary.wealth.series.len(), 5);
        for s in summary.costs.series.iter().chain(&summary.wealth.series) {
            assert_eq!(s.values.len(), 3, "{}", s.key);
        }
    }

    #[test]
    fn test_merge_matches_single_accumulator() {
        let params = small_params();
        let loan = LoanSchedule::new(&params).unwrap();
        let paths: Vec<_> = (0..4)
            .map(|i| {
                let v = 1_000.0 + 100.0 * i as f64;
                PathSeries::evaluate(&params, &loan, vec![v, v, v], vec![1.0, 1.05, 1.1])
            })
            .collect();

        let mut whole = PathAccumulator::new();
        paths.iter().for_each(|p| whole.add(p));

        let mut left = PathAccumulator::new();
        let mut right = PathAccumulator::new();
        paths[..2].iter().for_each(|p| left.add(p));
        paths[2..].iter().for_each(|p| right.add(p));
        left.merge(right);
        assert_eq!(left.paths(), 4);

        let whole = whole.summarize(&params, &loan).unwrap();
        let merged = left.summarize(&params, &loan).unwrap();
        for (a, b) in whole
            .costs
            .series
            .iter()
            .chain(&whole.wealth.series)
            .zip(merged.costs.series.iter().chain(&merged.wealth.series))
        {
            assert_eq!(a.key, b.key);
            for (x, y) in a.values.iter().zip(&b.values) {
                assert!((x - y).abs() < 1e-9, "{}: {x} vs {y}", a.key);
            }
        }
        assert_eq!(whole.final_distribution, merged.final_distribution);
    }

    #[test]
    fn test_empty_accumulator_is_rejected() {
        let params = small_params();
        let loan = LoanSchedule::new(&params).unwrap();
        assert!(PathAccumulator::new().summarize(&params, &loan).is_err());
    }

    #[test]
    fn test_non_finite_mean_is_reported() {
        let params = small_params();
        let loan = LoanSchedule::new(&params).unwrap();
        let mut acc = PathAccumulator::new();
        acc.add(&PathSeries::evaluate(
            &params,
            &loan,
            vec![1_000.0, f64::INFINITY, 1_000.0],
            vec![1.0, 1.0, 1.0],
        ));

        match acc.summarize(&params, &loan) {
            Err(SimulationError::Numerical { quantity, year, .. }) => {
                assert_eq!(quantity, "rent");
                assert_eq!(year, Some(1));
            }
            other => panic!("expected numerical error, got {other:?}"),
        }
    }

    #[test]
    fn test_final_distribution() {
        let values: Vec<f64> = (0..101).map(|i| i as f64 - 20.0).collect();
        let dist = FinalDistribution::from_values(values);

        assert_eq!(dist.percentile(0.05), Some(-15.0));
        assert_eq!(dist.percentile(0.5), Some(30.0));
        assert_eq!(dist.percentile(0.95), Some(75.0));
        assert_eq!(dist.percentile(0.99), None);
        assert!((dist.owning_ahead - 80.0 / 101.0).abs() < 1e-12);
    }
}
