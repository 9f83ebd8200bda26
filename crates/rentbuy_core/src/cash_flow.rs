//! Owning-vs-renting cash flows for a single simulated path
//!
//! Each year the owner pays loan costs and maintenance while the renter pays
//! rent. The difference is what the renter could invest (or would have to
//! withdraw) in the stock market that year. Its value at year `t` is the
//! triangular sum
//!
//! ```text
//! reinvested[t] = sum_{s <= t} differential[s] * growth[t] / growth[s]
//! ```
//!
//! which depends on the path's own growth factors, so it is evaluated per
//! path in O(years²).

use crate::mortgage::LoanSchedule;
use crate::params::ParameterSet;

/// Value at each year of all differentials up to that year, compounded at
/// the path's stock growth.
///
/// `differential` and `growth` must have the same length.
#[must_use]
pub fn reinvested_differential(differential: &[f64], growth: &[f64]) -> Vec<f64> {
    debug_assert_eq!(differential.len(), growth.len());

    (0..growth.len())
        .map(|t| {
            (0..=t)
                .map(|s| growth[t] / growth[s] * differential[s])
                .sum()
        })
        .collect()
}

/// Linear-time recurrence equivalent to [`reinvested_differential`] up to
/// floating-point rounding.
#[must_use]
pub fn reinvested_differential_running(differential: &[f64], growth: &[f64]) -> Vec<f64> {
    debug_assert_eq!(differential.len(), growth.len());

    let mut values = Vec::with_capacity(growth.len());
    let mut acc = 0.0;
    for t in 0..growth.len() {
        if t > 0 {
            acc *= growth[t] / growth[t - 1];
        }
        acc += differential[t];
        values.push(acc);
    }
    values
}

/// Every per-year quantity of one simulated path.
///
/// Loan quantities do not depend on the path and are borrowed from the
/// shared [`LoanSchedule`].
#[derive(Debug, Clone)]
pub struct PathSeries<'a> {
    loan: &'a LoanSchedule,
    pub property_value: Vec<f64>,
    pub rent: Vec<f64>,
    pub maintenance: Vec<f64>,
    pub stock_growth: Vec<f64>,
    /// Owning cost minus renting cost
    pub differential: Vec<f64>,
    /// Down payment kept in the stock market instead
    pub invested_down_payment: Vec<f64>,
    pub reinvested_differential: Vec<f64>,
    /// Owning minus renting wealth
    pub net_wealth: Vec<f64>,
}

impl<'a> PathSeries<'a> {
    /// Derive all cash flows of a path from its property values and stock
    /// growth factors.
    pub fn evaluate(
        params: &ParameterSet,
        loan: &'a LoanSchedule,
        property_value: Vec<f64>,
        stock_growth: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(property_value.len(), loan.years());
        debug_assert_eq!(stock_growth.len(), loan.years());

        let rent: Vec<f64> = property_value.iter().map(|v| params.rent_for(*v)).collect();
        let maintenance: Vec<f64> = property_value
            .iter()
            .map(|v| params.maintenance_for(*v))
            .collect();

        let differential: Vec<f64> = loan
            .total_cost()
            .iter()
            .zip(&maintenance)
            .zip(&rent)
            .map(|((loan_cost, maint), rent)| loan_cost + maint - rent)
            .collect();

        let down_payment = params.down_payment_amount();
        let invested_down_payment: Vec<f64> =
            stock_growth.iter().map(|g| down_payment * g).collect();

        let reinvested = reinvested_differential(&differential, &stock_growth);

        let never_paid = params.never_paid_principal();
        let net_wealth = (0..property_value.len())
            .map(|t| {
                property_value[t]
                    - never_paid
                    - loan.remaining_balance()[t]
                    - invested_down_payment[t]
                    - reinvested[t]
            })
            .collect();

        Self {
            loan,
            property_value,
            rent,
            maintenance,
            stock_growth,
            differential,
            invested_down_payment,
            reinvested_differential: reinvested,
            net_wealth,
        }
    }

    #[must_use]
    pub fn loan(&self) -> &LoanSchedule {
        self.loan
    }

    #[must_use]
    pub fn years(&self) -> usize {
        self.property_value.len()
    }

    /// Owning minus renting wealth at the end of the horizon
    #[must_use]
    pub fn final_net_wealth(&self) -> f64 {
        self.net_wealth.last().copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_triangular_sum_three_years() {
        let values = reinvested_differential(&[10.0, -5.0, 2.0], &[1.0, 1.1, 1.21]);
        assert_eq!(values.len(), 3);
        assert_close(values[0], 10.0);
        assert_close(values[1], 11.0 - 5.0);
        // 10 * 1.21 - 5 * 1.21 / 1.1 + 2
        assert_close(values[2], 8.6);
    }

    #[test]
    fn test_growth_is_relative_to_each_year() {
        // Growth before the first contribution must not count
        let values = reinvested_differential(&[0.0, 100.0, 0.0], &[2.0, 4.0, 6.0]);
        assert_close(values[1], 100.0);
        assert_close(values[2], 150.0);
    }

    #[test]
    fn test_running_sum_matches_triangular_sum() {
        let differential: Vec<f64> = (0..40).map(|t| (t as f64 * 0.7).sin() * 1_000.0).collect();
        let growth = crate::paths::compound(
            1.0,
            &(0..40)
                .map(|t| if t % 3 == 0 { -0.08 } else { 0.1 })
                .collect::<Vec<_>>(),
        );

        let exact = reinvested_differential(&differential, &growth);
        let running = reinvested_differential_running(&differential, &growth);
        for (a, b) in exact.iter().zip(&running) {
            assert!((a - b).abs() <= 1e-9 * a.abs().max(1.0), "{a} vs {b}");
        }
    }

    #[test]
    fn test_empty_path() {
        assert!(reinvested_differential(&[], &[]).is_empty());
        assert!(reinvested_differential_running(&[], &[]).is_empty());
    }

    #[test]
    fn test_hand_computed_path() {
        let params = ParameterSet {
            property_price: 1_000.0,
            rent_to_cost: 20.0,
            maintenance_rate: 0.01,
            horizon_years: 2,
            down_payment: 0.2,
            never_paid_fraction: 0.5,
            paid_fraction: 0.0,
            amortization_years: 0,
            interest_rate: 0.04,
            ..Default::default()
        };
        let loan = LoanSchedule::new(&params).unwrap();
        let path = PathSeries::evaluate(&params, &loan, vec![1_100.0, 1_210.0], vec![1.1, 1.21]);

        assert_close(path.rent[0], 55.0);
        assert_close(path.maintenance[1], 12.1);
        // loan 20 + maintenance 11 - rent 55
        assert_close(path.differential[0], -24.0);
        // loan 20 + maintenance 12.1 - rent 60.5
        assert_close(path.differential[1], -28.4);
        assert_close(path.invested_down_payment[1], 242.0);
        assert_close(path.reinvested_differential[1], -24.0 * 1.1 - 28.4);
        // 1210 - 500 - 0 - 242 - (-54.8)
        assert_close(path.final_net_wealth(), 522.8);
        assert_eq!(path.years(), 2);
        assert_eq!(path.loan().interest_only_cost(), 20.0);
    }
}
