//! Mortgage accounting
//!
//! The loan has two independent parts, both sized as fractions of the
//! purchase price:
//! - an interest-only part whose principal is never repaid, costing
//!   `rate * principal` every year of the horizon
//! - an amortized part repaid with fixed annuity payments over
//!   `amortization_years`, then nothing
//!
//! The schedule is identical for every simulated path, so it is computed once
//! per evaluation.

use serde::Serialize;

use crate::error::{Result, SimulationError};
use crate::params::ParameterSet;

/// Fixed annual payment repaying `principal` over `duration` years at `rate`.
///
/// Returns zero when there is nothing to repay (`duration == 0` or
/// `principal == 0`). Degenerate rates that make the annuity factor vanish,
/// such as a zero rate, are reported as a numerical error.
pub fn annuity_payment(rate: f64, principal: f64, duration: usize) -> Result<f64> {
    if duration == 0 || principal == 0.0 {
        return Ok(0.0);
    }

    let denominator = 1.0 - (1.0 + rate).powi(-(duration as i32));
    let payment = rate * principal / denominator;
    if denominator == 0.0 || !payment.is_finite() {
        return Err(SimulationError::Numerical {
            quantity: "amortization payment",
            year: None,
            value: payment,
        });
    }
    Ok(payment)
}

/// Per-year loan costs and balances over the horizon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanSchedule {
    interest_only_cost: f64,
    amortized_payment: Vec<f64>,
    remaining_balance: Vec<f64>,
    total_cost: Vec<f64>,
}

impl LoanSchedule {
    pub fn new(params: &ParameterSet) -> Result<Self> {
        let years = params.horizon_years;
        let duration = params.amortization_years;
        let interest_only_cost = params.interest_rate * params.never_paid_principal();
        let payment = annuity_payment(params.interest_rate, params.paid_principal(), duration)?;

        let amortized_payment: Vec<f64> = (0..years)
            .map(|year| if year < duration { payment } else { 0.0 })
            .collect();

        // Remaining balance is the linear proxy `payment * duration - paid so far`,
        // not a declining-principal schedule.
        let scheduled_total = amortized_payment.first().copied().unwrap_or(0.0) * duration as f64;
        let remaining_balance = amortized_payment
            .iter()
            .scan(0.0, |paid, p| {
                *paid += p;
                Some(scheduled_total - *paid)
            })
            .collect();

        let total_cost = amortized_payment
            .iter()
            .map(|p| interest_only_cost + p)
            .collect();

        Ok(Self {
            interest_only_cost,
            amortized_payment,
            remaining_balance,
            total_cost,
        })
    }

    /// Annual interest on the never-repaid part, the same every year
    #[must_use]
    pub fn interest_only_cost(&self) -> f64 {
        self.interest_only_cost
    }

    #[must_use]
    pub fn amortized_payment(&self) -> &[f64] {
        &self.amortized_payment
    }

    /// Amortized balance still owed at the end of each year
    #[must_use]
    pub fn remaining_balance(&self) -> &[f64] {
        &self.remaining_balance
    }

    /// Interest-only cost plus amortized payment, per year
    #[must_use]
    pub fn total_cost(&self) -> &[f64] {
        &self.total_cost
    }

    #[must_use]
    pub fn years(&self) -> usize {
        self.total_cost.len()
    }
}
