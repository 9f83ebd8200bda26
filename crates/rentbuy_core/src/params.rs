//! Parameter set for a buy-vs-rent simulation
//!
//! `ParameterSet` is a flat, named configuration. Every field has a
//! `ParameterDescriptor` describing its label, advisory range and default,
//! which presentation layers use to build input widgets. The ranges in the
//! descriptors are hints only: `ParameterSet::validate` enforces the
//! domain the engine actually needs.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// Purchase price every scenario starts from (CHF)
pub const DEFAULT_PROPERTY_PRICE: f64 = 1_000_000.0;

/// Longest horizon the engine accepts
pub const MAX_HORIZON_YEARS: usize = 200;

/// Inputs to one buy-vs-rent evaluation. All rates are per-year fractions.
///
/// `never_paid_fraction` and `paid_fraction` are independent: they are not
/// required to sum to one, nor to the complement of `down_payment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSet {
    /// Purchase price of the property
    pub property_price: f64,
    /// Property price divided by annual rent
    pub rent_to_cost: f64,
    /// Annual maintenance as a fraction of current property value
    pub maintenance_rate: f64,
    /// Number of simulated years
    pub horizon_years: usize,
    /// Fraction of the price paid upfront (invested in stocks when renting)
    pub down_payment: f64,
    /// Fraction of the price borrowed interest-only, never repaid
    pub never_paid_fraction: f64,
    /// Fraction of the price borrowed and amortized
    pub paid_fraction: f64,
    /// Years over which the amortized part is repaid
    pub amortization_years: usize,
    /// Fixed mortgage interest rate
    pub interest_rate: f64,
    pub property_mean: f64,
    pub property_sigma: f64,
    /// Probability that a given year is a good stock-market year
    pub good_year_prob: f64,
    pub good_year_mean: f64,
    pub good_year_sigma: f64,
    pub bad_year_mean: f64,
    pub bad_year_sigma: f64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            property_price: DEFAULT_PROPERTY_PRICE,
            rent_to_cost: 40.0,
            maintenance_rate: 0.01,
            horizon_years: 50,
            down_payment: 0.2,
            never_paid_fraction: 0.65,
            paid_fraction: 0.15,
            amortization_years: 15,
            interest_rate: 0.02,
            property_mean: 0.02,
            property_sigma: 0.01,
            good_year_prob: 0.8,
            good_year_mean: 0.1,
            good_year_sigma: 0.02,
            bad_year_mean: -0.08,
            bad_year_sigma: 0.02,
        }
    }
}

/// Display metadata and advisory range for one `ParameterSet` field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterDescriptor {
    /// Field name in `ParameterSet`
    pub name: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

const fn descriptor(
    name: &'static str,
    label: &'static str,
    min: f64,
    max: f64,
    step: f64,
    default: f64,
) -> ParameterDescriptor {
    ParameterDescriptor {
        name,
        label,
        min,
        max,
        step,
        default,
    }
}

const DESCRIPTORS: [ParameterDescriptor; 15] = [
    descriptor("rent_to_cost", "Flat cost / annual rent", 10.0, 60.0, 5.0, 40.0),
    descriptor("maintenance_rate", "Cost of maintenance (%)", 0.005, 0.05, 0.005, 0.01),
    descriptor("horizon_years", "Duration of the simulation (yr)", 30.0, 70.0, 5.0, 50.0),
    descriptor("down_payment", "Downpayment (%)", 0.05, 1.0, 0.05, 0.2),
    descriptor("never_paid_fraction", "Debt never paid back (%)", 0.0, 1.0, 0.05, 0.65),
    descriptor("paid_fraction", "Debt paid back (%)", 0.0, 1.0, 0.05, 0.15),
    descriptor("amortization_years", "Duration of paid debt (yr)", 10.0, 30.0, 5.0, 15.0),
    descriptor("interest_rate", "Fixed interest rate (%)", 0.01, 0.05, 0.005, 0.02),
    descriptor("property_mean", "Flat value mean return", 0.01, 0.05, 0.005, 0.02),
    descriptor("property_sigma", "Flat value sigma", 0.005, 0.03, 0.005, 0.01),
    descriptor("good_year_prob", "Good year probability", 0.0, 1.0, 0.1, 0.8),
    descriptor("good_year_mean", "Good year mean return", 0.03, 0.15, 0.01, 0.1),
    descriptor("good_year_sigma", "Good year sigma", 0.01, 0.05, 0.005, 0.02),
    descriptor("bad_year_mean", "Bad year mean return", -0.15, -0.01, 0.01, -0.08),
    descriptor("bad_year_sigma", "Bad year sigma", 0.01, 0.05, 0.005, 0.02),
];

fn check_unit_interval(field: &'static str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SimulationError::validation(
            field,
            format!("must be between 0 and 1, got {value}"),
        ));
    }
    Ok(())
}

fn check_positive(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SimulationError::validation(
            field,
            format!("must be positive and finite, got {value}"),
        ));
    }
    Ok(())
}

fn check_non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SimulationError::validation(
            field,
            format!("must be non-negative and finite, got {value}"),
        ));
    }
    Ok(())
}

/// Annual rates must stay above -100%, otherwise compounding goes negative.
fn check_rate(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= -1.0 {
        return Err(SimulationError::validation(
            field,
            format!("must be finite and greater than -1, got {value}"),
        ));
    }
    Ok(())
}

impl ParameterSet {
    /// Advisory ranges and defaults for the adjustable fields.
    ///
    /// `property_price` is a fixed constant and has no descriptor.
    #[must_use]
    pub fn descriptors() -> &'static [ParameterDescriptor] {
        &DESCRIPTORS
    }

    /// Check every field against the domain the engine needs.
    ///
    /// Fails on the first offending field.
    pub fn validate(&self) -> Result<()> {
        check_positive("property_price", self.property_price)?;
        check_positive("rent_to_cost", self.rent_to_cost)?;
        check_non_negative("maintenance_rate", self.maintenance_rate)?;

        if self.horizon_years == 0 {
            return Err(SimulationError::validation(
                "horizon_years",
                "must be at least 1 year",
            ));
        }
        if self.horizon_years > MAX_HORIZON_YEARS {
            return Err(SimulationError::validation(
                "horizon_years",
                format!("cannot exceed {MAX_HORIZON_YEARS} years"),
            ));
        }

        check_unit_interval("down_payment", self.down_payment)?;
        check_unit_interval("never_paid_fraction", self.never_paid_fraction)?;
        check_unit_interval("paid_fraction", self.paid_fraction)?;

        if self.amortization_years > self.horizon_years {
            return Err(SimulationError::validation(
                "amortization_years",
                format!(
                    "{} years exceeds the {}-year horizon",
                    self.amortization_years, self.horizon_years
                ),
            ));
        }

        check_rate("interest_rate", self.interest_rate)?;
        check_rate("property_mean", self.property_mean)?;
        check_non_negative("property_sigma", self.property_sigma)?;
        check_unit_interval("good_year_prob", self.good_year_prob)?;
        check_rate("good_year_mean", self.good_year_mean)?;
        check_non_negative("good_year_sigma", self.good_year_sigma)?;
        check_rate("bad_year_mean", self.bad_year_mean)?;
        check_non_negative("bad_year_sigma", self.bad_year_sigma)?;

        Ok(())
    }

    /// Annual rent for a property currently worth `property_value`
    #[inline]
    #[must_use]
    pub fn rent_for(&self, property_value: f64) -> f64 {
        property_value / self.rent_to_cost
    }

    /// Annual maintenance for a property currently worth `property_value`
    #[inline]
    #[must_use]
    pub fn maintenance_for(&self, property_value: f64) -> f64 {
        property_value * self.maintenance_rate
    }

    /// Cash that goes into the purchase upfront
    #[must_use]
    pub fn down_payment_amount(&self) -> f64 {
        self.down_payment * self.property_price
    }

    /// Interest-only debt carried for the whole horizon
    #[must_use]
    pub fn never_paid_principal(&self) -> f64 {
        self.never_paid_fraction * self.property_price
    }

    /// Debt repaid through annuity payments
    #[must_use]
    pub fn paid_principal(&self) -> f64 {
        self.paid_fraction * self.property_price
    }
}
