//! Building a `ParameterSet` from a scenario file and command-line overrides
//!
//! Scenario files are YAML (or JSON, by extension) documents with any subset
//! of the `ParameterSet` fields; missing fields take their defaults.

use std::path::Path;

use clap::Args;
use color_eyre::eyre::{WrapErr, eyre};
use rentbuy_core::ParameterSet;

/// Load a scenario file
pub fn load_scenario(path: &Path) -> color_eyre::Result<ParameterSet> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("could not read scenario {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let params = if is_json {
        serde_json::from_str(&content)
            .wrap_err_with(|| format!("invalid scenario {}", path.display()))?
    } else {
        serde_saphyr::from_str(&content)
            .map_err(|e| eyre!("invalid scenario {}: {e}", path.display()))?
    };

    tracing::info!(path = %path.display(), "scenario loaded");
    Ok(params)
}

/// Per-field overrides, applied on top of the defaults or scenario file
#[derive(Args, Debug, Default, Clone)]
pub struct ParameterOverrides {
    /// Flat cost / annual rent
    #[arg(long)]
    pub rent_to_cost: Option<f64>,
    /// Annual maintenance as a fraction of property value
    #[arg(long)]
    pub maintenance_rate: Option<f64>,
    /// Simulated years
    #[arg(long)]
    pub horizon_years: Option<usize>,
    /// Down payment as a fraction of the price
    #[arg(long)]
    pub down_payment: Option<f64>,
    /// Fraction of the price borrowed interest-only
    #[arg(long)]
    pub never_paid_fraction: Option<f64>,
    /// Fraction of the price borrowed and amortized
    #[arg(long)]
    pub paid_fraction: Option<f64>,
    /// Years over which the amortized debt is repaid
    #[arg(long)]
    pub amortization_years: Option<usize>,
    /// Fixed mortgage interest rate
    #[arg(long)]
    pub interest_rate: Option<f64>,
    #[arg(long)]
    pub property_mean: Option<f64>,
    #[arg(long)]
    pub property_sigma: Option<f64>,
    /// Probability of a good stock-market year
    #[arg(long)]
    pub good_year_prob: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub good_year_mean: Option<f64>,
    #[arg(long)]
    pub good_year_sigma: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub bad_year_mean: Option<f64>,
    #[arg(long)]
    pub bad_year_sigma: Option<f64>,
}

fn set<T: Copy>(target: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *target = v;
    }
}

impl ParameterOverrides {
    pub fn apply(&self, params: &mut ParameterSet) {
        set(&mut params.rent_to_cost, self.rent_to_cost);
        set(&mut params.maintenance_rate, self.maintenance_rate);
        set(&mut params.horizon_years, self.horizon_years);
        set(&mut params.down_payment, self.down_payment);
        set(&mut params.never_paid_fraction, self.never_paid_fraction);
        set(&mut params.paid_fraction, self.paid_fraction);
        set(&mut params.amortization_years, self.amortization_years);
        set(&mut params.interest_rate, self.interest_rate);
        set(&mut params.property_mean, self.property_mean);
        set(&mut params.property_sigma, self.property_sigma);
        set(&mut params.good_year_prob, self.good_year_prob);
        set(&mut params.good_year_mean, self.good_year_mean);
        set(&mut params.good_year_sigma, self.good_year_sigma);
        set(&mut params.bad_year_mean, self.bad_year_mean);
        set(&mut params.bad_year_sigma, self.bad_year_sigma);
    }
}

/// Defaults, then the scenario file if any, then the overrides
pub fn resolve_parameters(
    scenario: Option<&Path>,
    overrides: &ParameterOverrides,
) -> color_eyre::Result<ParameterSet> {
    let mut params = match scenario {
        Some(path) => load_scenario(path)?,
        None => ParameterSet::default(),
    };
    overrides.apply(&mut params);
    Ok(params)
}
