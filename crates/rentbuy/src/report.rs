//! Text and JSON rendering of simulation outcomes

use std::fmt::Write;

use rentbuy_core::{OutcomeSummary, ParameterSet, ResultSeries};
use serde::Serialize;

use crate::format::{format_chf, format_compact, format_percentage};

const COLUMN_WIDTH: usize = 24;

/// Everything written by `rentbuy run --format json`
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub parameters: &'a ParameterSet,
    pub seed: Option<u64>,
    pub summary: &'a OutcomeSummary,
}

impl Report<'_> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Year indices shown in a table: every `every`-th year plus the last one
fn displayed_years(horizon: usize, every: usize) -> Vec<usize> {
    let step = every.max(1);
    let mut years: Vec<usize> = (0..horizon).step_by(step).collect();
    if let Some(last) = horizon.checked_sub(1)
        && years.last() != Some(&last)
    {
        years.push(last);
    }
    years
}

fn render_series(out: &mut String, result: &ResultSeries, years: &[usize]) {
    let _ = writeln!(out, "{} ({})", result.title, result.y_axis);

    let _ = write!(out, "{:>6}", "year");
    for s in &result.series {
        let _ = write!(out, "{:>width$}", s.key, width = COLUMN_WIDTH);
    }
    out.push('\n');

    for &year in years {
        let _ = write!(out, "{year:>6}");
        for s in &result.series {
            let _ = write!(
                out,
                "{:>width$}",
                format_compact(s.values[year]),
                width = COLUMN_WIDTH
            );
        }
        out.push('\n');
    }
}

/// Render both result views and the final distribution as plain text
pub fn render_table(summary: &OutcomeSummary, every: usize) -> String {
    let years = displayed_years(summary.years.len(), every);
    let mut out = String::new();

    render_series(&mut out, &summary.costs, &years);
    out.push('\n');
    render_series(&mut out, &summary.wealth, &years);
    out.push('\n');

    let dist = &summary.final_distribution;
    let _ = writeln!(
        out,
        "Owning ahead after {} years in {} of {} paths",
        summary.years.len(),
        format_percentage(dist.owning_ahead),
        summary.num_paths
    );
    for (p, value) in &dist.percentiles {
        let _ = writeln!(out, "  P{:<3} {}", (p * 100.0).round(), format_chf(*value));
    }
    out
}

/// Render the parameter descriptors with the values in effect
pub fn render_parameters(params: &ParameterSet) -> String {
    let json = serde_json::to_value(params).unwrap_or_default();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<22}{:<34}{:>10}{:>10}{:>10}{:>10}",
        "name", "label", "min", "max", "step", "value"
    );
    for d in ParameterSet::descriptors() {
        let value = json.get(d.name).and_then(|v| v.as_f64()).unwrap_or(d.default);
        let _ = writeln!(
            out,
            "{:<22}{:<34}{:>10}{:>10}{:>10}{:>10}",
            d.name, d.label, d.min, d.max, d.step, value
        );
    }
    out
}
