// Descriptive statistics over numeric fields
// Author: Gabriel Demetrios Lafis

use std::fmt;

use super::FilteredView;
use crate::data::NumericField;

/// Descriptive statistics for one numeric field of a view.
///
/// On an empty view `count` is zero and every other value is NaN; `std`
/// is also NaN when fewer than two values are present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub field: NumericField,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl SummaryStats {
    /// Compute statistics from raw values
    pub fn from_values(field: NumericField, values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        SummaryStats {
            field,
            count: sorted.len(),
            mean: compute_mean(&sorted),
            std: compute_std_dev(&sorted),
            min: sorted.first().copied().unwrap_or(f64::NAN),
            p25: compute_quantile(&sorted, 0.25),
            p50: compute_quantile(&sorted, 0.5),
            p75: compute_quantile(&sorted, 0.75),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }
}

impl fmt::Display for SummaryStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:<10}{:>8}{:>14.2}{:>14.2}{:>12.2}{:>12.2}{:>12.2}{:>12.2}{:>12.2}",
            self.field.name(),
            self.count,
            self.mean,
            self.std,
            self.min,
            self.p25,
            self.p50,
            self.p75,
            self.max
        )
    }
}

/// Header line matching the `Display` layout of [`SummaryStats`]
pub fn summary_header() -> String {
    format!(
        "{:<10}{:>8}{:>14}{:>14}{:>12}{:>12}{:>12}{:>12}{:>12}",
        "field", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    )
}

/// Describe each requested numeric field of a view
pub fn describe(view: &FilteredView, fields: &[NumericField]) -> Vec<SummaryStats> {
    fields
        .iter()
        .map(|&field| {
            let values: Vec<f64> = view.iter().map(|r| r.number(field)).collect();
            SummaryStats::from_values(field, &values)
        })
        .collect()
}

/// Compute mean of values
fn compute_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }

    values.iter().sum::<f64>() / values.len() as f64
}

/// Compute the sample standard deviation (one delta degree of freedom)
fn compute_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }

    let mean = compute_mean(values);
    let variance = values.iter()
        .map(|&x| (x - mean).powi(2))
        .sum::<f64>() / (values.len() - 1) as f64;

    variance.sqrt()
}

/// Compute a quantile of sorted values by linear interpolation
fn compute_quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }

    let pos = q * (sorted.len() - 1) as f64;
    let idx = pos.floor() as usize;
    let frac = pos - idx as f64;

    if idx + 1 < sorted.len() {
        sorted[idx] + frac * (sorted[idx + 1] - sorted[idx])
    } else {
        sorted[idx]
    }
}
