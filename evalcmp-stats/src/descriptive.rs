//! Descriptive Statistics
//!
//! Mean and Bessel-corrected standard deviation of a sample group.
//! Degenerate groups never produce NaN: an empty group has mean 0 and
//! fewer than two samples have zero dispersion.

use serde::{Deserialize, Serialize};

/// Summary of a single sample group
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptiveStats {
    /// Arithmetic mean (0 for an empty group)
    pub mean: f64,
    /// Sample standard deviation, n-1 denominator (0 when n < 2)
    pub std_dev: f64,
    /// Number of samples
    pub n: usize,
}

/// Arithmetic mean; 0 for an empty slice
///
/// Finite input always gives a finite mean, including values near `f64::MAX`.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let sum = values.iter().sum::<f64>();
    if sum.is_finite() {
        return sum / n;
    }

    // Sum overflowed: average the values scaled into [-1, 1]
    let scale = max_abs(values);
    values.iter().map(|x| x / scale).sum::<f64>() / n * scale
}

/// Sample variance with Bessel's correction; 0 when fewer than two values
///
/// A constant group has exactly zero variance even when its mean picks up
/// rounding error. The variance of a spread wider than about 1e154 is not
/// representable and comes back as `+∞`; [`std_dev`] stays finite.
pub fn variance(values: &[f64]) -> f64 {
    let (scale, scaled_variance) = scaled_variance(values);
    scaled_variance * scale * scale
}

/// Sample standard deviation; 0 when fewer than two values
pub fn std_dev(values: &[f64]) -> f64 {
    let (scale, scaled_variance) = scaled_variance(values);
    scaled_variance.sqrt() * scale
}

/// Variance as `(scale, v)` with the true variance equal to `v * scale²`
///
/// `scale` is 1 unless the squared deviations overflow.
fn scaled_variance(values: &[f64]) -> (f64, f64) {
    if values.len() < 2 {
        return (1.0, 0.0);
    }
    let first = values[0];
    if values.iter().all(|&v| v == first) {
        return (1.0, 0.0);
    }

    let plain = sum_squared_deviations(values) / (values.len() - 1) as f64;
    if plain.is_finite() {
        return (1.0, plain);
    }

    let scale = max_abs(values);
    let scaled: Vec<f64> = values.iter().map(|x| x / scale).collect();
    (
        scale,
        sum_squared_deviations(&scaled) / (values.len() - 1) as f64,
    )
}

fn sum_squared_deviations(values: &[f64]) -> f64 {
    let mean = mean(values);
    values.iter().map(|x| (x - mean).powi(2)).sum::<f64>()
}

fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc: f64, x| acc.max(x.abs()))
}

/// Summarize a sample group
pub fn describe(values: &[f64]) -> DescriptiveStats {
    DescriptiveStats {
        mean: mean(values),
        std_dev: std_dev(values),
        n: values.len(),
    }
}

impl DescriptiveStats {
    /// Sample variance (square of `std_dev`)
    pub fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }

    /// Standard error of the mean
    pub fn standard_error(&self) -> f64 {
        if self.n == 0 {
            0.0
        } else {
            self.std_dev / (self.n as f64).sqrt()
        }
    }

    /// Coefficient of variation in percent (0 when the mean is 0)
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean == 0.0 {
            0.0
        } else {
            (self.std_dev / self.mean) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert!((mean(&[1.0, 2.0, 3.0, 4.0, 5.0]) - 3.0).abs() < f64::EPSILON);
        assert!((mean(&[0.25]) - 0.25).abs() < f64::EPSILON);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_std_dev() {
        assert!((std_dev(&[1.0, 2.0, 3.0]) - 1.0).abs() < 1e-12);
        assert!((std_dev(&[1.0, 2.0, 3.0, 4.0, 5.0]) - 2.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_std_dev_constant_is_zero() {
        assert_eq!(std_dev(&[0.7; 12]), 0.0);
    }

    #[test]
    fn test_std_dev_insufficient_samples() {
        assert_eq!(std_dev(&[]), 0.0);
        assert_eq!(std_dev(&[42.0]), 0.0);
    }

    #[test]
    fn test_describe() {
        let stats = describe(&[0.5, 0.7, 0.9]);
        assert_eq!(stats.n, 3);
        assert!((stats.mean - 0.7).abs() < 1e-12);
        assert!((stats.std_dev - 0.2).abs() < 1e-12);
        assert!((stats.variance() - 0.04).abs() < 1e-12);
        assert!((stats.standard_error() - 0.2 / 3f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_describe_empty() {
        let stats = describe(&[]);
        assert_eq!(stats, DescriptiveStats::default());
        assert_eq!(stats.standard_error(), 0.0);
        assert_eq!(stats.coefficient_of_variation(), 0.0);
    }

    #[test]
    fn test_mean_near_max_does_not_overflow() {
        assert_eq!(mean(&[1e308; 3]), 1e308);
        assert_eq!(mean(&[f64::MAX, f64::MAX]), f64::MAX);
        let m = mean(&[f64::MAX, f64::MAX, -f64::MAX]);
        assert!(m.is_finite() && m > 0.0);
    }

    #[test]
    fn test_wide_spread_keeps_finite_std_dev() {
        let values = [-1e200, 1e200, 0.0];
        assert_eq!(mean(&values), 0.0);
        assert!((std_dev(&values) / 1e200 - 1.0).abs() < 1e-12);
        assert_eq!(variance(&values), f64::INFINITY);

        let stats = describe(&values);
        assert!(stats.standard_error().is_finite());
    }

    #[test]
    fn test_negative_and_unbounded_values() {
        let stats = describe(&[-1000.0, 1000.0]);
        assert_eq!(stats.mean, 0.0);
        assert!((stats.std_dev - 2_000_000f64.sqrt()).abs() < 1e-9);
    }
}
