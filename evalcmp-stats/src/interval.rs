//! Confidence Intervals
//!
//! Normal-approximation interval for a single group mean:
//! `mean ± z · std_dev / √n`.
//!
//! The default critical value comes from a three-entry table (0.95, 0.99 and
//! a 1.645 fallback for everything else). [`CriticalValue::Quantile`] opts in
//! to the inverse normal CDF for arbitrary levels.

use crate::DEFAULT_CONFIDENCE_LEVEL;
use crate::descriptive::describe;
use crate::error::{StatsError, validate_confidence_level, validate_samples};
use crate::special::normal_quantile;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// z for a 95% two-sided interval
pub const Z_95: f64 = 1.96;
/// z for a 99% two-sided interval
pub const Z_99: f64 = 2.576;
/// z used for every other level in table mode (exact for 90%)
pub const Z_FALLBACK: f64 = 1.645;

/// Confidence interval bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Lower bound
    pub lower: f64,
    /// Upper bound
    pub upper: f64,
    /// Half-width of the interval
    pub margin: f64,
}

impl ConfidenceInterval {
    /// Whether `value` lies within the closed interval
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Full width (`upper - lower`)
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// How the critical z value is chosen for a confidence level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CriticalValue {
    /// 1.96 for 0.95, 2.576 for 0.99, 1.645 otherwise
    #[default]
    Table,
    /// Inverse normal CDF at `1 - (1 - level) / 2`
    Quantile,
}

impl CriticalValue {
    /// Critical z value for a two-sided interval at `level`
    pub fn z(self, level: f64) -> f64 {
        match self {
            CriticalValue::Table => table_z(level),
            CriticalValue::Quantile => normal_quantile(1.0 - (1.0 - level) / 2.0),
        }
    }
}

fn table_z(level: f64) -> f64 {
    if level == 0.95 {
        Z_95
    } else if level == 0.99 {
        Z_99
    } else {
        if (level - 0.90).abs() > 1e-9 {
            warn!(
                level,
                z = Z_FALLBACK,
                "No tabulated z for confidence level; using the 90% value"
            );
        }
        Z_FALLBACK
    }
}

/// Confidence interval for the mean of `values` using the tabulated z
///
/// Fewer than two samples give a zero-width interval at the single value
/// (or at 0 for an empty group).
pub fn confidence_interval(values: &[f64], level: f64) -> Result<ConfidenceInterval, StatsError> {
    confidence_interval_with(values, level, CriticalValue::Table)
}

/// 95% confidence interval for the mean of `values`
pub fn confidence_interval_95(values: &[f64]) -> Result<ConfidenceInterval, StatsError> {
    confidence_interval(values, DEFAULT_CONFIDENCE_LEVEL)
}

/// Confidence interval for the mean with an explicit critical-value method
pub fn confidence_interval_with(
    values: &[f64],
    level: f64,
    critical_value: CriticalValue,
) -> Result<ConfidenceInterval, StatsError> {
    validate_samples("samples", values)?;
    validate_confidence_level(level)?;

    if values.len() < 2 {
        let value = values.first().copied().unwrap_or(0.0);
        return Ok(ConfidenceInterval {
            lower: value,
            upper: value,
            margin: 0.0,
        });
    }

    let stats = describe(values);
    let margin = critical_value.z(level) * stats.standard_error();

    Ok(ConfidenceInterval {
        lower: stats.mean - margin,
        upper: stats.mean + margin,
        margin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_interval() {
        let ci = confidence_interval(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.95).unwrap();
        let expected_margin = 1.96 * 2.5f64.sqrt() / 5f64.sqrt();
        assert!((ci.margin - expected_margin).abs() < 1e-12);
        assert!((ci.margin - 1.386).abs() < 1e-3);
        assert!((ci.lower - (3.0 - expected_margin)).abs() < 1e-12);
        assert!((ci.upper - (3.0 + expected_margin)).abs() < 1e-12);
        assert!(ci.contains(3.0));
    }

    #[test]
    fn test_default_level() {
        let values = [0.2, 0.4, 0.6];
        assert_eq!(
            confidence_interval_95(&values).unwrap(),
            confidence_interval(&values, 0.95).unwrap()
        );
    }

    #[test]
    fn test_table_z_values() {
        assert_eq!(CriticalValue::Table.z(0.95), Z_95);
        assert_eq!(CriticalValue::Table.z(0.99), Z_99);
        assert_eq!(CriticalValue::Table.z(0.90), Z_FALLBACK);
        // Untabulated levels keep the fallback
        assert_eq!(CriticalValue::Table.z(0.80), Z_FALLBACK);
    }

    /// Run `f` under a WARN-level subscriber and return what it logged
    fn capture_warnings(f: impl FnOnce()) -> String {
        use std::io::Write;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Buffer(Arc<Mutex<Vec<u8>>>);

        impl Write for Buffer {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let buffer = Buffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);

        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_lossy_table_fallback_warns() {
        let logs = capture_warnings(|| {
            assert_eq!(CriticalValue::Table.z(0.80), Z_FALLBACK);
        });
        assert!(logs.contains("No tabulated z for confidence level"));
        assert!(logs.contains("level=0.8"));

        // 0.90 is what the fallback value stands for
        let logs = capture_warnings(|| {
            assert_eq!(CriticalValue::Table.z(0.90), Z_FALLBACK);
            assert_eq!(CriticalValue::Table.z(0.95), Z_95);
            assert!((CriticalValue::Quantile.z(0.80) - 1.2816).abs() < 0.01);
        });
        assert!(logs.is_empty(), "{logs}");
    }

    #[test]
    fn test_quantile_z_values() {
        assert!((CriticalValue::Quantile.z(0.95) - 1.96).abs() < 0.01);
        assert!((CriticalValue::Quantile.z(0.99) - 2.576).abs() < 0.01);
        assert!((CriticalValue::Quantile.z(0.80) - 1.2816).abs() < 0.01);
    }

    #[test]
    fn test_wider_level_gives_wider_interval() {
        let values = [0.61, 0.64, 0.58, 0.66, 0.63, 0.60];
        let ci_95 = confidence_interval(&values, 0.95).unwrap();
        let ci_99 = confidence_interval(&values, 0.99).unwrap();
        assert!(ci_99.width() > ci_95.width());
    }

    #[test]
    fn test_degenerate_inputs() {
        let empty = confidence_interval(&[], 0.95).unwrap();
        assert_eq!((empty.lower, empty.upper, empty.margin), (0.0, 0.0, 0.0));

        let single = confidence_interval(&[0.42], 0.99).unwrap();
        assert_eq!((single.lower, single.upper, single.margin), (0.42, 0.42, 0.0));
    }

    #[test]
    fn test_constant_values_have_zero_margin() {
        let ci = confidence_interval(&[0.7; 8], 0.95).unwrap();
        assert_eq!(ci.margin, 0.0);
        assert_eq!(ci.width(), 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            confidence_interval(&[1.0, 2.0], 1.5),
            Err(StatsError::InvalidConfidenceLevel(_))
        ));
        assert!(matches!(
            confidence_interval(&[1.0, f64::NAN], 0.95),
            Err(StatsError::InvalidInput { .. })
        ));
    }
}
