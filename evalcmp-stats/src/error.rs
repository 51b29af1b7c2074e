//! Input Validation
//!
//! Degenerate inputs (empty groups, single samples, zero variance) are not
//! errors: they resolve to conservative defaults inside each component. The
//! only failure surfaced to callers is a contract violation, i.e. a value that
//! would turn every downstream statistic into NaN.

use thiserror::Error;

/// Errors from statistical operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// A sample group contains NaN or an infinity
    #[error("Non-finite value {value} at index {index} in {group} samples")]
    InvalidInput {
        /// Which group the offending value came from
        group: &'static str,
        /// Position of the first non-finite value
        index: usize,
        /// The offending value (NaN or infinite)
        value: f64,
    },

    /// Confidence level outside the open interval (0, 1)
    #[error("Invalid confidence level: {0} (must be between 0 and 1)")]
    InvalidConfidenceLevel(f64),
}

/// Reject a sample group containing NaN or infinite values.
///
/// `group` labels the slice in the resulting error message.
pub fn validate_samples(group: &'static str, values: &[f64]) -> Result<(), StatsError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(StatsError::InvalidInput {
            group,
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}

/// Reject confidence levels outside the open interval (0, 1).
pub(crate) fn validate_confidence_level(level: f64) -> Result<(), StatsError> {
    if level.is_finite() && level > 0.0 && level < 1.0 {
        Ok(())
    } else {
        Err(StatsError::InvalidConfidenceLevel(level))
    }
}
