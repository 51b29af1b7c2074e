#![warn(missing_docs)]
//! evalcmp Statistical Engine
//!
//! Compares a baseline run of evaluation scores against a challenger run:
//! - Descriptive statistics (mean, Bessel-corrected standard deviation)
//! - Special functions (log-gamma, regularized incomplete beta, normal CDF)
//! - Effect size via Cohen's d with pooled standard deviation
//! - Welch's unequal-variance t-test with Welch–Satterthwaite degrees of freedom
//! - Normal-approximation confidence intervals
//! - A deterministic winner verdict per metric
//!
//! Every function is pure. Degenerate input (empty groups, single samples,
//! zero variance) resolves to conservative defaults; only non-finite values
//! are rejected, with [`StatsError::InvalidInput`].

mod comparison;
mod descriptive;
mod effect;
mod error;
mod interval;
mod policy;
mod special;
mod ttest;

pub use comparison::{
    ComparisonSummary, MetricComparison, MetricInput, compare_all, compare_metrics,
    compare_metrics_with,
};
pub use descriptive::{DescriptiveStats, describe, mean, std_dev, variance};
pub use effect::{
    EffectSize, MEDIUM_EFFECT_THRESHOLD, NEGLIGIBLE_EFFECT_THRESHOLD, SMALL_EFFECT_THRESHOLD,
    cohen_d, interpret_effect_size,
};
pub use error::{StatsError, validate_samples};
pub use interval::{
    ConfidenceInterval, CriticalValue, Z_95, Z_99, Z_FALLBACK, confidence_interval,
    confidence_interval_95, confidence_interval_with,
};
pub use policy::{
    ComparisonPolicy, STRONG_SIGNIFICANCE_ALPHA, SIGNIFICANCE_ALPHA, SignificanceResult,
    TIE_EPSILON, VERY_STRONG_SIGNIFICANCE_ALPHA, Winner, decide_winner, significance,
};
pub use special::{
    CF_EPSILON, CF_MAX_ITERATIONS, incomplete_beta_regularized, ln_gamma, normal_cdf,
    normal_quantile,
};
pub use ttest::{NORMAL_APPROXIMATION_DF, TTestResult, two_tailed_p_value, welch_t_test};

/// Default confidence level (95%)
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;
