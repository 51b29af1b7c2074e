//! Effect Size
//!
//! Cohen's d with pooled standard deviation and the conventional
//! negligible / small / medium / large classification.

use crate::descriptive::describe;
use crate::error::{StatsError, validate_samples};
use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) of a negligible effect
pub const NEGLIGIBLE_EFFECT_THRESHOLD: f64 = 0.2;
/// Upper bound (exclusive) of a small effect
pub const SMALL_EFFECT_THRESHOLD: f64 = 0.5;
/// Upper bound (exclusive) of a medium effect
pub const MEDIUM_EFFECT_THRESHOLD: f64 = 0.8;

/// Interpretation of effect size magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectSize {
    /// |d| < 0.2 - negligible difference
    Negligible,
    /// 0.2 <= |d| < 0.5 - small difference
    Small,
    /// 0.5 <= |d| < 0.8 - medium difference
    Medium,
    /// |d| >= 0.8 - large difference
    Large,
}

impl EffectSize {
    /// Lowercase label used in reports
    pub fn as_str(self) -> &'static str {
        match self {
            EffectSize::Negligible => "negligible",
            EffectSize::Small => "small",
            EffectSize::Medium => "medium",
            EffectSize::Large => "large",
        }
    }
}

impl std::fmt::Display for EffectSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cohen's d of `group_a` relative to `group_b`
///
/// Positive when `group_a` has the larger mean. Returns 0 when either group
/// is empty, when there are fewer than three samples in total, or when the
/// pooled standard deviation is 0.
pub fn cohen_d(group_a: &[f64], group_b: &[f64]) -> Result<f64, StatsError> {
    validate_samples("group_a", group_a)?;
    validate_samples("group_b", group_b)?;
    Ok(cohen_d_unchecked(group_a, group_b))
}

pub(crate) fn cohen_d_unchecked(group_a: &[f64], group_b: &[f64]) -> f64 {
    if group_a.is_empty() || group_b.is_empty() || group_a.len() + group_b.len() < 3 {
        return 0.0;
    }

    let a = describe(group_a);
    let b = describe(group_b);

    let n1 = a.n as f64;
    let n2 = b.n as f64;

    // Factor out the larger spread before squaring
    let scale = a.std_dev.max(b.std_dev);
    if scale == 0.0 {
        return 0.0;
    }
    let pooled_std = scale
        * (((n1 - 1.0) * (a.std_dev / scale).powi(2) + (n2 - 1.0) * (b.std_dev / scale).powi(2))
            / (n1 + n2 - 2.0))
            .sqrt();

    let d = (a.mean - b.mean) / pooled_std;
    if d.is_finite() { d } else { 0.0 }
}

/// Interpret effect size magnitude using Cohen's conventions
pub fn interpret_effect_size(d: f64) -> EffectSize {
    let abs_d = d.abs();
    if abs_d < NEGLIGIBLE_EFFECT_THRESHOLD {
        EffectSize::Negligible
    } else if abs_d < SMALL_EFFECT_THRESHOLD {
        EffectSize::Small
    } else if abs_d < MEDIUM_EFFECT_THRESHOLD {
        EffectSize::Medium
    } else {
        EffectSize::Large
    }
}
