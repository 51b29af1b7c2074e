//! Welch's t-test
//!
//! Two-sample test that does not assume equal population variances.
//! Degrees of freedom follow the Welch–Satterthwaite equation; the two-tailed
//! p-value comes from the Student-t CDF (via the regularized incomplete beta)
//! or, above [`NORMAL_APPROXIMATION_DF`], from the standard normal.
//!
//! Inconclusive inputs (fewer than two samples per group, zero standard
//! error) report `t = 0`, `p = 1` instead of failing.

use crate::descriptive::describe;
use crate::error::{StatsError, validate_samples};
use crate::special::{incomplete_beta_regularized, normal_cdf};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Degrees of freedom above which the normal approximation is used
pub const NORMAL_APPROXIMATION_DF: f64 = 100.0;

/// Outcome of a two-sample t-test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TTestResult {
    /// t statistic (positive when the first group has the larger mean)
    pub t: f64,
    /// Two-tailed p-value in [0, 1]
    pub p: f64,
    /// Welch–Satterthwaite degrees of freedom
    pub degrees_of_freedom: f64,
}

impl TTestResult {
    /// Non-significant default for tests that cannot be carried out
    pub const fn inconclusive(degrees_of_freedom: f64) -> Self {
        Self {
            t: 0.0,
            p: 1.0,
            degrees_of_freedom,
        }
    }
}

/// Welch's unequal-variance t-test of `group_a` against `group_b`
pub fn welch_t_test(group_a: &[f64], group_b: &[f64]) -> Result<TTestResult, StatsError> {
    validate_samples("group_a", group_a)?;
    validate_samples("group_b", group_b)?;
    Ok(welch_t_test_unchecked(group_a, group_b))
}

pub(crate) fn welch_t_test_unchecked(group_a: &[f64], group_b: &[f64]) -> TTestResult {
    if group_a.len() < 2 || group_b.len() < 2 {
        debug!(
            n_a = group_a.len(),
            n_b = group_b.len(),
            "t-test needs at least 2 samples per group"
        );
        return TTestResult::inconclusive(0.0);
    }

    let a = describe(group_a);
    let b = describe(group_b);
    let n1 = a.n as f64;
    let n2 = b.n as f64;
    let pooled_df = n1 + n2 - 2.0;

    let se_a = a.standard_error();
    let se_b = b.standard_error();
    let se = se_a.hypot(se_b);
    if se == 0.0 {
        debug!("t-test has zero standard error");
        return TTestResult::inconclusive(pooled_df);
    }

    let t = (a.mean - b.mean) / se;

    // Welch-Satterthwaite degrees of freedom, written with each group's
    // share of the squared standard error so no term overflows
    let share_a = (se_a / se).powi(4);
    let share_b = (se_b / se).powi(4);
    let degrees_of_freedom = 1.0 / (share_a / (n1 - 1.0) + share_b / (n2 - 1.0));

    if !t.is_finite() || !degrees_of_freedom.is_finite() {
        debug!(t, df = degrees_of_freedom, "t-test overflowed");
        return TTestResult::inconclusive(pooled_df);
    }

    let p = two_tailed_p_value(t, degrees_of_freedom);

    debug!(t, p, df = degrees_of_freedom, "Welch t-test");

    TTestResult {
        t,
        p,
        degrees_of_freedom,
    }
}

/// Two-tailed p-value of a t statistic
///
/// `P(|T| > t) = I_{df/(df+t²)}(df/2, 1/2)`; the normal tail is used above
/// [`NORMAL_APPROXIMATION_DF`].
pub fn two_tailed_p_value(t: f64, degrees_of_freedom: f64) -> f64 {
    if t.is_nan() || degrees_of_freedom.is_nan() || degrees_of_freedom <= 0.0 {
        return 1.0;
    }
    let t = t.abs();
    let p = if degrees_of_freedom > NORMAL_APPROXIMATION_DF {
        2.0 * (1.0 - normal_cdf(t))
    } else {
        let x = degrees_of_freedom / (degrees_of_freedom + t * t);
        incomplete_beta_regularized(x, degrees_of_freedom / 2.0, 0.5)
    };
    p.clamp(0.0, 1.0)
}
