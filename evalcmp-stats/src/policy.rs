//! Decision Policy
//!
//! Turns a p-value into a significance bucket and a (significance, difference)
//! pair into a winner. Reports and dashboards render these labels verbatim,
//! so the defaults are fixed constants; [`ComparisonPolicy`] exists so the
//! cut-offs can be audited and tested in isolation.

use serde::{Deserialize, Serialize};

/// p-value below which a difference is reported as significant (`*`)
pub const SIGNIFICANCE_ALPHA: f64 = 0.05;
/// p-value cut-off for `**`
pub const STRONG_SIGNIFICANCE_ALPHA: f64 = 0.01;
/// p-value cut-off for `***`
pub const VERY_STRONG_SIGNIFICANCE_ALPHA: f64 = 0.001;
/// Absolute mean difference below which a significant result is still a tie
pub const TIE_EPSILON: f64 = 0.001;

/// Which run won a metric comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    /// Baseline mean is significantly better
    Baseline,
    /// Challenger mean is significantly better
    Challenger,
    /// No significant or meaningful difference
    Tie,
}

impl Winner {
    /// Lowercase label used in reports
    pub fn as_str(self) -> &'static str {
        match self {
            Winner::Baseline => "baseline",
            Winner::Challenger => "challenger",
            Winner::Tie => "tie",
        }
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Significance bucket derived from a p-value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignificanceResult {
    /// Human-readable level, e.g. `"p < 0.01"` or `"p = 0.231"`
    pub level: String,
    /// `"***"`, `"**"`, `"*"` or empty
    pub stars: String,
    /// Whether p is below the significance alpha
    pub is_significant: bool,
}

/// Cut-offs used when turning test results into verdicts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonPolicy {
    /// Significance level for `*` and for `is_significant`
    pub alpha: f64,
    /// Level for `**`
    pub strong_alpha: f64,
    /// Level for `***`
    pub very_strong_alpha: f64,
    /// Minimum absolute mean difference for a non-tie verdict
    pub tie_epsilon: f64,
}

impl Default for ComparisonPolicy {
    fn default() -> Self {
        Self {
            alpha: SIGNIFICANCE_ALPHA,
            strong_alpha: STRONG_SIGNIFICANCE_ALPHA,
            very_strong_alpha: VERY_STRONG_SIGNIFICANCE_ALPHA,
            tie_epsilon: TIE_EPSILON,
        }
    }
}

impl ComparisonPolicy {
    /// Classify a p-value
    pub fn significance(&self, p: f64) -> SignificanceResult {
        let (level, stars) = if p < self.very_strong_alpha {
            (format!("p < {}", self.very_strong_alpha), "***")
        } else if p < self.strong_alpha {
            (format!("p < {}", self.strong_alpha), "**")
        } else if p < self.alpha {
            (format!("p < {}", self.alpha), "*")
        } else {
            (format!("p = {:.3}", p), "")
        };

        SignificanceResult {
            level,
            stars: stars.to_string(),
            is_significant: p < self.alpha,
        }
    }

    /// Decide the winner from significance and `challenger - baseline`
    ///
    /// Ties when the result is not significant or the difference is smaller
    /// than `tie_epsilon`. Otherwise the run whose mean is better in the
    /// metric's direction wins.
    pub fn winner(&self, is_significant: bool, difference: f64, higher_is_better: bool) -> Winner {
        if !is_significant || difference.abs() < self.tie_epsilon {
            return Winner::Tie;
        }

        let challenger_ahead = if higher_is_better {
            difference > 0.0
        } else {
            difference < 0.0
        };

        if challenger_ahead {
            Winner::Challenger
        } else {
            Winner::Baseline
        }
    }
}

/// Classify a p-value with the default cut-offs
pub fn significance(p: f64) -> SignificanceResult {
    ComparisonPolicy::default().significance(p)
}

/// Decide the winner with the default cut-offs
pub fn decide_winner(is_significant: bool, difference: f64, higher_is_better: bool) -> Winner {
    ComparisonPolicy::default().winner(is_significant, difference, higher_is_better)
}
