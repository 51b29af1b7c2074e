//! Baseline vs Challenger Comparison
//!
//! Composes descriptive statistics, Cohen's d and Welch's t-test into one
//! [`MetricComparison`] record and applies the winner policy.
//!
//! Effect size and the winner are independent: the verdict depends only on
//! significance and the raw mean difference, so a zero-variance pair can show
//! `cohen_d = 0` next to any winner.

use crate::descriptive::describe;
use crate::effect::{EffectSize, cohen_d_unchecked, interpret_effect_size};
use crate::error::{StatsError, validate_samples};
use crate::policy::{ComparisonPolicy, Winner};
use crate::ttest::welch_t_test_unchecked;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Result of comparing a challenger run against a baseline run on one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricComparison {
    /// Metric identifier as supplied by the caller
    pub metric_name: String,
    /// Mean of the baseline scores
    pub baseline_mean: f64,
    /// Sample standard deviation of the baseline scores
    pub baseline_std: f64,
    /// Number of baseline scores
    pub baseline_n: usize,
    /// Mean of the challenger scores
    pub challenger_mean: f64,
    /// Sample standard deviation of the challenger scores
    pub challenger_std: f64,
    /// Number of challenger scores
    pub challenger_n: usize,
    /// `challenger_mean - baseline_mean`
    pub difference: f64,
    /// Difference relative to the baseline mean in percent (0 when the baseline mean is 0)
    pub percent_change: f64,
    /// Cohen's d of challenger against baseline (positive = challenger ahead)
    pub cohen_d: f64,
    /// Magnitude label for `cohen_d`
    pub effect_size: EffectSize,
    /// Welch t statistic of challenger against baseline
    pub t_statistic: f64,
    /// Two-tailed p-value
    pub p_value: f64,
    /// Significance bucket, e.g. `p < 0.01` or `p = 0.214`
    pub significance_level: String,
    /// `***`, `**`, `*` or empty
    pub stars: String,
    /// Whether `p_value` is below the policy alpha
    pub is_significant: bool,
    /// Verdict for this metric
    pub winner: Winner,
}

/// One metric to compare, as accepted by [`compare_all`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricInput {
    /// Metric identifier
    pub name: String,
    /// Baseline scores
    pub baseline: Vec<f64>,
    /// Challenger scores
    pub challenger: Vec<f64>,
    /// Whether larger scores are better (default: true)
    #[serde(default = "default_higher_is_better")]
    pub higher_is_better: bool,
}

fn default_higher_is_better() -> bool {
    true
}

impl MetricInput {
    /// Create an input where higher scores are better
    pub fn new(name: impl Into<String>, baseline: Vec<f64>, challenger: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            baseline,
            challenger,
            higher_is_better: true,
        }
    }

    /// Mark the metric as lower-is-better (e.g. latency, error rate)
    pub fn lower_is_better(mut self) -> Self {
        self.higher_is_better = false;
        self
    }
}

/// Compare two groups of scores with the default policy
pub fn compare_metrics(
    baseline: &[f64],
    challenger: &[f64],
    metric_name: &str,
    higher_is_better: bool,
) -> Result<MetricComparison, StatsError> {
    compare_metrics_with(
        baseline,
        challenger,
        metric_name,
        higher_is_better,
        &ComparisonPolicy::default(),
    )
}

/// Compare two groups of scores with an explicit policy
#[instrument(skip(baseline, challenger, policy), fields(baseline_n = baseline.len(), challenger_n = challenger.len()))]
pub fn compare_metrics_with(
    baseline: &[f64],
    challenger: &[f64],
    metric_name: &str,
    higher_is_better: bool,
    policy: &ComparisonPolicy,
) -> Result<MetricComparison, StatsError> {
    validate_samples("baseline", baseline)?;
    validate_samples("challenger", challenger)?;

    let baseline_stats = describe(baseline);
    let challenger_stats = describe(challenger);

    let difference = finite_or_zero(challenger_stats.mean - baseline_stats.mean);
    let percent_change = if baseline_stats.mean != 0.0 {
        finite_or_zero((difference / baseline_stats.mean) * 100.0)
    } else {
        0.0
    };

    // Challenger first: positive d and t mean the challenger scored higher
    let cohen_d = cohen_d_unchecked(challenger, baseline);
    let test = welch_t_test_unchecked(challenger, baseline);

    let significance = policy.significance(test.p);
    let winner = policy.winner(significance.is_significant, difference, higher_is_better);

    debug!(
        difference,
        cohen_d,
        p = test.p,
        winner = %winner,
        "Compared metric"
    );

    Ok(MetricComparison {
        metric_name: metric_name.to_string(),
        baseline_mean: baseline_stats.mean,
        baseline_std: baseline_stats.std_dev,
        baseline_n: baseline_stats.n,
        challenger_mean: challenger_stats.mean,
        challenger_std: challenger_stats.std_dev,
        challenger_n: challenger_stats.n,
        difference,
        percent_change,
        cohen_d,
        effect_size: interpret_effect_size(cohen_d),
        t_statistic: test.t,
        p_value: test.p,
        significance_level: significance.level,
        stars: significance.stars,
        is_significant: significance.is_significant,
        winner,
    })
}

/// Differences of means near `f64::MAX` overflow; report them as no change
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        debug!(value, "Non-finite difference replaced by 0");
        0.0
    }
}

/// Compare many metrics in parallel (Rayon)
///
/// Each metric is independent; results keep the order of `inputs`. Fails on
/// the first metric (in input order) with non-finite scores.
pub fn compare_all(
    inputs: &[MetricInput],
    policy: &ComparisonPolicy,
) -> Result<Vec<MetricComparison>, StatsError> {
    inputs
        .par_iter()
        .map(|input| {
            compare_metrics_with(
                &input.baseline,
                &input.challenger,
                &input.name,
                input.higher_is_better,
                policy,
            )
        })
        .collect()
}

/// Tally of verdicts over a set of comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    /// Number of metrics compared
    pub total: usize,
    /// Metrics won by the challenger
    pub challenger_wins: usize,
    /// Metrics won by the baseline
    pub baseline_wins: usize,
    /// Metrics with no winner
    pub ties: usize,
    /// Metrics with a significant difference, whatever the verdict
    pub significant: usize,
}

impl ComparisonSummary {
    /// Count verdicts in `comparisons`
    pub fn from_comparisons(comparisons: &[MetricComparison]) -> Self {
        comparisons
            .iter()
            .fold(Self::default(), |mut summary, comparison| {
                summary.total += 1;
                match comparison.winner {
                    Winner::Challenger => summary.challenger_wins += 1,
                    Winner::Baseline => summary.baseline_wins += 1,
                    Winner::Tie => summary.ties += 1,
                }
                if comparison.is_significant {
                    summary.significant += 1;
                }
                summary
            })
    }

    /// Overall verdict: the side with more metric wins, or a tie
    pub fn overall(&self) -> Winner {
        match self.challenger_wins.cmp(&self.baseline_wins) {
            std::cmp::Ordering::Greater => Winner::Challenger,
            std::cmp::Ordering::Less => Winner::Baseline,
            std::cmp::Ordering::Equal => Winner::Tie,
        }
    }
}
