//! Terminal Output
//!
//! Human-readable summary with one block per metric:
//! - Verdict icon (▲ challenger, ▼ baseline, = tie)
//! - Means ± standard deviation and sample counts for both runs
//! - Difference, percent change, effect size and significance

use crate::report::{Report, format_percent, format_score};
use evalcmp_stats::Winner;

/// Format a report for human-readable terminal display
pub fn format_human_output(report: &Report, precision: usize) -> String {
    let labels = &report.meta.labels;
    let mut output = String::new();

    output.push('\n');
    output.push_str(&format!(
        "evalcmp: {} vs {}\n",
        labels.challenger, labels.baseline
    ));
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    for cmp in &report.comparisons {
        let icon = match cmp.winner {
            Winner::Challenger => "▲",
            Winner::Baseline => "▼",
            Winner::Tie => "=",
        };
        let verdict = match cmp.winner {
            Winner::Challenger => labels.challenger.as_str(),
            Winner::Baseline => labels.baseline.as_str(),
            Winner::Tie => "tie",
        };

        output.push_str(&format!("  {} {}  [{}]\n", icon, cmp.metric_name, verdict));
        output.push_str(&format!(
            "      {}: {} ± {}  (n={})\n",
            labels.baseline,
            format_score(cmp.baseline_mean, precision),
            format_score(cmp.baseline_std, precision),
            cmp.baseline_n
        ));
        output.push_str(&format!(
            "      {}: {} ± {}  (n={})\n",
            labels.challenger,
            format_score(cmp.challenger_mean, precision),
            format_score(cmp.challenger_std, precision),
            cmp.challenger_n
        ));
        output.push_str(&format!(
            "      diff: {} ({})  d: {} ({})\n",
            format_score(cmp.difference, precision),
            format_percent(cmp.percent_change),
            format_score(cmp.cohen_d, 2),
            cmp.effect_size
        ));
        output.push_str(&format!(
            "      t: {}  {} {}\n",
            format_score(cmp.t_statistic, 3),
            cmp.significance_level,
            cmp.stars
        ));
        output.push('\n');
    }

    let summary = &report.summary;
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "Summary: {} metrics, {} {} wins, {} {} wins, {} ties ({} significant)\n",
        summary.total,
        summary.challenger_wins,
        labels.challenger,
        summary.baseline_wins,
        labels.baseline,
        summary.ties,
        summary.significant
    ));
    output.push_str(&format!("Overall: {}\n", summary.overall()));

    output
}
