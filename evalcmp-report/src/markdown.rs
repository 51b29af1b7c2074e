//! Markdown Output
//!
//! A summary table suitable for pull-request comments and
//! `$GITHUB_STEP_SUMMARY`.

use crate::report::{Report, format_percent, format_score};
use evalcmp_stats::Winner;

/// Generate a Markdown summary of the report
pub fn generate_markdown_report(report: &Report, precision: usize) -> String {
    let labels = &report.meta.labels;
    let mut output = String::new();

    output.push_str(&format!(
        "## {} vs {}\n\n",
        labels.challenger, labels.baseline
    ));

    if report.comparisons.is_empty() {
        output.push_str("_No metrics compared._\n");
        return output;
    }

    output.push_str(&format!(
        "| Metric | {} | {} | Δ | Δ% | Cohen's d | p | Winner |\n",
        escape_cell(&labels.baseline),
        escape_cell(&labels.challenger)
    ));
    output.push_str("|---|---:|---:|---:|---:|---:|---|---|\n");

    for cmp in &report.comparisons {
        let winner = match cmp.winner {
            Winner::Challenger => format!("**{}**", escape_cell(&labels.challenger)),
            Winner::Baseline => format!("**{}**", escape_cell(&labels.baseline)),
            Winner::Tie => "tie".to_string(),
        };

        output.push_str(&format!(
            "| {} | {} ± {} | {} ± {} | {} | {} | {} ({}) | {}{} | {} |\n",
            escape_cell(&cmp.metric_name),
            format_score(cmp.baseline_mean, precision),
            format_score(cmp.baseline_std, precision),
            format_score(cmp.challenger_mean, precision),
            format_score(cmp.challenger_std, precision),
            format_score(cmp.difference, precision),
            format_percent(cmp.percent_change),
            format_score(cmp.cohen_d, 2),
            cmp.effect_size,
            cmp.significance_level,
            cmp.stars,
            winner,
        ));
    }

    let summary = &report.summary;
    output.push_str(&format!(
        "\n**{}** wins {}, **{}** wins {}, {} tied ({} of {} significant at p < {}).\n",
        labels.challenger,
        summary.challenger_wins,
        labels.baseline,
        summary.baseline_wins,
        summary.ties,
        summary.significant,
        summary.total,
        report.meta.policy.alpha,
    ));

    output
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::sample_report;

    #[test]
    fn test_markdown_table() {
        let markdown = generate_markdown_report(&sample_report(), 3);

        assert!(markdown.starts_with("## challenger vs baseline\n"));
        assert!(markdown.contains("| Metric | baseline | challenger |"));
        assert!(markdown.contains("| accuracy | 0.700 ± 0.020 | 0.800 ± 0.020 | 0.100 | +14.3% |"));
        assert!(markdown.contains("p < 0.001*** | **challenger** |"));
        assert!(markdown.contains("| f1 |"));
        assert!(markdown.contains("| tie |"));
        assert!(markdown.contains("**challenger** wins 2, **baseline** wins 0, 1 tied"));
    }

    #[test]
    fn test_markdown_empty() {
        let mut report = sample_report();
        report.comparisons.clear();
        let markdown = generate_markdown_report(&report, 3);
        assert!(markdown.contains("_No metrics compared._"));
    }

    #[test]
    fn test_escape_pipes() {
        assert_eq!(escape_cell("a|b"), "a\\|b");
    }
}
