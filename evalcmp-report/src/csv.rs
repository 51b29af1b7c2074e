//! CSV Output

use crate::report::Report;

const HEADER: &str = "metric,baseline_mean,baseline_std,baseline_n,challenger_mean,challenger_std,challenger_n,difference,percent_change,cohen_d,effect_size,t_statistic,p_value,significance_level,stars,is_significant,winner";

/// Generate one CSV row per metric comparison (full precision)
pub fn generate_csv_report(report: &Report) -> String {
    let mut output = String::from(HEADER);
    output.push('\n');

    for cmp in &report.comparisons {
        let row = [
            escape_field(&cmp.metric_name),
            cmp.baseline_mean.to_string(),
            cmp.baseline_std.to_string(),
            cmp.baseline_n.to_string(),
            cmp.challenger_mean.to_string(),
            cmp.challenger_std.to_string(),
            cmp.challenger_n.to_string(),
            cmp.difference.to_string(),
            cmp.percent_change.to_string(),
            cmp.cohen_d.to_string(),
            cmp.effect_size.to_string(),
            cmp.t_statistic.to_string(),
            cmp.p_value.to_string(),
            escape_field(&cmp.significance_level),
            cmp.stars.clone(),
            cmp.is_significant.to_string(),
            cmp.winner.to_string(),
        ];
        output.push_str(&row.join(","));
        output.push('\n');
    }

    output
}

/// Quote a field when it contains a delimiter, quote or newline
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
