//! Report Data Structures

use chrono::{DateTime, Utc};
use evalcmp_stats::{ComparisonPolicy, ComparisonSummary, MetricComparison};
use serde::{Deserialize, Serialize};

/// Current report schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Complete comparison report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Run metadata
    pub meta: ReportMeta,
    /// One record per metric, in input order
    pub comparisons: Vec<MetricComparison>,
    /// Verdict tally over `comparisons`
    pub summary: ComparisonSummary,
}

/// Report metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMeta {
    /// Report schema version
    pub schema_version: u32,
    /// evalcmp version that produced the report
    pub version: String,
    /// Generation time
    pub timestamp: DateTime<Utc>,
    /// Run display names
    pub labels: RunLabels,
    /// Policy the verdicts were computed with
    pub policy: ComparisonPolicy,
}

/// Display names for the two runs being compared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunLabels {
    /// Name shown for the baseline run
    pub baseline: String,
    /// Name shown for the challenger run
    pub challenger: String,
}

impl Default for RunLabels {
    fn default() -> Self {
        Self {
            baseline: "baseline".to_string(),
            challenger: "challenger".to_string(),
        }
    }
}

impl Report {
    /// Build a report from finished comparisons, stamped with the current time
    pub fn new(
        comparisons: Vec<MetricComparison>,
        labels: RunLabels,
        policy: ComparisonPolicy,
    ) -> Self {
        Self::with_timestamp(comparisons, labels, policy, Utc::now())
    }

    /// Build a report with an explicit timestamp (for reproducible output)
    pub fn with_timestamp(
        comparisons: Vec<MetricComparison>,
        labels: RunLabels,
        policy: ComparisonPolicy,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let summary = ComparisonSummary::from_comparisons(&comparisons);
        Self {
            meta: ReportMeta {
                schema_version: SCHEMA_VERSION,
                version: env!("CARGO_PKG_VERSION").to_string(),
                timestamp,
                labels,
                policy,
            },
            comparisons,
            summary,
        }
    }
}

/// Format a score with fixed precision, dropping the sign of negative zero
pub(crate) fn format_score(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*}", precision, value);
    if formatted.starts_with('-') && formatted[1..].chars().all(|c| c == '0' || c == '.') {
        formatted[1..].to_string()
    } else {
        formatted
    }
}

/// Format a percentage change with an explicit sign
pub(crate) fn format_percent(value: f64) -> String {
    let formatted = format_score(value, 1);
    if value > 0.0 && formatted != "0.0" {
        format!("+{}%", formatted)
    } else {
        format!("{}%", formatted)
    }
}
