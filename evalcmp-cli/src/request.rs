//! Comparison Request
//!
//! Loads the metrics to compare from a JSON file and selects the subset to run.
//!
//! Input shape:
//!
//! ```json
//! {
//!   "labels": { "baseline": "gpt-base", "challenger": "gpt-ft" },
//!   "metrics": [
//!     { "name": "accuracy", "baseline": [0.7, 0.71], "challenger": [0.8, 0.79] },
//!     { "name": "latency_ms", "baseline": [120, 118], "challenger": [98, 101], "higherIsBetter": false }
//!   ]
//! }
//! ```
//!
//! Selection keeps input order so reports line up with the source file.

use anyhow::Context;
use evalcmp_stats::MetricInput;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Metrics to compare plus optional run names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRequest {
    /// Run display names (overrides config, overridden by CLI flags)
    #[serde(default)]
    pub labels: Option<RequestLabels>,
    /// Metrics in report order
    pub metrics: Vec<MetricInput>,
}

/// Run names given inside a request file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RequestLabels {
    /// Baseline run name
    pub baseline: Option<String>,
    /// Challenger run name
    pub challenger: Option<String>,
}

impl ComparisonRequest {
    /// Read and parse a request file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse a request from JSON text, rejecting duplicate metric names
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let request: Self = serde_json::from_str(content)?;

        let mut seen = HashSet::new();
        for metric in &request.metrics {
            if !seen.insert(metric.name.as_str()) {
                anyhow::bail!("Duplicate metric name: {}", metric.name);
            }
        }

        Ok(request)
    }

    /// Metrics whose name matches `filter`, in input order
    pub fn select(&self, filter: Option<&Regex>) -> Vec<MetricInput> {
        self.metrics
            .iter()
            .filter(|m| filter.is_none_or(|re| re.is_match(&m.name)))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUEST: &str = r#"{
        "labels": { "challenger": "fine-tuned" },
        "metrics": [
            { "name": "accuracy", "baseline": [0.7, 0.71], "challenger": [0.8, 0.79] },
            { "name": "latency_ms", "baseline": [120, 118], "challenger": [98, 101], "higherIsBetter": false },
            { "name": "accuracy_top5", "baseline": [0.9], "challenger": [0.92] }
        ]
    }"#;

    #[test]
    fn test_parse_request() {
        let request = ComparisonRequest::parse(REQUEST).unwrap();
        assert_eq!(request.metrics.len(), 3);
        assert!(request.metrics[0].higher_is_better);
        assert!(!request.metrics[1].higher_is_better);

        let labels = request.labels.unwrap();
        assert_eq!(labels.baseline, None);
        assert_eq!(labels.challenger.as_deref(), Some("fine-tuned"));
    }

    #[test]
    fn test_select_by_regex() {
        let request = ComparisonRequest::parse(REQUEST).unwrap();
        let re = Regex::new("^accuracy").unwrap();
        let names: Vec<_> = request
            .select(Some(&re))
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["accuracy", "accuracy_top5"]);
    }

    #[test]
    fn test_select_all_keeps_order() {
        let request = ComparisonRequest::parse(REQUEST).unwrap();
        let names: Vec<_> = request.select(None).into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["accuracy", "latency_ms", "accuracy_top5"]);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let json = r#"{ "metrics": [
            { "name": "f1", "baseline": [], "challenger": [] },
            { "name": "f1", "baseline": [], "challenger": [] }
        ] }"#;
        let err = ComparisonRequest::parse(json).unwrap_err();
        assert!(err.to_string().contains("Duplicate metric name: f1"));
    }
}
