//! JSON Output

use crate::report::Report;

/// Generate a prettified JSON report.
///
/// Field names are camelCase so dashboards can consume the records directly.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Parse a report previously written by [`generate_json_report`]
pub fn parse_json_report(json: &str) -> Result<Report, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::sample_report;

    #[test]
    fn test_json_shape() {
        let json = generate_json_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["meta"]["schemaVersion"], 1);
        assert_eq!(value["comparisons"][0]["metricName"], "accuracy");
        assert_eq!(value["comparisons"][0]["winner"], "challenger");
        assert_eq!(value["comparisons"][2]["winner"], "tie");
        assert_eq!(value["summary"]["challengerWins"], 2);
    }

    #[test]
    fn test_json_reads_back() {
        let report = sample_report();
        let json = generate_json_report(&report).unwrap();
        let parsed = parse_json_report(&json).unwrap();
        assert_eq!(parsed.comparisons.len(), report.comparisons.len());
        assert_eq!(parsed.summary, report.summary);
        assert_eq!(parsed.meta.timestamp, report.meta.timestamp);
    }
}
