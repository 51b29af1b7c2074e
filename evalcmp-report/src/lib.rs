#![warn(missing_docs)]
//! evalcmp Report - Rendering of comparison results
//!
//! Generates various output formats:
//! - JSON (machine-readable, camelCase records for dashboards)
//! - Markdown (summary table for pull requests and CI summaries)
//! - CSV (spreadsheet-compatible)
//! - Human (terminal)

mod csv;
mod human;
mod json;
mod markdown;
mod report;

pub use csv::generate_csv_report;
pub use human::format_human_output;
pub use json::{generate_json_report, parse_json_report};
pub use markdown::generate_markdown_report;
pub use report::{Report, ReportMeta, RunLabels, SCHEMA_VERSION};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON with full schema
    Json,
    /// Markdown summary table
    Markdown,
    /// CSV for spreadsheets
    Csv,
    /// Human-readable terminal output
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" | "github" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Render a report in the requested format
///
/// `precision` is the number of decimals used for scores in the Markdown and
/// human formats; JSON and CSV always carry full precision.
pub fn render(
    report: &Report,
    format: OutputFormat,
    precision: usize,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => generate_json_report(report),
        OutputFormat::Markdown => Ok(generate_markdown_report(report, precision)),
        OutputFormat::Csv => Ok(generate_csv_report(report)),
        OutputFormat::Human => Ok(format_human_output(report, precision)),
    }
}
