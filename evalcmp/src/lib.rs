#![warn(missing_docs)]
//! # evalcmp
//!
//! Reproducible statistical comparison of two evaluation runs.
//!
//! Given per-sample scores for a baseline and a challenger on one or more
//! metrics, evalcmp answers "did the challenger really change anything?":
//! - **Descriptive Statistics**: mean and Bessel-corrected standard deviation per run
//! - **Effect Size**: Cohen's d with pooled standard deviation and a four-level label
//! - **Significance**: Welch's t-test with Welch–Satterthwaite degrees of freedom,
//!   exact Student-t p-values through the regularized incomplete beta function
//! - **Verdicts**: challenger, baseline or tie under a configurable [`ComparisonPolicy`]
//! - **Reports**: JSON, Markdown, CSV and terminal output
//!
//! ## Quick Start
//!
//! ```
//! use evalcmp::prelude::*;
//!
//! let baseline = [0.70, 0.72, 0.68, 0.71, 0.69];
//! let challenger = [0.80, 0.82, 0.78, 0.81, 0.79];
//!
//! let cmp = compare_metrics(&baseline, &challenger, "accuracy", true).unwrap();
//! assert_eq!(cmp.winner, Winner::Challenger);
//! assert!(cmp.is_significant);
//! ```
//!
//! ## Reports
//!
//! ```
//! use evalcmp::prelude::*;
//!
//! let inputs = vec![
//!     MetricInput::new("accuracy", vec![0.70, 0.72, 0.68], vec![0.80, 0.82, 0.78]),
//!     MetricInput::new("latency_ms", vec![120.0, 118.0, 121.0], vec![98.0, 101.0, 99.0])
//!         .lower_is_better(),
//! ];
//! let policy = ComparisonPolicy::default();
//! let comparisons = compare_all(&inputs, &policy).unwrap();
//! let report = Report::new(comparisons, RunLabels::default(), policy);
//!
//! let markdown = render(&report, OutputFormat::Markdown, 3).unwrap();
//! assert!(markdown.contains("| accuracy |"));
//! ```

// Re-export the statistical engine
pub use evalcmp_stats::*;

// Re-export reporting
pub use evalcmp_report::{
    OutputFormat, Report, ReportMeta, RunLabels, SCHEMA_VERSION, format_human_output,
    generate_csv_report, generate_json_report, generate_markdown_report, parse_json_report,
    render,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        ComparisonPolicy, ComparisonSummary, EffectSize, MetricComparison, MetricInput,
        OutputFormat, Report, RunLabels, StatsError, Winner, compare_all, compare_metrics,
        render,
    };
}

/// Run the evalcmp command-line interface.
///
/// Call this from a binary's `main()`:
/// ```ignore
/// fn main() {
///     evalcmp::run().unwrap();
/// }
/// ```
pub use evalcmp_cli::run;
