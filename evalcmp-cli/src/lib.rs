#![warn(missing_docs)]
//! evalcmp CLI Library
//!
//! Command-line front end for the comparison engine. Reads a JSON request
//! listing baseline and challenger scores per metric, runs every comparison
//! and renders the report in the requested format.
//!
//! # Example
//!
//! ```ignore
//! fn main() {
//!     if let Err(e) = evalcmp_cli::run() {
//!         eprintln!("Error: {e:#}");
//!         std::process::exit(1);
//!     }
//! }
//! ```

mod config;
mod request;

pub use config::*;
pub use request::{ComparisonRequest, RequestLabels};

use clap::{Parser, Subcommand};
use evalcmp_report::{OutputFormat, Report, RunLabels, render};
use evalcmp_stats::{
    ComparisonPolicy, CriticalValue, MetricInput, Winner, compare_all, confidence_interval_with,
    describe,
};
use regex::Regex;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// evalcmp CLI arguments
#[derive(Parser, Debug)]
#[command(name = "evalcmp")]
#[command(
    author,
    version,
    about = "evalcmp - statistical comparison of evaluation runs"
)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Only compare metrics whose name matches this regex
    #[arg(long, global = true)]
    pub filter: Option<String>,

    /// Output format: human, json, markdown, csv (default from evalcmp.toml)
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Decimal places for scores in human and markdown output
    #[arg(long, global = true)]
    pub precision: Option<usize>,

    /// Display name of the baseline run
    #[arg(long, global = true)]
    pub baseline_label: Option<String>,

    /// Display name of the challenger run
    #[arg(long, global = true)]
    pub challenger_label: Option<String>,

    /// Confidence level for `summarize` intervals (e.g. 0.99)
    #[arg(long, global = true)]
    pub confidence_level: Option<f64>,

    /// Configuration file (defaults to the nearest evalcmp.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Exit with an error when the baseline wins any metric
    #[arg(long, global = true)]
    pub fail_on_regression: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare challenger against baseline for every metric in a request file
    Compare {
        /// JSON request file
        #[arg(name = "INPUT")]
        input: PathBuf,
    },
    /// Show per-run descriptive statistics and confidence intervals
    Summarize {
        /// JSON request file
        #[arg(name = "INPUT")]
        input: PathBuf,
    },
    /// Write a default evalcmp.toml to the current directory
    Init {
        /// Overwrite an existing evalcmp.toml
        #[arg(long)]
        force: bool,
    },
}

/// Effective settings after layering evalcmp.toml, the request file and CLI flags
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Decision policy
    pub policy: ComparisonPolicy,
    /// Run display names
    pub labels: RunLabels,
    /// Output format
    pub format: OutputFormat,
    /// Decimal places for scores
    pub precision: usize,
    /// Confidence level for intervals
    pub confidence_level: f64,
    /// Critical value method for intervals
    pub critical_value: CriticalValue,
}

impl Settings {
    /// Resolve settings: CLI flags win, then the request file, then evalcmp.toml
    pub fn resolve(
        cli: &Cli,
        config: &EvalcmpConfig,
        request_labels: Option<&RequestLabels>,
    ) -> anyhow::Result<Self> {
        let format_str = cli.format.as_deref().unwrap_or(&config.output.format);
        let format: OutputFormat = format_str.parse().map_err(anyhow::Error::msg)?;

        let confidence_level = cli
            .confidence_level
            .unwrap_or(config.policy.confidence_level);
        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            anyhow::bail!(
                "Invalid confidence level: {} (must be between 0 and 1)",
                confidence_level
            );
        }

        let baseline = cli
            .baseline_label
            .clone()
            .or_else(|| request_labels.and_then(|l| l.baseline.clone()))
            .unwrap_or_else(|| config.output.baseline_label.clone());
        let challenger = cli
            .challenger_label
            .clone()
            .or_else(|| request_labels.and_then(|l| l.challenger.clone()))
            .unwrap_or_else(|| config.output.challenger_label.clone());

        Ok(Self {
            policy: config.policy.comparison_policy(),
            labels: RunLabels {
                baseline,
                challenger,
            },
            format,
            precision: cli.precision.unwrap_or(config.output.precision),
            confidence_level,
            critical_value: config.policy.critical_value,
        })
    }
}

/// Run the evalcmp CLI with the process arguments.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if something goes wrong.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the evalcmp CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Logs go to stderr so report output on stdout stays machine-readable
    let filter = if cli.verbose {
        "evalcmp=debug"
    } else {
        "evalcmp=info"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = match cli.config {
        Some(ref path) => EvalcmpConfig::load(path)?,
        None => EvalcmpConfig::discover().unwrap_or_default(),
    };

    match cli.command {
        Commands::Compare { ref input } => run_compare(&cli, &config, input),
        Commands::Summarize { ref input } => run_summarize(&cli, &config, input),
        Commands::Init { force } => init_config(Path::new(CONFIG_FILE_NAME), force),
    }
}

fn load_selection(
    cli: &Cli,
    input: &Path,
) -> anyhow::Result<(ComparisonRequest, Vec<MetricInput>)> {
    let request = ComparisonRequest::load(input)?;
    let filter = cli.filter.as_deref().map(Regex::new).transpose()?;
    let selected = request.select(filter.as_ref());

    if selected.is_empty() {
        tracing::warn!(
            input = %input.display(),
            total = request.metrics.len(),
            "No metrics selected"
        );
    }

    Ok((request, selected))
}

fn run_compare(cli: &Cli, config: &EvalcmpConfig, input: &Path) -> anyhow::Result<()> {
    let (request, selected) = load_selection(cli, input)?;
    let settings = Settings::resolve(cli, config, request.labels.as_ref())?;

    let start = Instant::now();
    let report = build_report(&selected, &settings)?;
    tracing::info!(
        metrics = report.summary.total,
        significant = report.summary.significant,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Comparison complete"
    );

    let output = render(&report, settings.format, settings.precision)?;
    write_output(cli.output.as_deref(), &output)?;

    if cli.fail_on_regression {
        check_regressions(&report)?;
    }

    Ok(())
}

/// Compare the selected metrics and wrap the results in a report
pub fn build_report(metrics: &[MetricInput], settings: &Settings) -> anyhow::Result<Report> {
    let comparisons = compare_all(metrics, &settings.policy)?;
    Ok(Report::new(comparisons, settings.labels.clone(), settings.policy))
}

/// Fail when the baseline wins any metric
pub fn check_regressions(report: &Report) -> anyhow::Result<()> {
    let regressed: Vec<&str> = report
        .comparisons
        .iter()
        .filter(|c| c.winner == Winner::Baseline)
        .map(|c| c.metric_name.as_str())
        .collect();

    if regressed.is_empty() {
        Ok(())
    } else {
        anyhow::bail!(
            "{} metric(s) regressed against {}: {}",
            regressed.len(),
            report.meta.labels.baseline,
            regressed.join(", ")
        )
    }
}

fn run_summarize(cli: &Cli, config: &EvalcmpConfig, input: &Path) -> anyhow::Result<()> {
    let (request, selected) = load_selection(cli, input)?;
    let settings = Settings::resolve(cli, config, request.labels.as_ref())?;
    let output = format_intervals(&selected, &settings)?;
    write_output(cli.output.as_deref(), &output)
}

/// Per-run mean, standard deviation and confidence interval for each metric
pub fn format_intervals(metrics: &[MetricInput], settings: &Settings) -> anyhow::Result<String> {
    let precision = settings.precision;
    let level_pct = settings.confidence_level * 100.0;
    let mut output = String::new();

    for metric in metrics {
        output.push_str(&format!("{}\n", metric.name));
        let runs = [
            (&settings.labels.baseline, &metric.baseline),
            (&settings.labels.challenger, &metric.challenger),
        ];
        for (label, values) in runs {
            let stats = describe(values);
            let ci = confidence_interval_with(
                values,
                settings.confidence_level,
                settings.critical_value,
            )?;
            output.push_str(&format!(
                "  {}: {:.*} ± {:.*}  (n={})  {}% CI [{:.*}, {:.*}]\n",
                label,
                precision,
                stats.mean,
                precision,
                stats.std_dev,
                stats.n,
                level_pct,
                precision,
                ci.lower,
                precision,
                ci.upper
            ));
        }
    }

    Ok(output)
}

fn write_output(path: Option<&Path>, output: &str) -> anyhow::Result<()> {
    if let Some(path) = path {
        let mut file = std::fs::File::create(path)?;
        file.write_all(output.as_bytes())?;
        println!("Report written to: {}", path.display());
    } else {
        print!("{}", output);
    }
    Ok(())
}

/// Write the default configuration to `path`
pub fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    std::fs::write(path, EvalcmpConfig::default_toml())?;
    println!("Created {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("evalcmp").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_parsing() {
        let cli = parse(&["compare", "runs.json", "--format", "json", "--filter", "^acc"]);
        assert!(matches!(cli.command, Commands::Compare { ref input } if input == Path::new("runs.json")));
        assert_eq!(cli.format.as_deref(), Some("json"));
        assert_eq!(cli.filter.as_deref(), Some("^acc"));
        assert!(!cli.fail_on_regression);
    }

    #[test]
    fn test_settings_precedence() {
        let cli = parse(&["compare", "runs.json", "--baseline-label", "main"]);
        let mut config = EvalcmpConfig::default();
        config.output.format = "csv".to_string();
        config.output.challenger_label = "from-config".to_string();
        let request_labels = RequestLabels {
            baseline: Some("from-request".to_string()),
            challenger: Some("feature".to_string()),
        };

        let settings = Settings::resolve(&cli, &config, Some(&request_labels)).unwrap();
        assert_eq!(settings.labels.baseline, "main");
        assert_eq!(settings.labels.challenger, "feature");
        assert_eq!(settings.format, OutputFormat::Csv);
        assert_eq!(settings.precision, 3);
        assert_eq!(settings.policy, ComparisonPolicy::default());
    }

    #[test]
    fn test_settings_reject_unknown_format() {
        let cli = parse(&["compare", "runs.json", "--format", "html"]);
        assert!(Settings::resolve(&cli, &EvalcmpConfig::default(), None).is_err());
    }

    #[test]
    fn test_settings_reject_bad_confidence_level() {
        let cli = parse(&["summarize", "runs.json", "--confidence-level", "95"]);
        assert!(Settings::resolve(&cli, &EvalcmpConfig::default(), None).is_err());
    }

    fn default_settings() -> Settings {
        let cli = parse(&["compare", "runs.json"]);
        Settings::resolve(&cli, &EvalcmpConfig::default(), None).unwrap()
    }

    #[test]
    fn test_build_report_and_regressions() {
        let metrics = vec![
            MetricInput::new(
                "accuracy",
                vec![0.80, 0.82, 0.78, 0.81],
                vec![0.70, 0.72, 0.68, 0.71],
            ),
            MetricInput::new("f1", vec![0.6, 0.62, 0.58], vec![0.61, 0.59, 0.6]),
        ];
        let report = build_report(&metrics, &default_settings()).unwrap();
        assert_eq!(report.comparisons[0].winner, Winner::Baseline);
        assert_eq!(report.comparisons[1].winner, Winner::Tie);

        let err = check_regressions(&report).unwrap_err();
        assert_eq!(
            err.to_string(),
            "1 metric(s) regressed against baseline: accuracy"
        );
    }

    #[test]
    fn test_build_report_rejects_nan() {
        let metrics = vec![MetricInput::new("broken", vec![0.5, f64::NAN], vec![0.5])];
        assert!(build_report(&metrics, &default_settings()).is_err());
    }

    #[test]
    fn test_format_intervals() {
        let metrics = vec![MetricInput::new(
            "accuracy",
            vec![0.5, 0.5, 0.5],
            vec![0.9],
        )];
        let output = format_intervals(&metrics, &default_settings()).unwrap();
        assert_eq!(
            output,
            "accuracy\n  \
             baseline: 0.500 ± 0.000  (n=3)  95% CI [0.500, 0.500]\n  \
             challenger: 0.900 ± 0.000  (n=1)  95% CI [0.900, 0.900]\n"
        );
    }
}
