//! Configuration loading from evalcmp.toml
//!
//! evalcmp configuration can be specified in an `evalcmp.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.

use anyhow::Context;
use evalcmp_stats::{ComparisonPolicy, CriticalValue, DEFAULT_CONFIDENCE_LEVEL};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up during discovery
pub const CONFIG_FILE_NAME: &str = "evalcmp.toml";

/// evalcmp configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EvalcmpConfig {
    /// Decision policy configuration
    #[serde(default)]
    pub policy: PolicyConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Decision policy: significance cut-offs, tie threshold and intervals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// p-value below which a result is significant
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// p-value cut-off for `**`
    #[serde(default = "default_strong_alpha")]
    pub strong_alpha: f64,
    /// p-value cut-off for `***`
    #[serde(default = "default_very_strong_alpha")]
    pub very_strong_alpha: f64,
    /// Minimum absolute mean difference for a non-tie verdict
    #[serde(default = "default_tie_epsilon")]
    pub tie_epsilon: f64,
    /// Confidence level for per-run intervals (e.g., 0.95 for 95%)
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,
    /// Critical value method: "table" or "quantile"
    #[serde(default)]
    pub critical_value: CriticalValue,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            strong_alpha: default_strong_alpha(),
            very_strong_alpha: default_very_strong_alpha(),
            tie_epsilon: default_tie_epsilon(),
            confidence_level: default_confidence_level(),
            critical_value: CriticalValue::default(),
        }
    }
}

fn default_alpha() -> f64 {
    ComparisonPolicy::default().alpha
}
fn default_strong_alpha() -> f64 {
    ComparisonPolicy::default().strong_alpha
}
fn default_very_strong_alpha() -> f64 {
    ComparisonPolicy::default().very_strong_alpha
}
fn default_tie_epsilon() -> f64 {
    ComparisonPolicy::default().tie_epsilon
}
fn default_confidence_level() -> f64 {
    DEFAULT_CONFIDENCE_LEVEL
}

impl PolicyConfig {
    /// Engine policy described by this configuration
    pub fn comparison_policy(&self) -> ComparisonPolicy {
        ComparisonPolicy {
            alpha: self.alpha,
            strong_alpha: self.strong_alpha,
            very_strong_alpha: self.very_strong_alpha,
            tie_epsilon: self.tie_epsilon,
        }
    }

    /// Check that cut-offs are ordered and within range
    pub fn validate(&self) -> anyhow::Result<()> {
        let in_unit = |v: f64| v > 0.0 && v < 1.0;
        if !(in_unit(self.alpha) && in_unit(self.strong_alpha) && in_unit(self.very_strong_alpha))
        {
            anyhow::bail!("Significance levels must lie strictly between 0 and 1");
        }
        if !(self.very_strong_alpha <= self.strong_alpha && self.strong_alpha <= self.alpha) {
            anyhow::bail!(
                "Significance levels must satisfy very_strong_alpha <= strong_alpha <= alpha"
            );
        }
        if !(self.tie_epsilon >= 0.0 && self.tie_epsilon.is_finite()) {
            anyhow::bail!("tie_epsilon must be a non-negative number");
        }
        if !in_unit(self.confidence_level) {
            anyhow::bail!(
                "Invalid confidence level: {} (must be between 0 and 1)",
                self.confidence_level
            );
        }
        Ok(())
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human", "json", "markdown", "csv"
    #[serde(default = "default_format")]
    pub format: String,
    /// Decimal places for scores in human and Markdown output
    #[serde(default = "default_precision")]
    pub precision: usize,
    /// Display name of the baseline run
    #[serde(default = "default_baseline_label")]
    pub baseline_label: String,
    /// Display name of the challenger run
    #[serde(default = "default_challenger_label")]
    pub challenger_label: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            precision: default_precision(),
            baseline_label: default_baseline_label(),
            challenger_label: default_challenger_label(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}
fn default_precision() -> usize {
    3
}
fn default_baseline_label() -> String {
    "baseline".to_string()
}
fn default_challenger_label() -> String {
    "challenger".to_string()
}

impl EvalcmpConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.policy.validate()?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => {
                        tracing::debug!(path = %config_path.display(), "Loaded configuration");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!("Ignoring {}: {:#}", config_path.display(), e);
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# evalcmp Configuration

[policy]
# p-value below which a difference is significant (*)
alpha = 0.05
# p-value cut-off for **
strong_alpha = 0.01
# p-value cut-off for ***
very_strong_alpha = 0.001
# Absolute mean difference below which a significant result is still a tie
tie_epsilon = 0.001
# Confidence level for per-run intervals (0.0 to 1.0)
confidence_level = 0.95
# Critical value method: "table" (1.96 / 2.576 / 1.645) or "quantile"
critical_value = "table"

[output]
# Default output format: human, json, markdown, csv
format = "human"
# Decimal places for scores in human and markdown output
precision = 3
# Display names of the two runs
baseline_label = "baseline"
challenger_label = "challenger"
"#
        .to_string()
    }
}
