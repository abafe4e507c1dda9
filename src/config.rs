use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level Kairos configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KairosConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Bias-correction settings.
    #[serde(default)]
    pub correction: CorrectionToml,

    /// Reordering-cost settings.
    #[serde(default)]
    pub cost: CostToml,
}

/// Reads and parses a configuration file.
pub fn load(path: &Path) -> Result<KairosConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    pub reference: Option<PathBuf>,
    pub model: Option<PathBuf>,
    pub output: Option<PathBuf>,
    #[serde(default = "default_value_column")]
    pub reference_column: String,
    #[serde(default = "default_value_column")]
    pub model_column: String,
    #[serde(default = "default_model_name")]
    pub model_name: String,
    #[serde(default = "default_location")]
    pub location: String,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            reference: None,
            model: None,
            output: None,
            reference_column: default_value_column(),
            model_column: default_value_column(),
            model_name: default_model_name(),
            location: default_location(),
        }
    }
}

fn default_value_column() -> String {
    "tas".to_string()
}
fn default_model_name() -> String {
    "model".to_string()
}
fn default_location() -> String {
    "location".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorrectionToml {
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default = "default_past_start")]
    pub past_start: String,
    #[serde(default = "default_past_end")]
    pub past_end: String,
    #[serde(default = "default_future_start")]
    pub future_start: String,
    #[serde(default = "default_future_end")]
    pub future_end: String,
}

impl Default for CorrectionToml {
    fn default() -> Self {
        Self {
            method: default_method(),
            past_start: default_past_start(),
            past_end: default_past_end(),
            future_start: default_future_start(),
            future_end: default_future_end(),
        }
    }
}

fn default_method() -> String {
    "delta".to_string()
}
fn default_past_start() -> String {
    "1979-01-01".to_string()
}
fn default_past_end() -> String {
    "2000-12-31".to_string()
}
fn default_future_start() -> String {
    "2000-01-01".to_string()
}
fn default_future_end() -> String {
    "2014-12-31".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CostToml {
    #[serde(default = "default_windows")]
    pub windows: Vec<usize>,
    #[serde(default = "default_threshold_type")]
    pub threshold_type: String,
    #[serde(default = "default_thresholds")]
    pub thresholds: Vec<ThresholdToml>,
    #[serde(default)]
    pub include_series: bool,
}

impl Default for CostToml {
    fn default() -> Self {
        Self {
            windows: default_windows(),
            threshold_type: default_threshold_type(),
            thresholds: default_thresholds(),
            include_series: false,
        }
    }
}

fn default_windows() -> Vec<usize> {
    vec![1, 3, 7]
}
fn default_threshold_type() -> String {
    "lower".to_string()
}
fn default_thresholds() -> Vec<ThresholdToml> {
    vec![ThresholdToml {
        fixed: None,
        quantile: Some(0.9),
    }]
}

/// Threshold specification; exactly one of `fixed` or `quantile` should be set.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdToml {
    pub fixed: Option<f64>,
    pub quantile: Option<f64>,
}
