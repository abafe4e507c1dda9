//! JSON output structures for a `run`.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use kairos_bias::Adjustment;

/// Top-level run report for one (model, location) pair.
#[derive(Debug, Serialize)]
pub struct Report {
    pub model: String,
    pub location: String,
    pub correction: CorrectionSummary,
    pub threshold_type: String,
    /// One entry per (threshold, window), thresholds outermost.
    pub units: Vec<UnitReport>,
}

/// The correction stage that produced the evaluated series.
#[derive(Debug, Serialize)]
pub struct CorrectionSummary {
    pub method: String,
    pub past_start: NaiveDate,
    pub past_end: NaiveDate,
    pub future_start: NaiveDate,
    pub future_end: NaiveDate,
    pub adjustment: AdjustmentSummary,
    pub n_days: usize,
}

/// Serializable form of [`Adjustment`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AdjustmentSummary {
    Identity,
    Shift(f64),
    Scale(f64),
}

impl From<Adjustment> for AdjustmentSummary {
    fn from(a: Adjustment) -> Self {
        match a {
            Adjustment::Identity => Self::Identity,
            Adjustment::Shift(v) => Self::Shift(v),
            Adjustment::Scale(v) => Self::Scale(v),
        }
    }
}

/// Result of one (threshold, window) unit.
#[derive(Debug, Serialize)]
pub struct UnitReport {
    pub threshold: String,
    pub window: usize,
    #[serde(flatten)]
    pub outcome: UnitOutcome,
}

/// Success or captured failure of a unit.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UnitOutcome {
    Ok(UnitMetrics),
    Failed { error: String },
}

/// Metrics of a successful unit.
#[derive(Debug, Serialize)]
pub struct UnitMetrics {
    /// Resolved threshold in the series' units.
    pub threshold_value: f64,
    pub cost: f64,
    pub n_selected: usize,
    pub matched_cost: f64,
    /// year -> days at or above the threshold
    pub reference_exceedances: BTreeMap<i32, usize>,
    pub reordered_exceedances: BTreeMap<i32, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reordered: Option<Vec<f64>>,
}

impl UnitReport {
    /// Returns `true` if the unit failed.
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, UnitOutcome::Failed { .. })
    }
}

/// Serialize a report to a pretty JSON string.
pub fn to_json(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize report")
}
