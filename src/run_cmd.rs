//! Run command: correct, then evaluate every (threshold, window) unit.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use tracing::{debug_span, info, info_span, warn};

use kairos_bias::CorrectionResult;
use kairos_reorder::{ThresholdSpec, ThresholdType, reordering_cost};
use kairos_series::DailySeries;

use crate::cli::RunArgs;
use crate::config;
use crate::convert::{self, CorrectionPlan, CostPlan};
use crate::correct_cmd;
use crate::report::{CorrectionSummary, Report, UnitMetrics, UnitOutcome, UnitReport, to_json};

/// Run the full correction and cost pipeline.
pub fn run(args: RunArgs) -> Result<()> {
    let _cmd = info_span!("run").entered();
    let config = config::load(&args.config)?;
    let cost_plan = convert::build_cost_plan(&config.cost)?;
    let (plan, result) = correct_cmd::load_and_correct(&config)?;

    let report = build_report(
        &config.io.model_name,
        &config.io.location,
        &plan,
        &result,
        &cost_plan,
    )?;

    let n_failed = report.units.iter().filter(|u| u.is_failed()).count();
    if n_failed > 0 {
        warn!(
            n_failed,
            n_units = report.units.len(),
            "some units failed; see report"
        );
    }

    let output = args
        .output
        .or_else(|| config.io.output.clone())
        .unwrap_or_else(|| PathBuf::from("report.json"));
    let json = to_json(&report)?;
    std::fs::write(&output, json)
        .with_context(|| format!("failed to write report: {}", output.display()))?;
    info!(path = %output.display(), "report written");
    Ok(())
}

/// Evaluates all units against an already corrected pair of futures.
pub fn build_report(
    model: &str,
    location: &str,
    plan: &CorrectionPlan,
    result: &CorrectionResult,
    cost_plan: &CostPlan,
) -> Result<Report> {
    let reference = result.reference();
    let corrected = result.corrected();
    if reference.dates() != corrected.dates() {
        bail!(
            "reference and model futures are not aligned: {} vs {} days starting {:?} and {:?}",
            reference.len(),
            corrected.len(),
            reference.first_date(),
            corrected.first_date(),
        );
    }
    for (series, values) in [("reference", reference.values()), ("model", corrected.values())] {
        if let Some((n_missing, first_index)) = missing_summary(values) {
            warn!(
                series,
                n_missing,
                first_index,
                first_date = ?reference.dates().get(first_index),
                "future series contains missing values; reordering units will fail"
            );
        }
    }

    let units: Vec<(ThresholdSpec, usize)> = cost_plan
        .thresholds
        .iter()
        .flat_map(|&spec| cost_plan.windows.iter().map(move |&w| (spec, w)))
        .collect();
    info!(n_units = units.len(), n_days = reference.len(), "evaluating reordering costs");

    let reports: Vec<UnitReport> = units
        .par_iter()
        .map(|&(spec, window)| {
            evaluate_unit(
                reference,
                corrected,
                spec,
                window,
                cost_plan.threshold_type,
                cost_plan.include_series,
            )
        })
        .collect();

    Ok(Report {
        model: model.to_string(),
        location: location.to_string(),
        correction: CorrectionSummary {
            method: plan.method.to_string(),
            past_start: plan.past.start(),
            past_end: plan.past.end(),
            future_start: plan.future.start(),
            future_end: plan.future.end(),
            adjustment: result.adjustment().into(),
            n_days: reference.len(),
        },
        threshold_type: cost_plan.threshold_type.to_string(),
        units: reports,
    })
}

/// Count and first index of the non-finite values, if there are any.
fn missing_summary(values: &[f64]) -> Option<(usize, usize)> {
    let first_index = values.iter().position(|v| !v.is_finite())?;
    let n_missing = values[first_index..].iter().filter(|v| !v.is_finite()).count();
    Some((n_missing, first_index))
}

/// One independent unit. Failures are captured, never propagated.
fn evaluate_unit(
    reference: &DailySeries,
    corrected: &DailySeries,
    spec: ThresholdSpec,
    window: usize,
    threshold_type: ThresholdType,
    include_series: bool,
) -> UnitReport {
    let label = spec.label();
    let _span = debug_span!("unit", threshold = %label, window).entered();

    let outcome = match unit_metrics(reference, corrected, spec, window, threshold_type) {
        Ok(mut metrics) => {
            if !include_series {
                metrics.reordered = None;
            }
            UnitOutcome::Ok(metrics)
        }
        Err(e) => {
            let error = format!("{e:#}");
            warn!(threshold = %label, window, %error, "unit failed");
            UnitOutcome::Failed { error }
        }
    };

    UnitReport {
        threshold: label,
        window,
        outcome,
    }
}

fn unit_metrics(
    reference: &DailySeries,
    corrected: &DailySeries,
    spec: ThresholdSpec,
    window: usize,
    threshold_type: ThresholdType,
) -> Result<UnitMetrics> {
    let threshold = spec.resolve(reference.values())?;
    let outcome = reordering_cost(
        reference.values(),
        corrected.values(),
        window,
        threshold,
        threshold_type,
    )?;

    // Same dates as the corrected future, values permuted within the band.
    let reordered_exceedances = corrected
        .with_values(outcome.reordered().to_vec())?
        .annual_exceedances(threshold);

    Ok(UnitMetrics {
        threshold_value: threshold,
        cost: outcome.cost(),
        n_selected: outcome.n_selected(),
        matched_cost: outcome.reordering().matched_cost(),
        reference_exceedances: reference.annual_exceedances(threshold),
        reordered_exceedances,
        reordered: Some(outcome.into_reordering().into_values()),
    })
}
