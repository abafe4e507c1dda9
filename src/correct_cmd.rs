//! Correct command: bias-correct the model future and write it as CSV.

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use kairos_bias::{CorrectionResult, apply_correction};
use kairos_series::{read_csv, write_csv};

use crate::cli::CorrectArgs;
use crate::config::{self, KairosConfig};
use crate::convert::{self, CorrectionPlan};

/// Run the correction stage only.
pub fn run(args: CorrectArgs) -> Result<()> {
    let _cmd = info_span!("correct").entered();
    let config = config::load(&args.config)?;
    let (_, result) = load_and_correct(&config)?;

    write_csv(&args.output, result.corrected(), &config.io.model_column)
        .with_context(|| format!("failed to write corrected series: {}", args.output.display()))?;
    info!(
        path = %args.output.display(),
        n_days = result.corrected().len(),
        "corrected series written"
    );
    Ok(())
}

/// Reads both input series and applies the configured correction.
pub fn load_and_correct(config: &KairosConfig) -> Result<(CorrectionPlan, CorrectionResult)> {
    let plan = convert::build_correction_plan(&config.correction)?;

    let reference_path = config
        .io
        .reference
        .as_ref()
        .ok_or_else(|| anyhow!("no reference path: set [io].reference in config"))?;
    let model_path = config
        .io
        .model
        .as_ref()
        .ok_or_else(|| anyhow!("no model path: set [io].model in config"))?;

    info!(path = %reference_path.display(), "reading reference series");
    let reference = read_csv(reference_path, &config.io.reference_column)
        .with_context(|| format!("failed to read reference: {}", reference_path.display()))?;
    info!(path = %model_path.display(), "reading model series");
    let model = read_csv(model_path, &config.io.model_column)
        .with_context(|| format!("failed to read model: {}", model_path.display()))?;
    info!(
        n_reference = reference.len(),
        n_model = model.len(),
        "series loaded"
    );

    let result = apply_correction(plan.method, &reference, &model, plan.past, plan.future)
        .with_context(|| format!("{} correction failed", plan.method))?;
    info!(
        method = %plan.method,
        adjustment = ?result.adjustment(),
        "correction applied"
    );
    Ok((plan, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kairos_series::DailySeries;
    use std::path::Path;

    fn write_inputs(dir: &Path) {
        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let reference: Vec<f64> = (0..731).map(|i| 280.0 + (i % 10) as f64).collect();
        let model: Vec<f64> = reference.iter().map(|v| v - 2.0).collect();
        write_csv(
            &dir.join("reference.csv"),
            &DailySeries::from_start(start, reference),
            "tas",
        )
        .unwrap();
        write_csv(
            &dir.join("model.csv"),
            &DailySeries::from_start(start, model),
            "tas",
        )
        .unwrap();
    }

    fn config_text(dir: &Path) -> String {
        format!(
            r#"
            [io]
            reference = "{}"
            model = "{}"

            [correction]
            method = "delta"
            past_start = "2000-01-01"
            past_end = "2000-12-31"
            future_start = "2001-01-01"
            future_end = "2001-12-31"
            "#,
            dir.join("reference.csv").display(),
            dir.join("model.csv").display(),
        )
    }

    #[test]
    fn correct_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path());
        let config_path = dir.path().join("kairos.toml");
        std::fs::write(&config_path, config_text(dir.path())).unwrap();
        let output = dir.path().join("corrected.csv");

        run(CorrectArgs {
            config: config_path,
            output: output.clone(),
        })
        .unwrap();

        let corrected = read_csv(&output, "tas").unwrap();
        let reference = read_csv(&dir.path().join("reference.csv"), "tas").unwrap();
        assert_eq!(corrected.len(), 365);
        for (c, r) in corrected
            .values()
            .iter()
            .zip(reference.values()[366..].iter())
        {
            approx::assert_relative_eq!(*c, *r, epsilon = 1e-9);
        }
    }

    #[test]
    fn missing_reference_path_is_error() {
        let config: KairosConfig = toml::from_str("").unwrap();
        let err = load_and_correct(&config).unwrap_err();
        assert!(err.to_string().contains("no reference path"));
    }

    #[test]
    fn missing_file_has_context() {
        let config: KairosConfig = toml::from_str(
            "[io]\nreference = \"/nonexistent/ref.csv\"\nmodel = \"/nonexistent/model.csv\"\n",
        )
        .unwrap();
        let err = load_and_correct(&config).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read reference"));
    }
}
