//! Pure conversion functions: TOML config structs -> crate API types.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use kairos_bias::CorrectionMethod;
use kairos_reorder::{ThresholdSpec, ThresholdType, Window};
use kairos_series::DateRange;

use crate::config::{CorrectionToml, CostToml, ThresholdToml};

/// Calibration and evaluation settings resolved from `[correction]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectionPlan {
    pub method: CorrectionMethod,
    pub past: DateRange,
    pub future: DateRange,
}

/// Cost evaluation settings resolved from `[cost]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CostPlan {
    pub windows: Vec<usize>,
    pub threshold_type: ThresholdType,
    pub thresholds: Vec<ThresholdSpec>,
    pub include_series: bool,
}

/// Parses a correction method name.
pub fn parse_method(s: &str) -> Result<CorrectionMethod> {
    Ok(s.parse()?)
}

/// Parses a threshold type name.
pub fn parse_threshold_type(s: &str) -> Result<ThresholdType> {
    Ok(s.parse()?)
}

/// Converts a TOML threshold specification into a `ThresholdSpec`.
///
/// Exactly one of `fixed` or `quantile` must be set.
pub fn parse_threshold(t: &ThresholdToml) -> Result<ThresholdSpec> {
    match (t.fixed, t.quantile) {
        (Some(v), None) => Ok(ThresholdSpec::Fixed(v)),
        (None, Some(v)) => Ok(ThresholdSpec::Quantile(v)),
        (Some(_), Some(_)) => {
            bail!("threshold must have exactly one of fixed or quantile, got both")
        }
        (None, None) => {
            bail!("threshold must have exactly one of fixed or quantile, got neither")
        }
    }
}

/// Parses an ISO `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date {s:?} (expected YYYY-MM-DD)"))
}

/// Builds an inclusive date range, naming the setting on failure.
pub fn build_range(start: &str, end: &str, name: &str) -> Result<DateRange> {
    let start = parse_date(start).with_context(|| format!("invalid {name} start"))?;
    let end = parse_date(end).with_context(|| format!("invalid {name} end"))?;
    DateRange::new(start, end).with_context(|| format!("invalid {name} range"))
}

/// Builds a [`CorrectionPlan`] from the TOML correction configuration.
pub fn build_correction_plan(c: &CorrectionToml) -> Result<CorrectionPlan> {
    Ok(CorrectionPlan {
        method: parse_method(&c.method)?,
        past: build_range(&c.past_start, &c.past_end, "past")?,
        future: build_range(&c.future_start, &c.future_end, "future")?,
    })
}

/// Builds a [`CostPlan`] from the TOML cost configuration.
///
/// Every window is validated up front so a bad width fails the whole run
/// before any unit is evaluated.
pub fn build_cost_plan(c: &CostToml) -> Result<CostPlan> {
    if c.windows.is_empty() {
        bail!("[cost].windows must list at least one window width");
    }
    if c.thresholds.is_empty() {
        bail!("[cost].thresholds must list at least one threshold");
    }
    for &w in &c.windows {
        Window::new(w)?;
    }
    let thresholds = c
        .thresholds
        .iter()
        .map(parse_threshold)
        .collect::<Result<Vec<_>>>()?;
    Ok(CostPlan {
        windows: c.windows.clone(),
        threshold_type: parse_threshold_type(&c.threshold_type)?,
        thresholds,
        include_series: c.include_series,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names() {
        assert_eq!(parse_method("delta").unwrap(), CorrectionMethod::Delta);
        assert_eq!(
            parse_method("relative_delta").unwrap(),
            CorrectionMethod::RelativeDelta
        );
        let err = parse_method("quantile_mapping").unwrap_err();
        assert!(err.to_string().contains("quantile_mapping"));
    }

    #[test]
    fn threshold_type_names() {
        assert_eq!(parse_threshold_type("upper").unwrap(), ThresholdType::Upper);
        assert!(parse_threshold_type("both").is_err());
    }

    #[test]
    fn threshold_exactly_one() {
        let fixed = ThresholdToml {
            fixed: Some(303.15),
            quantile: None,
        };
        assert_eq!(parse_threshold(&fixed).unwrap(), ThresholdSpec::Fixed(303.15));

        let both = ThresholdToml {
            fixed: Some(1.0),
            quantile: Some(0.5),
        };
        assert!(parse_threshold(&both).unwrap_err().to_string().contains("both"));

        let neither = ThresholdToml {
            fixed: None,
            quantile: None,
        };
        assert!(
            parse_threshold(&neither)
                .unwrap_err()
                .to_string()
                .contains("neither")
        );
    }

    #[test]
    fn dates_and_ranges() {
        let r = build_range("2000-01-01", "2000-12-31", "past").unwrap();
        assert_eq!(r.n_days(), 366);

        let err = build_range("2000-13-01", "2000-12-31", "past").unwrap_err();
        assert!(format!("{err:#}").contains("invalid past start"));

        let err = build_range("2001-01-01", "2000-12-31", "future").unwrap_err();
        assert!(format!("{err:#}").contains("invalid future range"));
    }

    #[test]
    fn default_correction_plan() {
        let plan = build_correction_plan(&CorrectionToml::default()).unwrap();
        assert_eq!(plan.method, CorrectionMethod::Delta);
        assert_eq!(plan.past.start(), NaiveDate::from_ymd_opt(1979, 1, 1).unwrap());
        assert_eq!(plan.future.end(), NaiveDate::from_ymd_opt(2014, 12, 31).unwrap());
    }

    #[test]
    fn cost_plan_rejects_even_window() {
        let cfg = CostToml {
            windows: vec![1, 4],
            ..CostToml::default()
        };
        let err = build_cost_plan(&cfg).unwrap_err();
        assert!(err.to_string().contains("invalid window: 4"));
    }

    #[test]
    fn cost_plan_rejects_empty_lists() {
        let no_windows = CostToml {
            windows: vec![],
            ..CostToml::default()
        };
        assert!(build_cost_plan(&no_windows).is_err());

        let no_thresholds = CostToml {
            thresholds: vec![],
            ..CostToml::default()
        };
        assert!(build_cost_plan(&no_thresholds).is_err());
    }

    #[test]
    fn default_cost_plan() {
        let plan = build_cost_plan(&CostToml::default()).unwrap();
        assert_eq!(plan.windows, vec![1, 3, 7]);
        assert_eq!(plan.threshold_type, ThresholdType::Lower);
        assert_eq!(plan.thresholds, vec![ThresholdSpec::Quantile(0.9)]);
        assert!(!plan.include_series);
    }
}
