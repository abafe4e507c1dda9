//! Contiguous daily time series.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::error::SeriesError;
use crate::range::DateRange;

/// A daily time series on a contiguous run of calendar days.
///
/// Missing observations are stored as `NaN`. The date vector always has the
/// same length as the value vector and advances by exactly one day per step.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl DailySeries {
    /// Creates a series after validating the date axis.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::LengthMismatch`] if the vectors differ in length,
    /// or [`SeriesError::NonContiguousDates`] if any date is not exactly one
    /// day after the previous one.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self, SeriesError> {
        if dates.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                dates_len: dates.len(),
                values_len: values.len(),
            });
        }
        for (index, pair) in dates.windows(2).enumerate() {
            if pair[0].succ_opt() != Some(pair[1]) {
                return Err(SeriesError::NonContiguousDates {
                    index: index + 1,
                    previous: pair[0],
                    found: pair[1],
                });
            }
        }
        Ok(Self { dates, values })
    }

    /// Creates a series whose first value falls on `start`.
    pub fn from_start(start: NaiveDate, values: Vec<f64>) -> Self {
        let dates = start.iter_days().take(values.len()).collect();
        Self { dates, values }
    }

    /// Returns the date axis.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Returns the values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consumes the series and returns the values.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Returns the number of days.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the series holds no days.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First date, if any.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    /// Last date, if any.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Returns a new series restricted to the days inside `range`.
    ///
    /// The result is empty if the range does not intersect the series.
    pub fn slice(&self, range: DateRange) -> DailySeries {
        let lo = self.dates.partition_point(|d| *d < range.start());
        let hi = self.dates.partition_point(|d| *d <= range.end());
        let (lo, hi) = (lo, hi.max(lo));
        Self {
            dates: self.dates[lo..hi].to_vec(),
            values: self.values[lo..hi].to_vec(),
        }
    }

    /// Returns a new series on the same dates carrying `values`.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::LengthMismatch`] if `values` has a different
    /// length than this series.
    pub fn with_values(&self, values: Vec<f64>) -> Result<DailySeries, SeriesError> {
        if values.len() != self.dates.len() {
            return Err(SeriesError::LengthMismatch {
                dates_len: self.dates.len(),
                values_len: values.len(),
            });
        }
        Ok(Self {
            dates: self.dates.clone(),
            values,
        })
    }

    /// Counts, per calendar year, the days whose value is `>= threshold`.
    ///
    /// Every year touched by the series appears in the map, with zero when no
    /// day reaches the threshold. Missing values never count.
    pub fn annual_exceedances(&self, threshold: f64) -> BTreeMap<i32, usize> {
        let mut counts = BTreeMap::new();
        for (date, &v) in self.dates.iter().zip(&self.values) {
            let entry = counts.entry(date.year()).or_insert(0);
            if v >= threshold {
                *entry += 1;
            }
        }
        counts
    }
}
