//! Inclusive calendar date ranges.

use chrono::NaiveDate;

use crate::error::SeriesError;

/// An inclusive `[start, end]` range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a new range.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::InvalidRange`] if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, SeriesError> {
        if start > end {
            return Err(SeriesError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// First day of the range.
    pub fn start(self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    pub fn end(self) -> NaiveDate {
        self.end
    }

    /// Number of days covered, counting both ends.
    pub fn n_days(self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Returns `true` if the two ranges share at least one day.
    pub fn overlaps(self, other: DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}
