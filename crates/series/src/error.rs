//! Error types for the kairos-series crate.

use std::path::PathBuf;

use chrono::NaiveDate;

/// Error type for all fallible operations in the kairos-series crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    /// Returned when the date and value vectors differ in length.
    #[error("length mismatch: {dates_len} dates but {values_len} values")]
    LengthMismatch {
        /// Number of dates supplied.
        dates_len: usize,
        /// Number of values supplied.
        values_len: usize,
    },

    /// Returned when a date is not exactly one day after its predecessor.
    #[error("non-contiguous dates at index {index}: {previous} followed by {found}")]
    NonContiguousDates {
        /// Index of the offending date.
        index: usize,
        /// The preceding date.
        previous: NaiveDate,
        /// The date found at `index`.
        found: NaiveDate,
    },

    /// Returned when a date range ends before it starts.
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange {
        /// Range start.
        start: NaiveDate,
        /// Range end.
        end: NaiveDate,
    },

    /// Returned when a series file does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error from the CSV reader or writer.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when a CSV cell cannot be parsed.
    #[error("parse error on line {line}: {reason}")]
    Parse {
        /// 1-based line number in the file (header is line 1).
        line: u64,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a required CSV column is absent.
    #[error("column '{name}' not found in {}", path.display())]
    MissingColumn {
        /// Name of the missing column.
        name: String,
        /// File that was inspected.
        path: PathBuf,
    },

    /// Returned when a CSV file has a header but no rows.
    #[error("no rows in {}", path.display())]
    EmptyFile {
        /// File that was inspected.
        path: PathBuf,
    },
}

impl From<csv::Error> for SeriesError {
    fn from(e: csv::Error) -> Self {
        SeriesError::Csv {
            reason: e.to_string(),
        }
    }
}
