//! CSV reading and writing of daily series.
//!
//! The file layout is a `date` column (ISO `YYYY-MM-DD`, an optional time
//! suffix is discarded) plus one named value column. Empty cells and the
//! tokens `NaN`/`NA` are read as missing.

use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::SeriesError;
use crate::series::DailySeries;

/// Name of the date column in series CSV files.
pub const DATE_COLUMN: &str = "date";

/// Reads a daily series from `path`, taking values from `value_column`.
///
/// # Errors
///
/// Returns [`SeriesError::FileNotFound`], [`SeriesError::MissingColumn`],
/// [`SeriesError::Parse`], [`SeriesError::EmptyFile`], or any validation
/// error from [`DailySeries::new`].
pub fn read_csv(path: &Path, value_column: &str) -> Result<DailySeries, SeriesError> {
    if !path.exists() {
        return Err(SeriesError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| SeriesError::MissingColumn {
                name: name.to_string(),
                path: path.to_path_buf(),
            })
    };
    let date_idx = column(DATE_COLUMN)?;
    let value_idx = column(value_column)?;

    let mut dates = Vec::new();
    let mut values = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        // header occupies line 1
        let line = row as u64 + 2;
        dates.push(parse_date(record.get(date_idx).unwrap_or(""), line)?);
        values.push(parse_value(record.get(value_idx).unwrap_or(""), line)?);
    }

    if dates.is_empty() {
        return Err(SeriesError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    debug!(path = %path.display(), n_days = dates.len(), "series read");
    DailySeries::new(dates, values)
}

/// Writes `series` to `path` as `date,<value_column>` rows.
///
/// Missing values are written as empty cells.
pub fn write_csv(path: &Path, series: &DailySeries, value_column: &str) -> Result<(), SeriesError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([DATE_COLUMN, value_column])?;
    for (date, &v) in series.dates().iter().zip(series.values()) {
        let cell = if v.is_finite() {
            v.to_string()
        } else {
            String::new()
        };
        writer.write_record([date.format("%Y-%m-%d").to_string(), cell])?;
    }
    writer.flush().map_err(|e| SeriesError::Csv {
        reason: e.to_string(),
    })?;
    debug!(path = %path.display(), n_days = series.len(), "series written");
    Ok(())
}

fn parse_date(raw: &str, line: u64) -> Result<NaiveDate, SeriesError> {
    let day = raw.split(['T', ' ']).next().unwrap_or("");
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|e| SeriesError::Parse {
        line,
        reason: format!("invalid date {raw:?}: {e}"),
    })
}

fn parse_value(raw: &str, line: u64) -> Result<f64, SeriesError> {
    match raw {
        "" | "NaN" | "nan" | "NA" => Ok(f64::NAN),
        s => s.parse::<f64>().map_err(|e| SeriesError::Parse {
            line,
            reason: format!("invalid value {s:?}: {e}"),
        }),
    }
}
