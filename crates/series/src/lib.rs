//! # kairos-series
//!
//! Daily time series on a contiguous calendar, inclusive date ranges, and
//! CSV I/O. Calendar harmonization happens upstream: a [`DailySeries`] only
//! guarantees that its dates advance by exactly one day per value.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `series` | [`DailySeries`] container, slicing and exceedance counts |
//! | `range` | Inclusive [`DateRange`] |
//! | `csv_io` | `date,<value>` CSV reader and writer |
//! | `error` | Error types |

mod csv_io;
mod error;
mod range;
mod series;

pub use csv_io::{DATE_COLUMN, read_csv, write_csv};
pub use error::SeriesError;
pub use range::DateRange;
pub use series::DailySeries;
