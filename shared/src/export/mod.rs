//! Export encoders for the filtered dashboard view

pub mod calendar;
pub mod csv;

pub use self::calendar::{to_calendar, CALENDAR_EXPORT_FILENAME};
pub use self::csv::{to_csv, CSV_EXPORT_FILENAME};

use thiserror::Error;

/// Errors raised while encoding an export document
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV encoding error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("CSV writer error: {0}")]
    CsvWriter(String),

    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
