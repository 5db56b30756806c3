//! Export rows and display formatting.
//!
//! # Responsibility
//! - Turn listed records into the formatted rows shared by all exporters.
//! - Keep filename and display conventions in one place.
//!
//! # Invariants
//! - Exporters never touch store state; they transform listed records.
//! - Hours are rounded to two decimals only at this presentation edge.

pub mod pdf;
pub mod xlsx;

use crate::model::record::AttendanceRecord;
use chrono::{NaiveDate, NaiveTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ExportResult<T> = Result<T, ExportError>;

/// Export failure for document and spreadsheet rendering.
#[derive(Debug)]
pub enum ExportError {
    /// Nothing to export. Callers surface this instead of writing an
    /// empty artifact.
    NoRecords,
    Pdf(printpdf::Error),
    Xlsx(rust_xlsxwriter::XlsxError),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoRecords => write!(f, "no records to export"),
            Self::Pdf(err) => write!(f, "{err}"),
            Self::Xlsx(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoRecords => None,
            Self::Pdf(err) => Some(err),
            Self::Xlsx(err) => Some(err),
        }
    }
}

impl From<printpdf::Error> for ExportError {
    fn from(value: printpdf::Error) -> Self {
        Self::Pdf(value)
    }
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(value: rust_xlsxwriter::XlsxError) -> Self {
        Self::Xlsx(value)
    }
}

/// Column headers shared by the document and spreadsheet exporters.
pub const EXPORT_HEADERS: [&str; 5] = ["Name", "Date", "Time In", "Time Out", "Hours"];

/// One display-formatted export row.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub name: String,
    pub date: String,
    pub time_in: String,
    pub time_out: String,
    pub hours: f64,
}

/// Builds formatted rows from listed records, preserving their order.
pub fn build_rows(records: &[AttendanceRecord]) -> Vec<ExportRow> {
    records
        .iter()
        .map(|record| ExportRow {
            name: record.name.clone(),
            date: format_display_date(record.date),
            time_in: format_display_time(record.time_in),
            time_out: format_display_time(record.time_out),
            hours: round_hours(record.hours),
        })
        .collect()
}

/// Formats a date as weekday, month, day, year (`Mon, Mar 4, 2024`).
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}

/// Formats a time on the 12-hour clock (`5:30 PM`).
pub fn format_display_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Rounds derived hours to the two decimals shown outside the store.
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

/// Suggested download filename, e.g. `attendance_2024-03-04.pdf`.
pub fn suggested_filename(extension: &str, today: NaiveDate) -> String {
    format!("attendance_{}.{extension}", today.format("%Y-%m-%d"))
}
