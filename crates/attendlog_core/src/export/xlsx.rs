//! Spreadsheet workbook exporter.
//!
//! # Responsibility
//! - Render formatted rows plus a trailing total row into one workbook.
//!
//! # Invariants
//! - The workbook holds exactly one sheet, named `Attendance`.
//! - Rendering an empty row set is rejected, not silently emitted.

use super::{round_hours, ExportError, ExportResult, ExportRow, EXPORT_HEADERS};
use rust_xlsxwriter::{Format, Workbook};

const SHEET_NAME: &str = "Attendance";

/// Renders rows plus a trailing total row into an XLSX workbook.
///
/// Rows are rendered in the order given; callers pass the store's listed
/// sequence. The total label lands in the Time Out column with the value
/// beside it, mirroring the document exporter's footer.
pub fn render_workbook(rows: &[ExportRow], total_hours: f64) -> ExportResult<Vec<u8>> {
    if rows.is_empty() {
        return Err(ExportError::NoRecords);
    }

    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (column, header) in EXPORT_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, column as u16, *header, &bold)?;
    }

    for (index, row) in rows.iter().enumerate() {
        let sheet_row = (index + 1) as u32;
        worksheet.write_string(sheet_row, 0, row.name.as_str())?;
        worksheet.write_string(sheet_row, 1, row.date.as_str())?;
        worksheet.write_string(sheet_row, 2, row.time_in.as_str())?;
        worksheet.write_string(sheet_row, 3, row.time_out.as_str())?;
        worksheet.write_number(sheet_row, 4, row.hours)?;
    }

    let total_row = (rows.len() + 1) as u32;
    worksheet.write_string_with_format(total_row, 3, "Total Hours:", &bold)?;
    worksheet.write_number_with_format(total_row, 4, round_hours(total_hours), &bold)?;

    let bytes = workbook.save_to_buffer()?;
    Ok(bytes)
}
