//! Paginated tabular PDF document.
//!
//! # Responsibility
//! - Render formatted rows plus a trailing total into an A4 document.
//!
//! # Invariants
//! - The header row is repeated at the top of every page.
//! - Rendering an empty row set is rejected, not silently emitted.

use super::{round_hours, ExportError, ExportResult, ExportRow, EXPORT_HEADERS};
use chrono::NaiveDate;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 14.0;
const ROW_STEP_MM: f32 = 8.0;
const COLUMN_X_MM: [f32; 5] = [14.0, 64.0, 114.0, 144.0, 174.0];
const TITLE_FONT_SIZE: f32 = 20.0;
const META_FONT_SIZE: f32 = 9.0;
const BODY_FONT_SIZE: f32 = 10.0;

/// Renders rows plus a trailing total row into a paginated document.
///
/// Rows are rendered in the order given; callers pass the store's listed
/// sequence.
pub fn render_document(
    rows: &[ExportRow],
    total_hours: f64,
    generated_on: NaiveDate,
) -> ExportResult<Vec<u8>> {
    if rows.is_empty() {
        return Err(ExportError::NoRecords);
    }

    let (doc, first_page, first_layer) = PdfDocument::new(
        "Attendance Records",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "table",
    );
    let body_font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold_font = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

    layer.use_text(
        "Attendance Records",
        TITLE_FONT_SIZE,
        Mm(MARGIN_MM),
        Mm(y),
        &bold_font,
    );
    y -= ROW_STEP_MM;
    layer.use_text(
        format!("Generated on: {}", generated_on.format("%Y-%m-%d")),
        META_FONT_SIZE,
        Mm(MARGIN_MM),
        Mm(y),
        &body_font,
    );
    y -= ROW_STEP_MM + 2.0;

    write_cells(&layer, &bold_font, y, EXPORT_HEADERS);
    y -= ROW_STEP_MM;

    for row in rows {
        if y < MARGIN_MM + ROW_STEP_MM {
            let (page, page_layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "table");
            layer = doc.get_page(page).get_layer(page_layer);
            y = PAGE_HEIGHT_MM - MARGIN_MM;
            write_cells(&layer, &bold_font, y, EXPORT_HEADERS);
            y -= ROW_STEP_MM;
        }

        let hours_text = format!("{:.2}", row.hours);
        write_cells(
            &layer,
            &body_font,
            y,
            [
                row.name.as_str(),
                row.date.as_str(),
                row.time_in.as_str(),
                row.time_out.as_str(),
                hours_text.as_str(),
            ],
        );
        y -= ROW_STEP_MM;
    }

    if y < MARGIN_MM + ROW_STEP_MM {
        let (page, page_layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "table");
        layer = doc.get_page(page).get_layer(page_layer);
        y = PAGE_HEIGHT_MM - MARGIN_MM;
    }
    let total_text = format!("{:.2}", round_hours(total_hours));
    write_cells(
        &layer,
        &bold_font,
        y,
        ["", "", "", "Total Hours:", total_text.as_str()],
    );

    let bytes = doc.save_to_bytes()?;
    Ok(bytes)
}

fn write_cells(layer: &PdfLayerReference, font: &IndirectFontRef, y: f32, cells: [&str; 5]) {
    for (cell, x) in cells.iter().zip(COLUMN_X_MM) {
        if !cell.is_empty() {
            layer.use_text(*cell, BODY_FONT_SIZE, Mm(x), Mm(y), font);
        }
    }
}
