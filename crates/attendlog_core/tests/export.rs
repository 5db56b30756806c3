use attendlog_core::export::{pdf, xlsx};
use attendlog_core::{
    build_rows, format_display_date, format_display_time, round_hours, suggested_filename,
    AttendanceRecord, ExportError, ExportRow, EXPORT_HEADERS,
};
use chrono::{NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

fn record(name: &str, date: NaiveDate, time_in: (u32, u32), time_out: (u32, u32)) -> AttendanceRecord {
    let time_in = NaiveTime::from_hms_opt(time_in.0, time_in.1, 0).unwrap();
    let time_out = NaiveTime::from_hms_opt(time_out.0, time_out.1, 0).unwrap();
    AttendanceRecord {
        id: Uuid::new_v4(),
        name: name.to_string(),
        date,
        time_in,
        time_out,
        hours: attendlog_core::compute_hours(time_in, time_out).unwrap(),
        timestamp: Utc::now(),
    }
}

fn sample_rows() -> Vec<ExportRow> {
    build_rows(&[
        record(
            "Ada",
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            (9, 0),
            (17, 30),
        ),
        record(
            "Grace",
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            (8, 15),
            (16, 45),
        ),
    ])
}

#[test]
fn display_date_uses_weekday_month_day_year() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
    assert_eq!(format_display_date(date), "Mon, Mar 4, 2024");
}

#[test]
fn display_time_uses_twelve_hour_clock() {
    assert_eq!(
        format_display_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap()),
        "9:00 AM"
    );
    assert_eq!(
        format_display_time(NaiveTime::from_hms_opt(17, 30, 0).unwrap()),
        "5:30 PM"
    );
    assert_eq!(
        format_display_time(NaiveTime::from_hms_opt(0, 30, 0).unwrap()),
        "12:30 AM"
    );
    assert_eq!(
        format_display_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap()),
        "12:00 PM"
    );
}

#[test]
fn round_hours_keeps_two_decimals() {
    assert_eq!(round_hours(8.5), 8.5);
    assert_eq!(round_hours(25.0 / 3.0), 8.33);
    assert_eq!(round_hours(7.6666), 7.67);
}

#[test]
fn suggested_filenames_embed_the_iso_date() {
    let today = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
    assert_eq!(suggested_filename("pdf", today), "attendance_2024-03-04.pdf");
    assert_eq!(
        suggested_filename("xlsx", today),
        "attendance_2024-03-04.xlsx"
    );
}

#[test]
fn build_rows_formats_fields_and_preserves_order() {
    let rows = sample_rows();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Ada");
    assert_eq!(rows[0].date, "Mon, Mar 4, 2024");
    assert_eq!(rows[0].time_in, "9:00 AM");
    assert_eq!(rows[0].time_out, "5:30 PM");
    assert_eq!(rows[0].hours, 8.5);
    assert_eq!(rows[1].name, "Grace");
    assert_eq!(rows[1].date, "Tue, Mar 5, 2024");
}

#[test]
fn headers_match_the_table_layout() {
    assert_eq!(
        EXPORT_HEADERS,
        ["Name", "Date", "Time In", "Time Out", "Hours"]
    );
}

#[test]
fn pdf_document_renders_with_pdf_magic() {
    let rows = sample_rows();
    let generated_on = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();

    let bytes = pdf::render_document(&rows, 17.0, generated_on).unwrap();

    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn pdf_document_paginates_long_row_sets() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
    let records: Vec<AttendanceRecord> = (0..80)
        .map(|index| record(&format!("Worker {index}"), date, (9, 0), (17, 0)))
        .collect();
    let rows = build_rows(&records);
    let generated_on = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();

    let bytes = pdf::render_document(&rows, 8.0 * 80.0, generated_on).unwrap();

    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn pdf_export_rejects_an_empty_row_set() {
    let generated_on = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
    let err = pdf::render_document(&[], 0.0, generated_on).unwrap_err();
    assert!(matches!(err, ExportError::NoRecords));
}

#[test]
fn xlsx_workbook_renders_with_zip_magic() {
    let rows = sample_rows();

    let bytes = xlsx::render_workbook(&rows, 17.0).unwrap();

    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn xlsx_export_rejects_an_empty_row_set() {
    let err = xlsx::render_workbook(&[], 0.0).unwrap_err();
    assert!(matches!(err, ExportError::NoRecords));
}
