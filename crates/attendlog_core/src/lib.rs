//! Core domain logic for AttendLog.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod export;
pub mod logging;
pub mod model;
pub mod persist;
pub mod store;

pub use config::{StoreConfig, DEFAULT_RETENTION_MONTHS, STORAGE_KEY};
pub use export::{
    build_rows, format_display_date, format_display_time, round_hours, suggested_filename,
    ExportError, ExportResult, ExportRow, EXPORT_HEADERS,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::{
    compute_hours, AttendanceRecord, RecordDraft, RecordId, RecordValidationError,
};
pub use persist::{KeyValueStore, PersistError, PersistResult, SqliteKvStore};
pub use store::{AttendanceStore, RecordQuery, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
