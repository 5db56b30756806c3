//! Store configuration.
//!
//! # Responsibility
//! - Hold the tunables the store reads instead of hardwiring.
//!
//! # Invariants
//! - `retention_months` only drives purge cutoffs; the purge itself stays
//!   externally scheduled.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Key the whole record collection is persisted under.
pub const STORAGE_KEY: &str = "attendanceRecords";

/// Default retention window applied by periodic purges.
pub const DEFAULT_RETENTION_MONTHS: u32 = 5;

/// Tunables for an [`AttendanceStore`](crate::store::AttendanceStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Persistence key for the serialized collection.
    pub storage_key: String,
    /// Records dated before `today - retention_months` are purged.
    pub retention_months: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            retention_months: DEFAULT_RETENTION_MONTHS,
        }
    }
}

impl StoreConfig {
    /// Returns the purge cutoff for the configured retention window.
    ///
    /// Records dated strictly before the returned date are eligible for
    /// purging; a record dated exactly at the cutoff is retained.
    pub fn retention_cutoff(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_months(Months::new(self.retention_months))
            .unwrap_or(NaiveDate::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreConfig, DEFAULT_RETENTION_MONTHS, STORAGE_KEY};
    use chrono::NaiveDate;

    #[test]
    fn default_matches_constants() {
        let config = StoreConfig::default();
        assert_eq!(config.storage_key, STORAGE_KEY);
        assert_eq!(config.retention_months, DEFAULT_RETENTION_MONTHS);
    }

    #[test]
    fn retention_cutoff_subtracts_whole_months() {
        let config = StoreConfig::default();
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(
            config.retention_cutoff(today),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn retention_cutoff_clamps_month_end() {
        let config = StoreConfig {
            retention_months: 1,
            ..StoreConfig::default()
        };
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        assert_eq!(
            config.retention_cutoff(today),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }
}
