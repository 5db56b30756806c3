//! Attendance record store.
//!
//! # Responsibility
//! - Own the in-memory record collection and its lifecycle.
//! - Validate before every mutation and persist after every mutation.
//!
//! # Invariants
//! - A record with a non-positive duration is never persisted.
//! - `id` and `timestamp` survive edits unchanged.
//! - After a successful mutation the persisted snapshot matches the
//!   in-memory collection; after a failed one the collection is unchanged.

use crate::config::StoreConfig;
use crate::model::record::{AttendanceRecord, RecordDraft, RecordId, RecordValidationError};
use crate::persist::{KeyValueStore, PersistError};
use chrono::NaiveDate;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for mutations and lookups.
#[derive(Debug)]
pub enum StoreError {
    Validation(RecordValidationError),
    NotFound(RecordId),
    Encode(serde_json::Error),
    Persist(PersistError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Encode(err) => write!(f, "failed to encode collection: {err}"),
            Self::Persist(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Encode(err) => Some(err),
            Self::Persist(err) => Some(err),
        }
    }
}

impl From<RecordValidationError> for StoreError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<PersistError> for StoreError {
    fn from(value: PersistError) -> Self {
        Self::Persist(value)
    }
}

/// Filter options for [`AttendanceStore::query`].
#[derive(Debug, Clone, Default)]
pub struct RecordQuery {
    /// Case-insensitive substring match on `name`.
    pub name_contains: Option<String>,
    /// Inclusive lower date bound.
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub to: Option<NaiveDate>,
}

/// In-memory record collection synchronized to a persistence backend.
pub struct AttendanceStore<S: KeyValueStore> {
    config: StoreConfig,
    kv: S,
    records: Vec<AttendanceRecord>,
}

impl<S: KeyValueStore> AttendanceStore<S> {
    /// Creates an empty store over `kv` without touching storage.
    pub fn new(kv: S, config: StoreConfig) -> Self {
        Self {
            config,
            kv,
            records: Vec::new(),
        }
    }

    /// Creates a store and loads the persisted collection.
    pub fn open(kv: S, config: StoreConfig) -> Self {
        let mut store = Self::new(kv, config);
        store.load();
        store
    }

    /// Replaces the in-memory collection with the persisted snapshot.
    ///
    /// An absent key, an unreadable backend or an unparseable snapshot all
    /// fall back to an empty collection. The stored state is left as-is
    /// until the next successful mutation rewrites it.
    pub fn load(&mut self) {
        let raw = match self.kv.read(&self.config.storage_key) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    "event=store_load module=store status=recovered reason=read_failed error={err}"
                );
                self.records = Vec::new();
                return;
            }
        };

        self.records = match raw {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(records) => records,
                Err(err) => {
                    warn!(
                        "event=store_load module=store status=recovered reason=corrupt_snapshot error={err}"
                    );
                    Vec::new()
                }
            },
        };

        info!(
            "event=store_load module=store status=ok count={}",
            self.records.len()
        );
    }

    /// Validates a draft, assigns identity, appends and persists.
    pub fn add(&mut self, draft: RecordDraft) -> StoreResult<AttendanceRecord> {
        let record = AttendanceRecord::from_draft(draft)?;

        self.records.push(record.clone());
        if let Err(err) = self.sync() {
            self.records.pop();
            return Err(err);
        }

        info!(
            "event=record_add module=store status=ok id={} hours={:.2}",
            record.id, record.hours
        );
        Ok(record)
    }

    /// Edits the record with `id`, validating the draft exactly like
    /// [`AttendanceStore::add`] and preserving `id` and `timestamp`.
    pub fn update(&mut self, id: RecordId, draft: RecordDraft) -> StoreResult<AttendanceRecord> {
        let index = self
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let mut updated = self.records[index].clone();
        updated.apply_edit(draft)?;

        let previous = std::mem::replace(&mut self.records[index], updated.clone());
        if let Err(err) = self.sync() {
            self.records[index] = previous;
            return Err(err);
        }

        info!(
            "event=record_update module=store status=ok id={} hours={:.2}",
            updated.id, updated.hours
        );
        Ok(updated)
    }

    /// Removes the record with `id` if present.
    ///
    /// Persists only when something was removed and reports whether it
    /// was. Obtaining user confirmation beforehand is a UI concern.
    pub fn remove(&mut self, id: RecordId) -> StoreResult<bool> {
        let Some(index) = self.records.iter().position(|record| record.id == id) else {
            return Ok(false);
        };

        let removed = self.records.remove(index);
        if let Err(err) = self.sync() {
            self.records.insert(index, removed);
            return Err(err);
        }

        info!("event=record_remove module=store status=ok id={id}");
        Ok(true)
    }

    /// Returns records ordered by `date` descending.
    ///
    /// Ties keep their relative insertion order, so repeated calls over
    /// unchanged data return the same sequence.
    pub fn list(&self) -> Vec<AttendanceRecord> {
        let mut records = self.records.clone();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records
    }

    /// Returns [`AttendanceStore::list`] narrowed by the query filters.
    pub fn query(&self, query: &RecordQuery) -> Vec<AttendanceRecord> {
        let needle = query
            .name_contains
            .as_ref()
            .map(|name| name.to_lowercase());

        let mut records: Vec<AttendanceRecord> = self
            .records
            .iter()
            .filter(|record| {
                needle
                    .as_ref()
                    .map_or(true, |needle| record.name.to_lowercase().contains(needle))
            })
            .filter(|record| query.from.map_or(true, |from| record.date >= from))
            .filter(|record| query.to.map_or(true, |to| record.date <= to))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records
    }

    /// Sum of all records' derived hours at full precision.
    ///
    /// Rounding to two decimals happens at the presentation edge
    /// ([`crate::export::round_hours`]).
    pub fn total_hours(&self) -> f64 {
        self.records.iter().map(|record| record.hours).sum()
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Removes every record dated strictly before `cutoff`.
    ///
    /// A record dated exactly at `cutoff` is retained. Persists only when
    /// at least one record was removed. Returns the removed count.
    pub fn purge_older_than(&mut self, cutoff: NaiveDate) -> StoreResult<usize> {
        let kept: Vec<AttendanceRecord> = self
            .records
            .iter()
            .filter(|record| record.date >= cutoff)
            .cloned()
            .collect();

        let removed = self.records.len() - kept.len();
        if removed == 0 {
            return Ok(0);
        }

        let previous = std::mem::replace(&mut self.records, kept);
        if let Err(err) = self.sync() {
            self.records = previous;
            return Err(err);
        }

        info!("event=store_purge module=store status=ok removed={removed} cutoff={cutoff}");
        Ok(removed)
    }

    /// Purges with the configured retention window relative to `today`.
    ///
    /// Designed to be driven by an external scheduler (startup plus once
    /// per day); the store exposes no timer of its own.
    pub fn purge_expired(&mut self, today: NaiveDate) -> StoreResult<usize> {
        let cutoff = self.config.retention_cutoff(today);
        self.purge_older_than(cutoff)
    }

    fn sync(&mut self) -> StoreResult<()> {
        let snapshot = serde_json::to_string(&self.records).map_err(StoreError::Encode)?;
        self.kv.write(&self.config.storage_key, &snapshot)?;
        Ok(())
    }
}
