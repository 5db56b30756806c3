//! Attendance record domain model.
//!
//! # Responsibility
//! - Define the canonical record created, edited and listed by the store.
//! - Compute worked hours from the in/out times.
//!
//! # Invariants
//! - `id` is stable and never reused for another record.
//! - `hours` is always derived via [`compute_hours`]; a draft with a
//!   non-positive duration never becomes a record.
//! - `timestamp` is set once at creation and survives every edit.

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every attendance record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type RecordId = Uuid;

const MINUTES_PER_HOUR: f64 = 60.0;

/// Validation failure for draft input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordValidationError {
    /// `name` is empty or whitespace-only.
    EmptyName,
    /// `time_out` is not strictly after `time_in` on the same day.
    NonPositiveDuration {
        time_in: NaiveTime,
        time_out: NaiveTime,
    },
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NonPositiveDuration { time_in, time_out } => write!(
                f,
                "time out ({time_out}) must be after time in ({time_in})"
            ),
        }
    }
}

impl Error for RecordValidationError {}

/// Caller-supplied fields for creating or editing a record.
///
/// Field presence is enforced by the type system; [`RecordDraft::validate`]
/// covers the remaining rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    pub name: String,
    pub date: NaiveDate,
    pub time_in: NaiveTime,
    pub time_out: NaiveTime,
}

impl RecordDraft {
    /// Validates the draft and returns the derived worked hours.
    pub fn validate(&self) -> Result<f64, RecordValidationError> {
        if self.name.trim().is_empty() {
            return Err(RecordValidationError::EmptyName);
        }
        compute_hours(self.time_in, self.time_out)
    }
}

/// One persisted attendance entry.
///
/// Serialized field names follow the stored interchange format
/// (`timeIn`/`timeOut` rather than snake case).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Stable global ID, assigned at creation.
    pub id: RecordId,
    pub name: String,
    pub date: NaiveDate,
    pub time_in: NaiveTime,
    pub time_out: NaiveTime,
    /// Derived worked hours. Recomputed on every edit.
    pub hours: f64,
    /// Creation instant. Never touched by edits.
    pub timestamp: DateTime<Utc>,
}

impl AttendanceRecord {
    /// Builds a new record from a draft, assigning a fresh id and
    /// creation timestamp.
    pub fn from_draft(draft: RecordDraft) -> Result<Self, RecordValidationError> {
        let hours = draft.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: draft.name,
            date: draft.date,
            time_in: draft.time_in,
            time_out: draft.time_out,
            hours,
            timestamp: Utc::now(),
        })
    }

    /// Applies an edit, recomputing `hours` and preserving `id` and
    /// `timestamp`.
    pub fn apply_edit(&mut self, draft: RecordDraft) -> Result<(), RecordValidationError> {
        let hours = draft.validate()?;
        self.name = draft.name;
        self.date = draft.date;
        self.time_in = draft.time_in;
        self.time_out = draft.time_out;
        self.hours = hours;
        Ok(())
    }
}

/// Computes worked hours from the in/out times on the same day.
///
/// Only hour and minute are significant. Overnight shifts are not
/// supported: a `time_out` at or before `time_in` is rejected as a
/// non-positive duration, never wrapped to the next day.
pub fn compute_hours(
    time_in: NaiveTime,
    time_out: NaiveTime,
) -> Result<f64, RecordValidationError> {
    let in_minutes = minutes_since_midnight(time_in);
    let out_minutes = minutes_since_midnight(time_out);

    if out_minutes <= in_minutes {
        return Err(RecordValidationError::NonPositiveDuration { time_in, time_out });
    }

    Ok(f64::from(out_minutes - in_minutes) / MINUTES_PER_HOUR)
}

fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}
