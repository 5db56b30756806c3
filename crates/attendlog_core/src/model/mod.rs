//! Domain model for attendance entries.
//!
//! # Responsibility
//! - Define the canonical record shape persisted and listed by the store.
//! - Validate caller drafts before any record exists.
//!
//! # Invariants
//! - Every record is identified by a stable `RecordId`.
//! - `hours` is derived from the in/out times and never set directly.

pub mod record;
