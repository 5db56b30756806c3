//! Persistence collaborator contracts.
//!
//! # Responsibility
//! - Define the key-value contract the store persists through.
//! - Keep storage backends swappable behind one narrow trait.
//!
//! # Invariants
//! - The store serializes its whole collection under a single key.
//! - Backends report missing keys as `None`, never as an error.

mod sqlite;

pub use sqlite::SqliteKvStore;

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PersistResult<T> = Result<T, PersistError>;

/// Backend failure while reading or writing a key.
#[derive(Debug)]
pub enum PersistError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "storage schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for PersistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Narrow key-value contract used for whole-collection persistence.
pub trait KeyValueStore {
    /// Returns the stored value for `key`, or `None` when absent.
    fn read(&self, key: &str) -> PersistResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> PersistResult<()>;
}
