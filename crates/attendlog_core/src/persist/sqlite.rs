//! SQLite-backed key-value persistence.
//!
//! # Responsibility
//! - Open file or in-memory SQLite storage for the key-value contract.
//! - Apply the storage schema before returning a usable backend.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - A database newer than this binary supports is rejected, not rewritten.

use super::{KeyValueStore, PersistError, PersistResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

const SCHEMA_VERSION: u32 = 1;
const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS kv_entries (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);";

/// SQLite-backed implementation of [`KeyValueStore`].
pub struct SqliteKvStore {
    conn: Connection,
}

impl SqliteKvStore {
    /// Opens a storage file and prepares the schema.
    ///
    /// # Side effects
    /// - Emits `kv_open` logging events with duration and status.
    pub fn open(path: impl AsRef<Path>) -> PersistResult<Self> {
        let started_at = Instant::now();
        info!("event=kv_open module=persist status=start mode=file");

        let conn = match Connection::open(path) {
            Ok(conn) => conn,
            Err(err) => {
                error!(
                    "event=kv_open module=persist status=error mode=file duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        Self::bootstrap(conn, "file", started_at)
    }

    /// Opens an in-memory backend, mainly for tests and smoke probes.
    pub fn open_in_memory() -> PersistResult<Self> {
        let started_at = Instant::now();
        info!("event=kv_open module=persist status=start mode=memory");

        let conn = match Connection::open_in_memory() {
            Ok(conn) => conn,
            Err(err) => {
                error!(
                    "event=kv_open module=persist status=error mode=memory duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        Self::bootstrap(conn, "memory", started_at)
    }

    fn bootstrap(mut conn: Connection, mode: &str, started_at: Instant) -> PersistResult<Self> {
        let result = configure_connection(&mut conn);
        match result {
            Ok(()) => {
                info!(
                    "event=kv_open module=persist status=ok mode={} duration_ms={}",
                    mode,
                    started_at.elapsed().as_millis()
                );
                Ok(Self { conn })
            }
            Err(err) => {
                error!(
                    "event=kv_open module=persist status=error mode={} duration_ms={} error={}",
                    mode,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

fn configure_connection(conn: &mut Connection) -> PersistResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_schema(conn)
}

fn apply_schema(conn: &mut Connection) -> PersistResult<()> {
    let current: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;

    if current > SCHEMA_VERSION {
        return Err(PersistError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: SCHEMA_VERSION,
        });
    }

    if current == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;

    Ok(())
}

impl KeyValueStore for SqliteKvStore {
    fn read(&self, key: &str) -> PersistResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&mut self, key: &str, value: &str) -> PersistResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, SqliteKvStore};

    #[test]
    fn read_missing_key_returns_none() {
        let kv = SqliteKvStore::open_in_memory().unwrap();
        assert_eq!(kv.read("absent").unwrap(), None);
    }

    #[test]
    fn write_then_read_roundtrip() {
        let mut kv = SqliteKvStore::open_in_memory().unwrap();
        kv.write("snapshot", "[]").unwrap();
        assert_eq!(kv.read("snapshot").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn write_replaces_previous_value() {
        let mut kv = SqliteKvStore::open_in_memory().unwrap();
        kv.write("snapshot", "first").unwrap();
        kv.write("snapshot", "second").unwrap();
        assert_eq!(kv.read("snapshot").unwrap().as_deref(), Some("second"));
    }
}
