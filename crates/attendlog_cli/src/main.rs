//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `attendlog_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use attendlog_core::{AttendanceStore, SqliteKvStore, StoreConfig};

fn main() {
    println!("attendlog_core version={}", attendlog_core::core_version());

    match SqliteKvStore::open_in_memory() {
        Ok(kv) => {
            let store = AttendanceStore::open(kv, StoreConfig::default());
            println!(
                "attendlog_core smoke records={} total_hours={:.2}",
                store.len(),
                store.total_hours()
            );
        }
        Err(err) => eprintln!("attendlog_core smoke failed: {err}"),
    }
}
