//! SQLite-backed key-value storage.
//!
//! # Responsibility
//! - Open storage connections and bring them to the `kv_entries` schema.
//! - Persist string entries, keeping SQL inside the storage boundary.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`; `0` means a fresh file.
//! - A file stamped with a version other than `0` or
//!   `STORAGE_SCHEMA_VERSION` is never touched.
//! - `set_item` is an upsert and refreshes `updated_at`.

use super::{KeyValueStorage, StorageError, StorageResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

/// Schema version written by `ensure_schema`.
pub const STORAGE_SCHEMA_VERSION: u32 = 1;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const KV_ENTRIES_SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS kv_entries (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
);";

/// Opens (or creates) a storage file ready for `SqliteStorage::try_new`.
pub fn open_storage_db(path: impl AsRef<Path>) -> StorageResult<Connection> {
    let started_at = Instant::now();
    let result = Connection::open(path)
        .map_err(StorageError::from)
        .and_then(prepare_connection);
    log_open("file", started_at, &result);
    result
}

/// Opens a private in-memory storage database.
pub fn open_storage_db_in_memory() -> StorageResult<Connection> {
    let started_at = Instant::now();
    let result = Connection::open_in_memory()
        .map_err(StorageError::from)
        .and_then(prepare_connection);
    log_open("memory", started_at, &result);
    result
}

/// Creates `kv_entries` on a fresh connection and stamps the schema version.
///
/// Already-current connections are left as is.
///
/// # Errors
/// - `SchemaMismatch` when the file carries a version this binary does not know.
pub fn ensure_schema(conn: &Connection) -> StorageResult<()> {
    match schema_version(conn)? {
        STORAGE_SCHEMA_VERSION => Ok(()),
        0 => {
            let tx = conn.unchecked_transaction()?;
            tx.execute_batch(KV_ENTRIES_SCHEMA_SQL)?;
            tx.pragma_update(None, "user_version", STORAGE_SCHEMA_VERSION)?;
            tx.commit()?;
            Ok(())
        }
        found => Err(StorageError::SchemaMismatch {
            expected: STORAGE_SCHEMA_VERSION,
            found,
        }),
    }
}

/// Reads the schema version stamped on `conn`.
pub fn schema_version(conn: &Connection) -> StorageResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

fn prepare_connection(conn: Connection) -> StorageResult<Connection> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    ensure_schema(&conn)?;
    Ok(conn)
}

fn log_open(mode: &str, started_at: Instant, result: &StorageResult<Connection>) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(_) => info!(
            "event=storage_open module=storage status=ok mode={mode} schema={STORAGE_SCHEMA_VERSION} duration_ms={duration_ms}"
        ),
        Err(err) => error!(
            "event=storage_open module=storage status=error mode={mode} duration_ms={duration_ms} error={err}"
        ),
    }
}

/// Key-value storage over a borrowed, schema-ready connection.
pub struct SqliteStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStorage<'conn> {
    /// Wraps `conn` after verifying it carries the current schema.
    ///
    /// # Errors
    /// - `SchemaMismatch` when `ensure_schema` has not run on `conn`.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        let found = schema_version(conn)?;
        if found != STORAGE_SCHEMA_VERSION {
            return Err(StorageError::SchemaMismatch {
                expected: STORAGE_SCHEMA_VERSION,
                found,
            });
        }
        Ok(Self { conn })
    }
}

impl KeyValueStorage for SqliteStorage<'_> {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        self.conn.execute("DELETE FROM kv_entries;", [])?;
        Ok(())
    }
}
