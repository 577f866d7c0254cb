//! Durable local key-value storage collaborators.
//!
//! # Responsibility
//! - Define the synchronous string-keyed storage contract used by persistence.
//! - Provide an in-process backend and a SQLite-backed durable backend.
//!
//! # Invariants
//! - Reads of a missing key return `Ok(None)`, never an error.
//! - `set_item` replaces any previous value for the same key.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::{
    ensure_schema, open_storage_db, open_storage_db_in_memory, schema_version, SqliteStorage,
    STORAGE_SCHEMA_VERSION,
};

pub type StorageResult<T> = Result<T, StorageError>;

/// Errors from key-value storage backends.
#[derive(Debug)]
pub enum StorageError {
    /// Underlying SQLite failure.
    Sqlite(rusqlite::Error),
    /// Storage file is not at the schema version this binary reads and writes.
    SchemaMismatch { expected: u32, found: u32 },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaMismatch { expected, found } => write!(
                f,
                "storage schema version {found} does not match expected {expected}"
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaMismatch { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Synchronous string-keyed storage scoped to the running client.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove_item(&self, key: &str) -> StorageResult<()>;
    fn clear(&self) -> StorageResult<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &S {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }

    fn clear(&self) -> StorageResult<()> {
        (**self).clear()
    }
}
