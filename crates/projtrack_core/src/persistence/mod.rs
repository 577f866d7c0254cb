//! Persistence adapters for the project collection.
//!
//! # Responsibility
//! - Define the `load`/`save` contract the store is constructed with.
//! - Translate between `Vec<Project>` and the JSON stored in key-value storage.
//!
//! # Invariants
//! - `save` always writes the full collection, never a delta.
//! - A missing stored value loads as an empty collection, not an error.

use crate::model::project::Project;
use crate::storage::StorageError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod key_value;

pub use key_value::{KeyValuePersistence, PROJECTS_STORAGE_KEY};

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Errors raised while loading or saving the project collection.
#[derive(Debug)]
pub enum PersistenceError {
    /// Storage backend failure.
    Storage(StorageError),
    /// Stored value is not a valid project collection.
    Decode(serde_json::Error),
    /// Collection could not be serialized.
    Encode(serde_json::Error),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "invalid stored projects: {err}"),
            Self::Encode(err) => write!(f, "failed to encode projects: {err}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Decode(err) | Self::Encode(err) => Some(err),
        }
    }
}

impl From<StorageError> for PersistenceError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Load/save contract injected into `ProjectStore`.
pub trait ProjectPersistence {
    fn load(&self) -> PersistenceResult<Vec<Project>>;
    fn save(&self, projects: &[Project]) -> PersistenceResult<()>;
}
