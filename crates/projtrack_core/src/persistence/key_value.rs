//! JSON persistence of the project collection in key-value storage.

use super::{PersistenceError, PersistenceResult, ProjectPersistence};
use crate::model::project::Project;
use crate::storage::KeyValueStorage;

/// Storage key holding the serialized project collection.
pub const PROJECTS_STORAGE_KEY: &str = "projects";

/// Stores the whole collection as one JSON array under `PROJECTS_STORAGE_KEY`.
#[derive(Debug, Clone)]
pub struct KeyValuePersistence<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> KeyValuePersistence<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

impl<S: KeyValueStorage> ProjectPersistence for KeyValuePersistence<S> {
    fn load(&self) -> PersistenceResult<Vec<Project>> {
        match self.storage.get_item(PROJECTS_STORAGE_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(PersistenceError::Decode),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, projects: &[Project]) -> PersistenceResult<()> {
        let raw = serde_json::to_string(projects).map_err(PersistenceError::Encode)?;
        self.storage.set_item(PROJECTS_STORAGE_KEY, &raw)?;
        Ok(())
    }
}
