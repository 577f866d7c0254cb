//! Core state container for the ProjTrack project/task tracker.
//! This crate is the single source of truth for project and task state.

pub mod logging;
pub mod model;
pub mod persistence;
pub mod storage;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::project::{
    completion_percent, Project, ProjectId, ProjectWithCompletion, Task, TaskId,
};
pub use persistence::{
    KeyValuePersistence, PersistenceError, PersistenceResult, ProjectPersistence,
    PROJECTS_STORAGE_KEY,
};
pub use storage::{
    ensure_schema, open_storage_db, open_storage_db_in_memory, KeyValueStorage, MemoryStorage,
    SqliteStorage, StorageError, StorageResult, STORAGE_SCHEMA_VERSION,
};
pub use store::clock::{Clock, SystemClock};
pub use store::project_store::ProjectStore;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
