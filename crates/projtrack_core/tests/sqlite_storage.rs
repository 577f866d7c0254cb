use projtrack_core::storage::schema_version;
use projtrack_core::{
    ensure_schema, open_storage_db, open_storage_db_in_memory, KeyValuePersistence,
    KeyValueStorage, ProjectStore, SqliteStorage, StorageError, PROJECTS_STORAGE_KEY,
    STORAGE_SCHEMA_VERSION,
};
use rusqlite::Connection;

#[test]
fn open_in_memory_creates_kv_table_and_stamps_version() {
    let conn = open_storage_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), STORAGE_SCHEMA_VERSION);
    assert_table_exists(&conn, "kv_entries");
}

#[test]
fn reopening_storage_file_keeps_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projtrack.db");

    {
        let conn = open_storage_db(&path).unwrap();
        let storage = SqliteStorage::try_new(&conn).unwrap();
        storage.set_item("projects", "[]").unwrap();
    }

    let conn = open_storage_db(&path).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), STORAGE_SCHEMA_VERSION);
    let storage = SqliteStorage::try_new(&conn).unwrap();
    assert_eq!(storage.get_item("projects").unwrap().as_deref(), Some("[]"));
}

#[test]
fn ensure_schema_is_idempotent() {
    let conn = Connection::open_in_memory().unwrap();

    ensure_schema(&conn).unwrap();
    ensure_schema(&conn).unwrap();

    assert_eq!(schema_version(&conn).unwrap(), STORAGE_SCHEMA_VERSION);
}

#[test]
fn opening_file_with_unknown_schema_version_is_rejected_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_storage_db(&path).unwrap_err();
    match err {
        StorageError::SchemaMismatch { expected, found } => {
            assert_eq!(expected, STORAGE_SCHEMA_VERSION);
            assert_eq!(found, 999);
        }
        other => panic!("unexpected error: {other}"),
    }

    let conn = Connection::open(&path).unwrap();
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 0);
}

#[test]
fn storage_rejects_connection_without_schema() {
    let conn = Connection::open_in_memory().unwrap();

    let err = SqliteStorage::try_new(&conn).err().unwrap();

    assert!(matches!(
        err,
        StorageError::SchemaMismatch { found: 0, .. }
    ));
}

#[test]
fn storage_get_set_remove_and_clear() {
    let conn = open_storage_db_in_memory().unwrap();
    let storage = SqliteStorage::try_new(&conn).unwrap();

    assert_eq!(storage.get_item("projects").unwrap(), None);

    storage.set_item("projects", "[]").unwrap();
    storage.set_item("projects", "[1]").unwrap();
    storage.set_item("other", "x").unwrap();
    assert_eq!(storage.get_item("projects").unwrap().as_deref(), Some("[1]"));

    storage.remove_item("projects").unwrap();
    assert_eq!(storage.get_item("projects").unwrap(), None);
    assert_eq!(storage.get_item("other").unwrap().as_deref(), Some("x"));

    storage.clear().unwrap();
    assert_eq!(storage.get_item("other").unwrap(), None);
}

#[test]
fn store_state_survives_reopening_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projtrack.db");

    let written = {
        let conn = open_storage_db(&path).unwrap();
        let storage = SqliteStorage::try_new(&conn).unwrap();
        let mut store = ProjectStore::new(KeyValuePersistence::new(storage));
        store.add_project("Garden");
        let project_id = store.projects()[0].id.clone();
        store.add_task_project("Plant tomatoes", &project_id);
        store.add_task_project("Water", &project_id);
        let task_id = store.projects()[0].tasks[0].id.clone();
        store.toggle_task(&project_id, &task_id);
        store.project_list()
    };

    let conn = open_storage_db(&path).unwrap();
    let storage = SqliteStorage::try_new(&conn).unwrap();
    let raw = storage.get_item(PROJECTS_STORAGE_KEY).unwrap().unwrap();
    assert!(raw.contains("completedAt"));

    let store = ProjectStore::new(KeyValuePersistence::new(&storage));
    assert_eq!(store.project_list(), written);
    assert_eq!(store.projects_with_completion()[0].completion, 50);
}

#[test]
fn store_starts_empty_when_stored_value_is_corrupt() {
    let conn = open_storage_db_in_memory().unwrap();
    let storage = SqliteStorage::try_new(&conn).unwrap();
    storage
        .set_item(PROJECTS_STORAGE_KEY, "not json at all")
        .unwrap();

    let store = ProjectStore::new(KeyValuePersistence::new(&storage));

    assert!(store.no_projects());
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
