//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `projtrack_core` linkage with deterministic output.
//! - Optionally print the completion view of a SQLite-backed store.
//!
//! Usage: `projtrack_cli [DB_PATH]`; log level comes from `PROJTRACK_LOG`.

use projtrack_core::{
    default_log_level, init_logging, open_storage_db, KeyValuePersistence, ProjectStore,
    SqliteStorage,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const LOG_LEVEL_ENV: &str = "PROJTRACK_LOG";

fn main() -> ExitCode {
    println!("projtrack_core ping={}", projtrack_core::ping());
    println!("projtrack_core version={}", projtrack_core::core_version());

    let Some(db_path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        return ExitCode::SUCCESS;
    };

    match print_completion(&db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn print_completion(db_path: &Path) -> Result<(), String> {
    let db_path = std::path::absolute(db_path).map_err(|err| err.to_string())?;
    let log_dir = db_path
        .parent()
        .map(|dir| dir.join("logs"))
        .ok_or_else(|| format!("database path has no parent: {}", db_path.display()))?;
    let level = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_log_level().to_string());
    init_logging(&level, &log_dir).map_err(|err| err.to_string())?;

    let conn = open_storage_db(&db_path).map_err(|err| err.to_string())?;
    let storage = SqliteStorage::try_new(&conn).map_err(|err| err.to_string())?;
    let store = ProjectStore::new(KeyValuePersistence::new(storage));

    if store.no_projects() {
        println!("no projects");
        return Ok(());
    }

    for row in store.projects_with_completion() {
        println!(
            "{} tasks={} completion={}%",
            row.project.name, row.task_count, row.completion
        );
    }
    log::info!(
        "event=cli_report module=cli status=ok project_count={}",
        store.projects().len()
    );
    Ok(())
}
