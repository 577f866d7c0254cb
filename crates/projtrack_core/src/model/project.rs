//! Project and task records.
//!
//! # Responsibility
//! - Define the canonical records owned by `ProjectStore`.
//! - Provide completion helpers shared by derived views.
//!
//! # Invariants
//! - `id` is generated once at creation and never rewritten.
//! - `completed_at == None` means incomplete; `Some(t)` means completed at `t`.
//! - Wire field names are camelCase (`completedAt`), timestamps are RFC 3339.
//! - Fields this crate does not model are carried in `extra` and written back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Stable project identifier.
///
/// Kept as an opaque string so externally produced data with non-UUID IDs
/// still loads unchanged.
pub type ProjectId = String;

/// Stable task identifier, unique across all projects.
pub type TaskId = String;

/// Generates a fresh random identifier for a project or task.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Named unit of work owned by exactly one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    /// Display name exactly as entered (not trimmed).
    pub name: String,
    /// Omitted on write when absent; `null` and missing both read as `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Stored fields written by other clients, preserved on save.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    /// Creates an incomplete task with a generated ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(new_id(), name)
    }

    /// Creates an incomplete task with a caller-provided ID.
    pub fn with_id(id: impl Into<TaskId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            completed_at: None,
            extra: Map::new(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Flips completion: sets `now` when incomplete, clears it when complete.
    pub fn toggle_completion(&mut self, now: DateTime<Utc>) {
        self.completed_at = match self.completed_at {
            Some(_) => None,
            None => Some(now),
        };
    }
}

/// Named, ordered collection of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Project {
    /// Creates an empty project with a generated ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(new_id(), name)
    }

    /// Creates an empty project with a caller-provided ID.
    ///
    /// Used by fixtures and import paths where identity already exists.
    pub fn with_id(id: impl Into<ProjectId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tasks: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    pub fn task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == task_id)
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn completed_task_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_completed()).count()
    }

    /// Rounded completion percentage in `0..=100`; `0` when there are no tasks.
    pub fn completion(&self) -> u8 {
        completion_percent(self.completed_task_count(), self.task_count())
    }
}

/// Project row augmented with derived completion statistics.
///
/// Serializes as the flattened project fields plus `taskCount` and
/// `completion`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectWithCompletion {
    #[serde(flatten)]
    pub project: Project,
    pub task_count: usize,
    pub completion: u8,
}

impl From<&Project> for ProjectWithCompletion {
    fn from(project: &Project) -> Self {
        Self {
            task_count: project.task_count(),
            completion: project.completion(),
            project: project.clone(),
        }
    }
}

/// Computes `round(completed / total * 100)` with halves rounded up.
///
/// Integer arithmetic keeps the result exact: `floor((200c + t) / 2t)`.
pub fn completion_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total) as u64;
    let total = total as u64;
    ((completed * 200 + total) / (total * 2)) as u8
}

#[cfg(test)]
mod tests {
    use super::{completion_percent, Project, Task};
    use chrono::{TimeZone, Utc};

    #[test]
    fn completion_percent_handles_empty_and_rounding() {
        assert_eq!(completion_percent(0, 0), 0);
        assert_eq!(completion_percent(1, 2), 50);
        assert_eq!(completion_percent(1, 3), 33);
        assert_eq!(completion_percent(2, 3), 67);
        assert_eq!(completion_percent(1, 8), 13);
        assert_eq!(completion_percent(4, 4), 100);
    }

    #[test]
    fn toggle_completion_flips_between_states() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let mut task = Task::new("write docs");
        assert!(!task.is_completed());

        task.toggle_completion(now);
        assert_eq!(task.completed_at, Some(now));

        task.toggle_completion(now);
        assert_eq!(task.completed_at, None);
    }

    #[test]
    fn project_new_generates_distinct_ids() {
        let first = Project::new("a");
        let second = Project::new("a");
        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);
        assert!(first.tasks.is_empty());
    }
}
