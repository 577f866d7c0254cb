//! Project store operations and derived views.
//!
//! # Invariants
//! - `add_project` requires a non-empty raw name.
//! - `add_task_project` requires a non-blank trimmed name and a known project,
//!   but stores the name untrimmed.
//! - `toggle_task` is a pure toggle of `completed_at`.
//! - Only applied mutations trigger a save.

use crate::model::project::{Project, ProjectWithCompletion, Task};
use crate::persistence::ProjectPersistence;
use crate::store::clock::{Clock, SystemClock};
use log::{debug, error, warn};

/// In-process container for the persisted project collection.
pub struct ProjectStore<P: ProjectPersistence, C: Clock = SystemClock> {
    persistence: P,
    clock: C,
    projects: Vec<Project>,
}

impl<P: ProjectPersistence> ProjectStore<P> {
    /// Creates a store using wall-clock time for task completion.
    pub fn new(persistence: P) -> Self {
        Self::with_clock(persistence, SystemClock)
    }
}

impl<P: ProjectPersistence, C: Clock> ProjectStore<P, C> {
    /// Creates a store and loads any previously persisted collection.
    ///
    /// A missing or unreadable stored value starts the store empty.
    pub fn with_clock(persistence: P, clock: C) -> Self {
        let projects = match persistence.load() {
            Ok(projects) => {
                debug!(
                    "event=store_load module=store status=ok project_count={}",
                    projects.len()
                );
                projects
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=fallback reason=load_failed error={}",
                    err
                );
                Vec::new()
            }
        };

        Self {
            persistence,
            clock,
            projects,
        }
    }

    /// Appends a new empty project. Empty names are ignored.
    pub fn add_project(&mut self, name: &str) {
        if name.is_empty() {
            debug!("event=project_add module=store status=skipped reason=empty_name");
            return;
        }

        self.projects.push(Project::new(name));
        debug!(
            "event=project_add module=store status=ok project_count={}",
            self.projects.len()
        );
        self.persist();
    }

    /// Appends a new incomplete task to `project_id`.
    ///
    /// Blank names and unknown projects are ignored.
    pub fn add_task_project(&mut self, name: &str, project_id: &str) {
        if name.trim().is_empty() {
            debug!("event=task_add module=store status=skipped reason=blank_name");
            return;
        }

        let Some(project) = self.project_mut(project_id) else {
            debug!("event=task_add module=store status=skipped reason=unknown_project");
            return;
        };

        project.tasks.push(Task::new(name));
        debug!(
            "event=task_add module=store status=ok task_count={}",
            project.tasks.len()
        );
        self.persist();
    }

    /// Flips completion of `task_id` inside `project_id`.
    ///
    /// Unknown project or task IDs are ignored.
    pub fn toggle_task(&mut self, project_id: &str, task_id: &str) {
        let Some(project) = self.projects.iter_mut().find(|project| project.id == project_id)
        else {
            debug!("event=task_toggle module=store status=skipped reason=unknown_project");
            return;
        };
        let Some(task) = project.task_mut(task_id) else {
            debug!("event=task_toggle module=store status=skipped reason=unknown_task");
            return;
        };

        task.toggle_completion(self.clock.now());
        debug!(
            "event=task_toggle module=store status=ok completed={}",
            task.is_completed()
        );
        self.persist();
    }

    /// Replaces the whole collection and persists it.
    pub fn replace_projects(&mut self, projects: Vec<Project>) {
        self.projects = projects;
        debug!(
            "event=store_replace module=store status=ok project_count={}",
            self.projects.len()
        );
        self.persist();
    }

    /// Borrows the live collection.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn find_project(&self, project_id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == project_id)
    }

    /// Snapshot copy of the current collection.
    pub fn project_list(&self) -> Vec<Project> {
        self.projects.clone()
    }

    pub fn no_projects(&self) -> bool {
        self.projects.is_empty()
    }

    /// Every project with `task_count` and rounded `completion` attached.
    pub fn projects_with_completion(&self) -> Vec<ProjectWithCompletion> {
        self.projects
            .iter()
            .map(ProjectWithCompletion::from)
            .collect()
    }

    /// Consumes the store and returns its persistence adapter.
    pub fn into_persistence(self) -> P {
        self.persistence
    }

    fn project_mut(&mut self, project_id: &str) -> Option<&mut Project> {
        self.projects
            .iter_mut()
            .find(|project| project.id == project_id)
    }

    fn persist(&self) {
        if let Err(err) = self.persistence.save(&self.projects) {
            error!(
                "event=store_save module=store status=error project_count={} error={}",
                self.projects.len(),
                err
            );
        }
    }
}
