use chrono::{TimeZone, Utc};
use projtrack_core::{Project, ProjectWithCompletion, Task};
use serde_json::json;

#[test]
fn task_serialization_uses_camel_case_and_omits_absent_completion() {
    let task = Task::with_id("t-1", "Write tests");

    let value = serde_json::to_value(&task).unwrap();

    assert_eq!(value, json!({ "id": "t-1", "name": "Write tests" }));
}

#[test]
fn completed_at_roundtrips_as_rfc3339_string() {
    let completed_at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
    let mut task = Task::with_id("t-1", "Ship");
    task.completed_at = Some(completed_at);

    let value = serde_json::to_value(&task).unwrap();
    let encoded = value["completedAt"].as_str().unwrap();
    assert!(encoded.starts_with("2024-05-01T10:00:00"));

    let decoded: Task = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn completed_at_accepts_browser_iso_strings_and_null() {
    let with_millis: Task = serde_json::from_value(json!({
        "id": "t-1",
        "name": "From browser",
        "completedAt": "2024-05-01T10:00:00.250Z"
    }))
    .unwrap();
    assert_eq!(
        with_millis.completed_at,
        Some(
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
                + chrono::Duration::milliseconds(250)
        )
    );

    let with_null: Task = serde_json::from_value(json!({
        "id": "t-2",
        "name": "Open",
        "completedAt": null
    }))
    .unwrap();
    assert!(!with_null.is_completed());
}

#[test]
fn project_without_tasks_field_loads_empty() {
    let project: Project = serde_json::from_value(json!({ "id": "p-1", "name": "Bare" })).unwrap();

    assert_eq!(project, Project::with_id("p-1", "Bare"));
}

#[test]
fn completion_view_counts_only_completed_tasks() {
    let mut project = Project::with_id("p-1", "Mixed");
    for idx in 0..3 {
        project.tasks.push(Task::with_id(format!("t-{idx}"), "task"));
    }
    project.tasks[0].completed_at = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

    let row = ProjectWithCompletion::from(&project);

    assert_eq!(row.task_count, 3);
    assert_eq!(row.completion, 33);
    assert_eq!(project.completed_task_count(), 1);
    assert_eq!(project.task("t-2").map(|task| task.name.as_str()), Some("task"));
}
