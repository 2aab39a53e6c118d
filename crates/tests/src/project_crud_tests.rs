use pretty_assertions::assert_eq;
use shared_types::{
    AppErrorKind, CreateProjectRequest, ProjectStatus, UpdateProjectRequest,
};

use crate::common;

#[tokio::test]
async fn test_projects_returns_seeded_list() {
    let (base, _state) = common::spawn_stub().await;
    let api = common::client(&base);

    let projects = api.projects().await.expect("project list");

    assert_eq!(projects.len(), 3);
    assert_eq!(projects[0].title, "Website");
    assert_eq!(projects[0].status, ProjectStatus::Pending);
    assert_eq!(projects[1].users.len(), 2);
}

#[tokio::test]
async fn test_create_project_resolves_assignees() {
    let (base, _state) = common::spawn_stub().await;
    let api = common::client(&base);

    let created = api
        .create_project(&CreateProjectRequest {
            title: "Launch".to_string(),
            description: Some("Release checklist".to_string()),
            status: ProjectStatus::InProgress,
            user_ids: vec![1, 2],
        })
        .await
        .expect("project create");

    assert_eq!(created.title, "Launch");
    assert_eq!(created.status, ProjectStatus::InProgress);
    assert_eq!(created.users.len(), 2);
    assert_eq!(created.users[0].name, "Alice");

    let projects = api.projects().await.expect("project list");
    assert_eq!(projects.len(), 4);
}

#[tokio::test]
async fn test_create_project_without_description() {
    let (base, _state) = common::spawn_stub().await;
    let api = common::client(&base);

    let created = api
        .create_project(&CreateProjectRequest {
            title: "Minimal".to_string(),
            description: None,
            status: ProjectStatus::Pending,
            user_ids: vec![1],
        })
        .await
        .expect("project create");

    assert_eq!(created.description, None);
}

#[tokio::test]
async fn test_create_project_server_validation_maps_to_field_errors() {
    let (base, _state) = common::spawn_stub().await;
    let api = common::client(&base);

    let err = api
        .create_project(&CreateProjectRequest {
            title: String::new(),
            description: None,
            status: ProjectStatus::Pending,
            user_ids: vec![1],
        })
        .await
        .expect_err("empty title must fail");

    assert_eq!(err.kind, AppErrorKind::ValidationError);
    assert_eq!(
        err.field_errors.get("title").map(String::as_str),
        Some("The title field is required.")
    );
}

#[tokio::test]
async fn test_update_project_changes_status_and_keeps_assignees() {
    let (base, _state) = common::spawn_stub().await;
    let api = common::client(&base);

    let updated = api
        .update_project(
            101,
            &UpdateProjectRequest {
                title: "Website".to_string(),
                description: Some("Refreshed scope".to_string()),
                status: ProjectStatus::Completed,
            },
        )
        .await
        .expect("project update");

    assert_eq!(updated.id, 101);
    assert_eq!(updated.status, ProjectStatus::Completed);
    assert_eq!(updated.description.as_deref(), Some("Refreshed scope"));
    assert_eq!(updated.users.len(), 1, "assignees survive updates");
}

#[tokio::test]
async fn test_delete_project_removes_from_list() {
    let (base, _state) = common::spawn_stub().await;
    let api = common::client(&base);

    api.delete_project(103).await.expect("project delete");

    let projects = api.projects().await.expect("project list");
    assert_eq!(projects.len(), 2);
    assert!(projects.iter().all(|p| p.id != 103));
}

#[tokio::test]
async fn test_update_missing_project_is_not_found() {
    let (base, _state) = common::spawn_stub().await;
    let api = common::client(&base);

    let err = api
        .update_project(
            9999,
            &UpdateProjectRequest {
                title: "Ghost".to_string(),
                description: None,
                status: ProjectStatus::Pending,
            },
        )
        .await
        .expect_err("missing id must fail");

    assert_eq!(err.kind, AppErrorKind::NotFound);
}
