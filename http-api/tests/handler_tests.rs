//! Handler-level tests for the REST layer
//!
//! Drives the TaskApi operations against the in-memory mock repository.

use std::sync::Arc;

use http_api::{ListQuery, TaskApi};
use mocks::{
    completed_payload, payload_with_due_date, payload_with_priority, sample_payloads,
    task_payload, MockTaskRepository,
};
use task_core::TaskError;

fn api() -> TaskApi<MockTaskRepository> {
    TaskApi::new(Arc::new(MockTaskRepository::new()))
}

#[tokio::test]
async fn test_create_then_get() {
    let api = api();

    let created = api.create_task(task_payload("Write docs")).await.unwrap();
    assert!(created.id > 0);

    let fetched = api.get_task(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_get_missing_task_is_not_found() {
    let api = api();

    let err = api.get_task(42).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_create_duplicate_title() {
    let api = api();

    api.create_task(task_payload("once")).await.unwrap();
    let err = api.create_task(task_payload("once")).await.unwrap_err();

    assert_eq!(err, TaskError::DuplicateTitle("once".to_string()));
}

#[tokio::test]
async fn test_create_rejects_bad_priority() {
    let api = api();

    let err = api
        .create_task(payload_with_priority("urgent?", 11))
        .await
        .unwrap_err();
    assert!(err.is_constraint());
}

#[tokio::test]
async fn test_update_replaces_all_fields() {
    let api = api();

    let created = api
        .create_task(completed_payload("old title"))
        .await
        .unwrap();

    let updated = api
        .update_task(created.id, payload_with_priority("new title", 1))
        .await
        .unwrap();

    assert_eq!(updated.title, "new title");
    assert_eq!(updated.priority, 1);
    // The payload's default false overwrote the completed flag
    assert!(!updated.is_completed);
}

#[tokio::test]
async fn test_update_missing_task_is_not_found() {
    let api = api();

    let err = api
        .update_task(7, task_payload("nobody home"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete_then_get() {
    let api = api();

    let created = api.create_task(task_payload("short-lived")).await.unwrap();
    api.delete_task(created.id).await.unwrap();

    assert!(api.get_task(created.id).await.unwrap_err().is_not_found());
    assert!(api.delete_task(created.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_list_defaults() {
    let api = api();

    for payload in sample_payloads(25) {
        api.create_task(payload).await.unwrap();
    }

    let page = api.list_tasks(ListQuery::default()).await.unwrap();
    assert_eq!(page.data.len(), 10);
    assert_eq!(page.total_count, 25);
    assert_eq!(page.page_count, 3);
}

#[tokio::test]
async fn test_list_search_is_case_insensitive() {
    let api = api();

    api.create_task(task_payload("Plan the TRIP")).await.unwrap();
    let mut with_description = task_payload("Misc");
    with_description.description = Some("book trip tickets".to_string());
    api.create_task(with_description).await.unwrap();
    api.create_task(task_payload("Laundry")).await.unwrap();

    let page = api
        .list_tasks(ListQuery {
            search: "trip".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(page.total_count, 2);
}

#[tokio::test]
async fn test_list_completion_filter() {
    let api = api();

    api.create_task(completed_payload("done")).await.unwrap();
    api.create_task(task_payload("open")).await.unwrap();

    let page = api
        .list_tasks(ListQuery {
            is_completed: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(page.total_count, 1);
    assert_eq!(page.data[0].title, "done");
}

#[tokio::test]
async fn test_list_default_order_is_due_date_desc() {
    let api = api();

    api.create_task(payload_with_due_date("early", 2024, 1, 10))
        .await
        .unwrap();
    api.create_task(payload_with_due_date("late", 2024, 9, 10))
        .await
        .unwrap();

    let page = api.list_tasks(ListQuery::default()).await.unwrap();
    assert_eq!(page.data[0].title, "late");
    assert_eq!(page.data[1].title, "early");
}

#[tokio::test]
async fn test_list_sort_priority_ascending() {
    let api = api();

    for (title, priority) in [("a", 3), ("b", 1), ("c", 5)] {
        api.create_task(payload_with_priority(title, priority))
            .await
            .unwrap();
    }

    let page = api
        .list_tasks(ListQuery {
            sort_field: Some("priority".to_string()),
            sort_order: Some("asc".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let priorities: Vec<i64> = page.data.iter().map(|t| t.priority).collect();
    assert_eq!(priorities, vec![1, 3, 5]);
}

#[tokio::test]
async fn test_list_unknown_sort_field_is_rejected() {
    let api = api();

    let err = api
        .list_tasks(ListQuery {
            sort_field: Some("sneaky; DROP TABLE tasks".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(err.is_validation());
}

#[tokio::test]
async fn test_list_rejects_non_positive_limit() {
    let api = api();

    let err = api
        .list_tasks(ListQuery {
            limit: 0,
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(err.is_validation());
}

#[tokio::test]
async fn test_repository_failure_propagates() {
    let repo = Arc::new(MockTaskRepository::new());
    let api = TaskApi::new(repo.clone());

    repo.inject_error(TaskError::Database("connection lost".to_string()));

    let err = api.list_tasks(ListQuery::default()).await.unwrap_err();
    assert!(err.is_database());
}

#[tokio::test]
async fn test_health_check_reports_database() {
    let repo = Arc::new(MockTaskRepository::new());
    let api = TaskApi::new(repo.clone());

    let health = api.health_check().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert!(health.database);

    repo.inject_error(TaskError::Database("gone".to_string()));
    assert!(api.health_check().await.is_err());
}
