//! End-to-end tests for the REST API
//!
//! Each test boots the full stack (router, handlers, SQLite repository) on an
//! ephemeral port with its own in-memory database and drives it over real
//! HTTP.

use database::SqliteTaskRepository;
use http_api::ApiServer;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;

async fn spawn_server() -> String {
    let repo = SqliteTaskRepository::new(":memory:").await.unwrap();
    repo.migrate().await.unwrap();

    let router = ApiServer::new(Arc::new(repo)).into_router();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}")
}

async fn create_task(client: &reqwest::Client, base: &str, body: Value) -> reqwest::Response {
    client
        .post(format!("{base}/task"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_and_get_roundtrip() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = create_task(
        &client,
        &base,
        json!({
            "title": "Write report",
            "description": "quarterly numbers",
            "isCompleted": false,
            "dueDate": "2024-01-01",
            "priority": 2
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();
    let id = created["id"].as_i64().unwrap();
    assert!(id > 0);
    assert_eq!(created["title"], "Write report");
    assert_eq!(created["dueDate"], "2024-01-01");

    let fetched: Value = client
        .get(format!("{base}/task/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_applies_defaults() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = create_task(&client, &base, json!({"title": "Defaults"})).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: Value = response.json().await.unwrap();
    assert_eq!(created["priority"], 3);
    assert_eq!(created["isCompleted"], false);
    assert_eq!(created["description"], Value::Null);
    assert_eq!(created["dueDate"], Value::Null);
}

#[tokio::test]
async fn test_create_without_title_is_client_error() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = create_task(&client, &base, json!({"priority": 2})).await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_create_duplicate_title_conflicts() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let first = create_task(&client, &base, json!({"title": "Buy milk"})).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = create_task(&client, &base, json!({"title": "Buy milk"})).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let body: Value = second.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("Buy milk"));
}

#[tokio::test]
async fn test_create_priority_out_of_range() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    for bad in [0, 6] {
        let response =
            create_task(&client, &base, json!({"title": format!("p{bad}"), "priority": bad}))
                .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

#[tokio::test]
async fn test_get_missing_task_returns_404() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{base}/task/999"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_replaces_every_field() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let created: Value = create_task(
        &client,
        &base,
        json!({
            "title": "Original",
            "description": "old",
            "isCompleted": true,
            "dueDate": "2024-03-01",
            "priority": 5
        }),
    )
    .await
    .json()
    .await
    .unwrap();
    let id = created["id"].as_i64().unwrap();

    let response = client
        .put(format!("{base}/task/{id}"))
        .json(&json!({
            "title": "Renamed",
            "isCompleted": false,
            "priority": 1
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["id"], id);
    assert_eq!(updated["title"], "Renamed");
    assert_eq!(updated["isCompleted"], false);
    assert_eq!(updated["priority"], 1);
    // Fields absent from the payload reset to their defaults, not kept
    assert_eq!(updated["description"], Value::Null);
    assert_eq!(updated["dueDate"], Value::Null);
}

#[tokio::test]
async fn test_update_missing_task_returns_404() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .put(format!("{base}/task/424242"))
        .json(&json!({"title": "ghost"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_get_returns_404() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let created: Value = create_task(&client, &base, json!({"title": "Ephemeral"}))
        .await
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    let response = client
        .delete(format!("{base}/task/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let get = client
        .get(format!("{base}/task/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(get.status(), StatusCode::NOT_FOUND);

    let again = client
        .delete(format!("{base}/task/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_pagination_metadata() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    for i in 0..25 {
        let response =
            create_task(&client, &base, json!({"title": format!("task-{i:02}")})).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let page: Value = client
        .get(format!("{base}/task?limit=10&pageIndex=3"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(page["data"].as_array().unwrap().len(), 5);
    assert_eq!(page["pageCount"], 3);
    assert_eq!(page["totalCount"], 25);
}

#[tokio::test]
async fn test_list_search_and_completion_filter() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    create_task(&client, &base, json!({"title": "Pay rent", "isCompleted": true})).await;
    create_task(
        &client,
        &base,
        json!({"title": "Utilities", "description": "pay electricity bill"}),
    )
    .await;
    create_task(&client, &base, json!({"title": "Walk the dog"})).await;

    // Search unions title and description matches, case-insensitively
    let page: Value = client
        .get(format!("{base}/task?search=PAY"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page["totalCount"], 2);

    // The completion filter narrows the same search
    let page: Value = client
        .get(format!("{base}/task?search=PAY&isCompleted=false"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page["totalCount"], 1);
    assert_eq!(page["data"][0]["title"], "Utilities");
}

#[tokio::test]
async fn test_list_sorting() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    for (title, priority, due) in [
        ("a", 4, "2024-02-01"),
        ("b", 1, "2024-05-01"),
        ("c", 3, "2024-03-01"),
    ] {
        create_task(
            &client,
            &base,
            json!({"title": title, "priority": priority, "dueDate": due}),
        )
        .await;
    }

    // Explicit ascending priority sort
    let page: Value = client
        .get(format!("{base}/task?sortField=priority&sortOrder=asc"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let priorities: Vec<i64> = page["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["priority"].as_i64().unwrap())
        .collect();
    assert_eq!(priorities, vec![1, 3, 4]);

    // No sortField: due date, newest first
    let page: Value = client
        .get(format!("{base}/task"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let titles: Vec<&str> = page["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["b", "c", "a"]);
}

#[tokio::test]
async fn test_list_rejects_bad_parameters() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    // Non-positive limit
    let response = client
        .get(format!("{base}/task?limit=0"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unknown sort field
    let response = client
        .get(format!("{base}/task?sortField=createdAt"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // isCompleted only parses the bool literals
    let response = client
        .get(format!("{base}/task?isCompleted=yes"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_page_index_zero_clamps() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    for i in 0..3 {
        create_task(&client, &base, json!({"title": format!("task-{i}")})).await;
    }

    let first: Value = client
        .get(format!("{base}/task?limit=2&pageIndex=1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let clamped: Value = client
        .get(format!("{base}/task?limit=2&pageIndex=0"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(clamped["data"], first["data"]);
}

#[tokio::test]
async fn test_health_endpoint() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], true);
}

#[tokio::test]
async fn test_create_then_list_example() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = create_task(
        &client,
        &base,
        json!({
            "title": "A",
            "description": "d",
            "isCompleted": false,
            "dueDate": "2024-01-01",
            "priority": 2
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let page: Value = client
        .get(format!("{base}/task?limit=5&pageIndex=1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(page["totalCount"].as_i64().unwrap() >= 1);
    let titles: Vec<&str> = page["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert!(titles.contains(&"A"));
}
