//! REST server over the task repository
//!
//! Routes the five CRUD endpoints plus `/health` onto a shared
//! [`TaskApi`] handler layer.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use std::{net::SocketAddr, sync::Arc};
use tracing::info;

use crate::{
    error::ApiError,
    handlers::{HealthStatus, TaskApi},
    params::ListQuery,
};
use task_core::{
    models::{NewTask, Task, TaskPage},
    repository::TaskRepository,
};

/// Shared server state for route handlers
#[derive(Clone)]
pub struct ApiState<R> {
    pub handler: TaskApi<R>,
}

/// REST server exposing the task CRUD API
pub struct ApiServer<R> {
    handler: TaskApi<R>,
}

impl<R: TaskRepository + Send + Sync + 'static> ApiServer<R> {
    /// Create a new server over a repository
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            handler: TaskApi::new(repository),
        }
    }

    /// Bind the address and serve until the process is stopped
    pub async fn serve(self, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.into_router();

        let socket_addr: SocketAddr = addr
            .parse()
            .map_err(|e| format!("Invalid address '{addr}': {e}"))?;

        info!("Starting task API server on {}", socket_addr);

        let listener = tokio::net::TcpListener::bind(socket_addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Build the router with all endpoints
    ///
    /// Exposed so tests and embedders can drive the API without binding a
    /// port themselves.
    pub fn into_router(self) -> Router {
        let state = Arc::new(ApiState {
            handler: self.handler,
        });

        Router::new()
            .route("/task", post(create_task::<R>).get(list_tasks::<R>))
            .route(
                "/task/:id",
                get(get_task::<R>)
                    .put(update_task::<R>)
                    .delete(delete_task::<R>),
            )
            .route("/health", get(health::<R>))
            .layer(middleware::from_fn(
                crate::request_logger::request_logging_middleware,
            ))
            .with_state(state)
    }
}

async fn create_task<R: TaskRepository + Send + Sync + 'static>(
    State(state): State<Arc<ApiState<R>>>,
    Json(payload): Json<NewTask>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = state.handler.create_task(payload).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

async fn list_tasks<R: TaskRepository + Send + Sync + 'static>(
    State(state): State<Arc<ApiState<R>>>,
    Query(params): Query<ListQuery>,
) -> Result<Json<TaskPage>, ApiError> {
    let page = state.handler.list_tasks(params).await?;
    Ok(Json(page))
}

async fn get_task<R: TaskRepository + Send + Sync + 'static>(
    State(state): State<Arc<ApiState<R>>>,
    Path(id): Path<i64>,
) -> Result<Json<Task>, ApiError> {
    let task = state.handler.get_task(id).await?;
    Ok(Json(task))
}

async fn update_task<R: TaskRepository + Send + Sync + 'static>(
    State(state): State<Arc<ApiState<R>>>,
    Path(id): Path<i64>,
    Json(payload): Json<NewTask>,
) -> Result<Json<Task>, ApiError> {
    let task = state.handler.update_task(id, payload).await?;
    Ok(Json(task))
}

async fn delete_task<R: TaskRepository + Send + Sync + 'static>(
    State(state): State<Arc<ApiState<R>>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.handler.delete_task(id).await?;
    Ok(StatusCode::OK)
}

async fn health<R: TaskRepository + Send + Sync + 'static>(
    State(state): State<Arc<ApiState<R>>>,
) -> Result<Json<HealthStatus>, ApiError> {
    let status = state.handler.health_check().await?;
    Ok(Json(status))
}
