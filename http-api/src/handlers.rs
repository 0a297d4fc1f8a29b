//! Task API handlers
//!
//! Bridges the REST routes with a `TaskRepository` implementation. Each
//! operation is a single repository round trip; the handlers hold no state
//! beyond the shared repository handle.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use task_core::{
    error::{Result, TaskError},
    models::{NewTask, Task, TaskPage},
    repository::TaskRepository,
};

use crate::params::ListQuery;

/// Handler layer owning the repository handle shared by all routes
#[derive(Clone)]
pub struct TaskApi<R> {
    repository: Arc<R>,
}

impl<R> TaskApi<R> {
    /// Create a new handler layer over a repository
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Get a clone of the repository Arc
    pub fn repository(&self) -> Arc<R> {
        self.repository.clone()
    }
}

impl<R: TaskRepository> TaskApi<R> {
    /// Create a task and return the persisted representation
    pub async fn create_task(&self, payload: NewTask) -> Result<Task> {
        self.repository.create(payload).await
    }

    /// List tasks per the raw query-string parameters
    pub async fn list_tasks(&self, params: ListQuery) -> Result<TaskPage> {
        let query = params.into_task_query()?;
        self.repository.list(query).await
    }

    /// Fetch one task; an absent id is a NotFound error here, not an
    /// empty result
    pub async fn get_task(&self, id: i64) -> Result<Task> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| TaskError::not_found_id(id))
    }

    /// Replace all mutable fields of a task
    pub async fn update_task(&self, id: i64, payload: NewTask) -> Result<Task> {
        self.repository.update(id, payload).await
    }

    /// Delete a task permanently
    pub async fn delete_task(&self, id: i64) -> Result<()> {
        self.repository.delete(id).await
    }

    /// Check repository connectivity and report service health
    pub async fn health_check(&self) -> Result<HealthStatus> {
        self.repository.health_check().await?;

        Ok(HealthStatus {
            status: "healthy".to_string(),
            database: true,
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }
}

/// Health endpoint payload
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub database: bool,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}
