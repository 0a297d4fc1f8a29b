use crate::{
    error::Result,
    models::{NewTask, Task, TaskPage, TaskQuery},
};
use async_trait::async_trait;

/// Repository trait for task persistence and retrieval operations
///
/// This trait defines the interface for all task data operations.
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Create a new task
    ///
    /// # Arguments
    /// * `task` - The payload to persist
    ///
    /// # Returns
    /// * `Ok(Task)` - The created task with its assigned ID
    /// * `Err(TaskError::Validation)` - If the payload is invalid
    /// * `Err(TaskError::DuplicateTitle)` - If the title already exists
    /// * `Err(TaskError::Constraint)` - If the priority is outside [1, 5]
    /// * `Err(TaskError::Database)` - If the database operation fails
    async fn create(&self, task: NewTask) -> Result<Task>;

    /// Replace an existing task
    ///
    /// Overwrites all five mutable fields from the payload; partial updates
    /// are not supported.
    ///
    /// # Arguments
    /// * `id` - The task ID to update
    /// * `task` - The full replacement payload
    ///
    /// # Returns
    /// * `Ok(Task)` - The updated task
    /// * `Err(TaskError::NotFound)` - If the task doesn't exist
    /// * `Err(TaskError::Validation)` - If the payload is invalid
    /// * `Err(TaskError::DuplicateTitle)` - If the new title collides with another row
    /// * `Err(TaskError::Database)` - If the database operation fails
    async fn update(&self, id: i64, task: NewTask) -> Result<Task>;

    /// Get a task by its numeric ID
    ///
    /// # Returns
    /// * `Ok(Some(Task))` - The task if found
    /// * `Ok(None)` - If no task exists with that ID
    /// * `Err(TaskError::Database)` - If the database operation fails
    async fn get_by_id(&self, id: i64) -> Result<Option<Task>>;

    /// List tasks matching the given query
    ///
    /// Applies the search and completion filters, orders the rows (by due
    /// date descending when the query carries no sort), fetches the requested
    /// page and separately counts all matching rows for the pagination
    /// metadata.
    ///
    /// # Returns
    /// * `Ok(TaskPage)` - The matching page (may be empty) plus counts
    /// * `Err(TaskError::Validation)` - If the query parameters are invalid
    /// * `Err(TaskError::Database)` - If the database operation fails
    async fn list(&self, query: TaskQuery) -> Result<TaskPage>;

    /// Delete a task permanently
    ///
    /// # Returns
    /// * `Ok(())` - The row was removed
    /// * `Err(TaskError::NotFound)` - If the task doesn't exist
    /// * `Err(TaskError::Database)` - If the database operation fails
    async fn delete(&self, id: i64) -> Result<()>;

    /// Get repository health status for monitoring
    ///
    /// # Returns
    /// * `Ok(())` - Repository is healthy and connected
    /// * `Err(TaskError::Database)` - Repository is unhealthy
    async fn health_check(&self) -> Result<()>;
}
