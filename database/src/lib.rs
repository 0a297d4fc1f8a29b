//! Database crate for the task-list backend
//!
//! Provides the SQLite implementation of the `TaskRepository` trait: pooled
//! connections, embedded startup migrations, and the dynamic list-query
//! construction behind the paginated/filtered/sorted listing.
//!
//! # Usage
//!
//! ```rust
//! use database::SqliteTaskRepository;
//! use task_core::repository::TaskRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create repository (in-memory for testing)
//!     let repo = SqliteTaskRepository::new(":memory:").await?;
//!
//!     // Run migrations
//!     repo.migrate().await?;
//!
//!     // Repository is ready to use
//!     repo.health_check().await?;
//!
//!     Ok(())
//! }
//! ```

mod common;
mod sqlite;

pub use sqlite::SqliteTaskRepository;

// Re-export commonly used types from task-core for convenience
pub use task_core::{
    error::{Result, TaskError},
    models::{NewTask, SortField, SortOrder, Task, TaskPage, TaskQuery, TaskSort},
    repository::TaskRepository,
};
