//! Task Core Library
//!
//! This crate provides the domain models, validation rules and trait
//! interfaces for the task-list backend. All other crates depend on the
//! types and interfaces defined here.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`models`] - Core domain models (Task, NewTask, TaskQuery, TaskPage)
//! - [`error`] - Error types and result handling
//! - [`repository`] - Repository trait for data persistence
//! - [`validation`] - Payload and query validation utilities
//!
//! # Example
//!
//! ```rust
//! use task_core::{models::NewTask, validation::TaskValidator};
//!
//! let mut payload = NewTask::new("Water the plants");
//! payload.priority = 2;
//!
//! // Validate the payload before persisting it
//! TaskValidator::validate_new_task(&payload).unwrap();
//! ```

pub mod error;
pub mod models;
pub mod repository;
pub mod validation;

// Re-export commonly used types at the crate root for convenience
pub use error::{Result, TaskError};
pub use models::{
    NewTask, SortField, SortOrder, Task, TaskPage, TaskQuery, TaskSort,
};
pub use repository::TaskRepository;
pub use validation::TaskValidator;
