use thiserror::Error;

/// Result type alias for task operations
pub type Result<T> = std::result::Result<T, TaskError>;

/// Error types for the task backend.
///
/// These cover every failure mode of the five CRUD operations, from request
/// validation through store constraint violations. Each variant maps to an
/// HTTP status code for API responses.
///
/// # Examples
///
/// ```rust
/// use task_core::error::TaskError;
///
/// let not_found = TaskError::not_found_id(42);
/// assert!(not_found.is_not_found());
/// assert_eq!(not_found.status_code(), 404);
///
/// let duplicate = TaskError::DuplicateTitle("Buy milk".to_string());
/// assert_eq!(duplicate.status_code(), 409);
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Task not found by the given identifier
    #[error("Task not found: {0}")]
    NotFound(String),

    /// Invalid request input (missing/malformed fields, bad list parameters)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A task with this title already exists
    #[error("Task title already exists: {0}")]
    DuplicateTitle(String),

    /// A store constraint rejected the write (e.g. priority out of range)
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Database operation error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal system error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TaskError {
    /// Create a not found error for a task ID
    pub fn not_found_id(id: i64) -> Self {
        Self::NotFound(format!("Task with ID {id} not found"))
    }

    /// Create a validation error for an empty required field
    pub fn empty_field(field: &str) -> Self {
        Self::Validation(format!("Field '{field}' cannot be empty"))
    }

    /// Create a validation error for a field over its length limit
    pub fn field_too_long(field: &str, max: usize) -> Self {
        Self::Validation(format!(
            "Field '{field}' must be at most {max} characters long"
        ))
    }

    /// Create a validation error for an unknown sort field name
    pub fn unknown_sort_field(name: &str) -> Self {
        Self::Validation(format!("Unknown sort field: '{name}'"))
    }

    /// Create a constraint error for a priority outside [1, 5]
    pub fn priority_out_of_range(priority: i64) -> Self {
        Self::Constraint(format!(
            "Priority must be between 1 and 5, got {priority}"
        ))
    }

    /// Check if this error indicates a not found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, TaskError::NotFound(_))
    }

    /// Check if this error indicates a validation problem
    pub fn is_validation(&self) -> bool {
        matches!(self, TaskError::Validation(_))
    }

    /// Check if this error indicates a store constraint violation
    pub fn is_constraint(&self) -> bool {
        matches!(
            self,
            TaskError::Constraint(_) | TaskError::DuplicateTitle(_)
        )
    }

    /// Check if this error indicates a database problem
    pub fn is_database(&self) -> bool {
        matches!(self, TaskError::Database(_))
    }

    /// Convert to the HTTP status code surfaced by the API layer
    pub fn status_code(&self) -> u16 {
        match self {
            TaskError::NotFound(_) => 404,
            TaskError::Validation(_) => 400,
            TaskError::DuplicateTitle(_) => 409,
            TaskError::Constraint(_) => 422,
            TaskError::Database(_) => 500,
            TaskError::Configuration(_) => 500,
            TaskError::Internal(_) => 500,
        }
    }
}
