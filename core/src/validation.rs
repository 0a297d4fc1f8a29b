use crate::{
    error::{Result, TaskError},
    models::{
        NewTask, TaskQuery, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN, PRIORITY_MAX, PRIORITY_MIN,
    },
};

/// Validation utilities for task payloads and list parameters.
///
/// Payload validation runs before any store round trip; the store's own
/// constraints (unique title, priority range check) remain the backstop for
/// anything that slips through or races.
pub struct TaskValidator;

impl TaskValidator {
    /// Validate a task title
    ///
    /// Titles must not be empty or only whitespace and are limited to 50
    /// characters.
    pub fn validate_title(title: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(TaskError::empty_field("title"));
        }

        if title.chars().count() > MAX_TITLE_LEN {
            return Err(TaskError::field_too_long("title", MAX_TITLE_LEN));
        }

        Ok(())
    }

    /// Validate an optional task description
    ///
    /// Absent descriptions are fine; present ones are limited to 120
    /// characters.
    pub fn validate_description(description: Option<&str>) -> Result<()> {
        if let Some(description) = description {
            if description.chars().count() > MAX_DESCRIPTION_LEN {
                return Err(TaskError::field_too_long(
                    "description",
                    MAX_DESCRIPTION_LEN,
                ));
            }
        }

        Ok(())
    }

    /// Validate a priority value against the [1, 5] range
    pub fn validate_priority(priority: i64) -> Result<()> {
        if !(PRIORITY_MIN..=PRIORITY_MAX).contains(&priority) {
            return Err(TaskError::priority_out_of_range(priority));
        }

        Ok(())
    }

    /// Validate a complete create/update payload
    pub fn validate_new_task(task: &NewTask) -> Result<()> {
        Self::validate_title(&task.title)?;
        Self::validate_description(task.description.as_deref())?;
        Self::validate_priority(task.priority)?;
        Ok(())
    }

    /// Validate list parameters
    ///
    /// A non-positive limit would make the page-count division undefined, so
    /// it is rejected here rather than clamped.
    pub fn validate_query(query: &TaskQuery) -> Result<()> {
        if query.limit < 1 {
            return Err(TaskError::Validation(format!(
                "limit must be positive, got {}",
                query.limit
            )));
        }

        Ok(())
    }
}
