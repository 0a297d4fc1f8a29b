use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TaskError};

/// Maximum length of a task title in characters.
pub const MAX_TITLE_LEN: usize = 50;
/// Maximum length of a task description in characters.
pub const MAX_DESCRIPTION_LEN: usize = 120;
/// Lowest allowed priority value.
pub const PRIORITY_MIN: i64 = 1;
/// Highest allowed priority value.
pub const PRIORITY_MAX: i64 = 5;
/// Priority assigned when a payload omits the field, matching the column default.
pub const DEFAULT_PRIORITY: i64 = 3;
/// First page of a listing (pages are 1-based).
pub const DEFAULT_PAGE_INDEX: i64 = 1;
/// Page size used when the request does not specify one.
pub const DEFAULT_LIMIT: i64 = 10;

/// A persisted task row.
///
/// Tasks are the sole entity of the system: a to-do item with a unique title,
/// an optional free-form description, a completion flag, an optional due date
/// and a priority in `[1, 5]`. The `id` is assigned by the store on insert and
/// never changes afterwards.
///
/// Serialized with camelCase field names, matching the HTTP wire shape:
///
/// ```rust
/// use task_core::models::Task;
///
/// let task = Task {
///     id: 1,
///     title: "Write report".to_string(),
///     description: Some("Quarterly numbers".to_string()),
///     is_completed: false,
///     due_date: None,
///     priority: 2,
/// };
///
/// let json = serde_json::to_value(&task).unwrap();
/// assert_eq!(json["isCompleted"], false);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Auto-increment primary key
    pub id: i64,
    /// Unique task title (max 50 characters)
    pub title: String,
    /// Optional description (max 120 characters)
    pub description: Option<String>,
    /// Completion flag
    pub is_completed: bool,
    /// Optional due date
    pub due_date: Option<NaiveDate>,
    /// Priority, 1 through 5
    pub priority: i64,
}

/// Payload for creating a task, and for replacing one on update.
///
/// Updates overwrite all five mutable fields at once; partial updates are not
/// supported, so create and update share this type. Omitted `isCompleted` and
/// `priority` take the column defaults (`false` / `3`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default = "default_priority")]
    pub priority: i64,
}

fn default_priority() -> i64 {
    DEFAULT_PRIORITY
}

impl NewTask {
    /// Create a payload with just a title and the field defaults.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            is_completed: false,
            due_date: None,
            priority: DEFAULT_PRIORITY,
        }
    }
}

/// The enumerated set of fields a listing may sort by.
///
/// Requests name fields by their JSON spelling (`"dueDate"`, `"isCompleted"`).
/// Anything outside this set is a validation error, never a silent fallback
/// or an internal lookup failure.
#[derive(Debug, Clone, Copy, Hash, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Id,
    Title,
    Description,
    IsCompleted,
    DueDate,
    Priority,
}

impl SortField {
    /// Parse the JSON-spelled field name used in query strings.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "id" => Ok(SortField::Id),
            "title" => Ok(SortField::Title),
            "description" => Ok(SortField::Description),
            "isCompleted" => Ok(SortField::IsCompleted),
            "dueDate" => Ok(SortField::DueDate),
            "priority" => Ok(SortField::Priority),
            other => Err(TaskError::unknown_sort_field(other)),
        }
    }

    /// Column name used in ORDER BY clauses. Static by construction, so sort
    /// columns can never be injected from request text.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Title => "title",
            SortField::Description => "description",
            SortField::IsCompleted => "is_completed",
            SortField::DueDate => "due_date",
            SortField::Priority => "priority",
        }
    }
}

impl std::str::FromStr for SortField {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Sort direction for a listing.
#[derive(Debug, Clone, Copy, Hash, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Interpret the `sortOrder` request parameter: exactly `"desc"` selects
    /// descending, any other value (including absent) ascending.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    /// SQL keyword for this direction.
    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// A sort selection: which field, which direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSort {
    pub field: SortField,
    pub order: SortOrder,
}

/// Validated parameters for a task listing.
///
/// `page_index` is 1-based; an index of 0 or below clamps the computed offset
/// to zero rather than reaching the store with a negative value. `limit` must
/// be at least 1; callers reject anything lower before constructing a query.
/// When `sort` is `None` the listing orders by due date, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskQuery {
    pub page_index: i64,
    pub limit: i64,
    /// Case-insensitive substring matched against title and description.
    /// Empty means no search filter.
    pub search: String,
    pub is_completed: Option<bool>,
    pub sort: Option<TaskSort>,
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self {
            page_index: DEFAULT_PAGE_INDEX,
            limit: DEFAULT_LIMIT,
            search: String::new(),
            is_completed: None,
            sort: None,
        }
    }
}

impl TaskQuery {
    /// Row offset of the requested page, clamped to zero.
    pub fn offset(&self) -> i64 {
        ((self.page_index - 1) * self.limit).max(0)
    }
}

/// One page of a listing plus its pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskPage {
    pub data: Vec<Task>,
    /// Number of pages the filtered result set spans at the requested limit.
    pub page_count: i64,
    /// Total rows matching the filters, independent of pagination.
    pub total_count: i64,
}

impl TaskPage {
    /// Assemble a page from fetched rows and the unpaginated match count.
    ///
    /// `limit` must be positive; query validation guarantees this upstream.
    pub fn new(data: Vec<Task>, total_count: i64, limit: i64) -> Self {
        let page_count = total_count / limit + i64::from(total_count % limit > 0);
        Self {
            data,
            page_count,
            total_count,
        }
    }
}
