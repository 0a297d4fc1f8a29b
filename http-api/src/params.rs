//! Query-string parameter DTOs and their conversion into validated domain
//! queries.

use serde::Deserialize;
use task_core::{
    error::Result,
    models::{SortField, SortOrder, TaskQuery, TaskSort, DEFAULT_LIMIT, DEFAULT_PAGE_INDEX},
    validation::TaskValidator,
};

/// Raw list parameters as they arrive on the query string.
///
/// `isCompleted` deserializes as a strict bool: only the literals `true` and
/// `false` parse, anything else is rejected by the extractor before a handler
/// runs. `sortField`/`sortOrder` stay strings here and are resolved against
/// the enumerated sort set during conversion.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default = "default_page_index")]
    pub page_index: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub search: String,
    pub is_completed: Option<bool>,
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
}

fn default_page_index() -> i64 {
    DEFAULT_PAGE_INDEX
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page_index: DEFAULT_PAGE_INDEX,
            limit: DEFAULT_LIMIT,
            search: String::new(),
            is_completed: None,
            sort_field: None,
            sort_order: None,
        }
    }
}

impl ListQuery {
    /// Resolve the raw parameters into a validated [`TaskQuery`].
    ///
    /// An unknown `sortField` and a non-positive `limit` are validation
    /// errors. An empty `sortField` string counts as absent, like the rest of
    /// the optional parameters.
    pub fn into_task_query(self) -> Result<TaskQuery> {
        let sort = match self.sort_field.as_deref() {
            None | Some("") => None,
            Some(name) => Some(TaskSort {
                field: SortField::parse(name)?,
                order: SortOrder::from_param(self.sort_order.as_deref()),
            }),
        };

        let query = TaskQuery {
            page_index: self.page_index,
            limit: self.limit,
            search: self.search,
            is_completed: self.is_completed,
            sort,
        };

        TaskValidator::validate_query(&query)?;

        Ok(query)
    }
}
