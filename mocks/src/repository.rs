//! Mock implementation of the TaskRepository trait
//!
//! Provides a thread-safe in-memory repository with:
//! - Error injection capabilities
//! - Call tracking for verification
//! - The same constraint behavior as the SQLite store

use async_trait::async_trait;
use parking_lot::Mutex;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicI64, Ordering as AtomicOrdering},
    Arc,
};
use task_core::{
    models::{SortField, SortOrder},
    NewTask, Result, Task, TaskError, TaskPage, TaskQuery, TaskRepository, TaskValidator,
};

/// In-memory TaskRepository for testing
///
/// Mirrors the store semantics the handlers rely on: duplicate titles and
/// out-of-range priorities are rejected, listings filter/sort/paginate, and
/// deletes are hard. Errors can be injected to exercise failure paths.
pub struct MockTaskRepository {
    tasks: Arc<Mutex<HashMap<i64, Task>>>,
    next_id: Arc<AtomicI64>,
    error_injection: Arc<Mutex<Option<TaskError>>>,
    call_history: Arc<Mutex<Vec<String>>>,
}

impl Default for MockTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTaskRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
            error_injection: Arc::new(Mutex::new(None)),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create mock repository with pre-populated tasks
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let mut task_map = HashMap::new();
        let mut max_id = 0;

        for task in tasks {
            if task.id > max_id {
                max_id = task.id;
            }
            task_map.insert(task.id, task);
        }

        Self {
            tasks: Arc::new(Mutex::new(task_map)),
            next_id: Arc::new(AtomicI64::new(max_id + 1)),
            error_injection: Arc::new(Mutex::new(None)),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Inject an error for the next operation
    pub fn inject_error(&self, error: TaskError) {
        *self.error_injection.lock() = Some(error);
    }

    /// Clear error injection
    pub fn clear_error(&self) {
        *self.error_injection.lock() = None;
    }

    /// Get history of called methods
    pub fn call_history(&self) -> Vec<String> {
        self.call_history.lock().clone()
    }

    /// Clear call history
    pub fn clear_history(&self) {
        self.call_history.lock().clear();
    }

    /// Assert method was called
    pub fn assert_called(&self, method: &str) {
        let history = self.call_history.lock();
        assert!(
            history.iter().any(|call| call.contains(method)),
            "Method '{}' was not called. Call history: {:?}",
            method,
            *history
        );
    }

    /// Check if an error should be injected, consuming it if so
    fn check_error_injection(&self) -> Result<()> {
        let mut error_opt = self.error_injection.lock();
        if let Some(error) = error_opt.take() {
            return Err(error);
        }
        Ok(())
    }

    /// Record method call with parameters in history
    fn record_call(&self, method: &str, params: &str) {
        self.call_history.lock().push(format!("{method}({params})"));
    }
}

fn compare_by_field(a: &Task, b: &Task, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Title => a.title.cmp(&b.title),
        SortField::Description => a.description.cmp(&b.description),
        SortField::IsCompleted => a.is_completed.cmp(&b.is_completed),
        SortField::DueDate => a.due_date.cmp(&b.due_date),
        SortField::Priority => a.priority.cmp(&b.priority),
    }
}

fn matches_search(task: &Task, needle: &str) -> bool {
    task.title.to_lowercase().contains(needle)
        || task
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
}

#[async_trait]
impl TaskRepository for MockTaskRepository {
    async fn create(&self, task: NewTask) -> Result<Task> {
        self.record_call("create", &format!("title={}", task.title));

        self.check_error_injection()?;
        TaskValidator::validate_new_task(&task)?;

        let mut tasks = self.tasks.lock();
        if tasks.values().any(|t| t.title == task.title) {
            return Err(TaskError::DuplicateTitle(task.title));
        }

        let id = self.next_id.fetch_add(1, AtomicOrdering::SeqCst);
        let new_task = Task {
            id,
            title: task.title,
            description: task.description,
            is_completed: task.is_completed,
            due_date: task.due_date,
            priority: task.priority,
        };

        tasks.insert(id, new_task.clone());

        Ok(new_task)
    }

    async fn update(&self, id: i64, task: NewTask) -> Result<Task> {
        self.record_call("update", &format!("id={id}"));

        self.check_error_injection()?;
        TaskValidator::validate_new_task(&task)?;

        let mut tasks = self.tasks.lock();
        if !tasks.contains_key(&id) {
            return Err(TaskError::not_found_id(id));
        }
        if tasks
            .values()
            .any(|t| t.id != id && t.title == task.title)
        {
            return Err(TaskError::DuplicateTitle(task.title));
        }

        let row = tasks.get_mut(&id).ok_or_else(|| TaskError::not_found_id(id))?;
        row.title = task.title;
        row.description = task.description;
        row.is_completed = task.is_completed;
        row.due_date = task.due_date;
        row.priority = task.priority;

        Ok(row.clone())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Task>> {
        self.record_call("get_by_id", &format!("id={id}"));

        self.check_error_injection()?;

        Ok(self.tasks.lock().get(&id).cloned())
    }

    async fn list(&self, query: TaskQuery) -> Result<TaskPage> {
        self.record_call("list", &format!("page_index={}", query.page_index));

        self.check_error_injection()?;
        TaskValidator::validate_query(&query)?;

        let needle = query.search.to_lowercase();
        let mut rows: Vec<Task> = self
            .tasks
            .lock()
            .values()
            .filter(|t| needle.is_empty() || matches_search(t, &needle))
            .filter(|t| query.is_completed.map_or(true, |wanted| t.is_completed == wanted))
            .cloned()
            .collect();

        match query.sort {
            Some(sort) => rows.sort_by(|a, b| {
                let ordering = compare_by_field(a, b, sort.field);
                match sort.order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            }),
            // Default order: due date, newest first (absent dates last)
            None => rows.sort_by(|a, b| b.due_date.cmp(&a.due_date)),
        }

        let total = rows.len() as i64;
        let page: Vec<Task> = rows
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit as usize)
            .collect();

        Ok(TaskPage::new(page, total, query.limit))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.record_call("delete", &format!("id={id}"));

        self.check_error_injection()?;

        if self.tasks.lock().remove(&id).is_none() {
            return Err(TaskError::not_found_id(id));
        }

        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        self.record_call("health_check", "");

        self.check_error_injection()
    }
}
