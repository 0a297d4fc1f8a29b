use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite};
use task_core::{
    error::TaskError,
    models::{Task, TaskQuery},
};

/// Column list shared by every task-returning statement.
pub const TASK_COLUMNS: &str = "id, title, description, is_completed, due_date, priority";

/// Convert a SQLite row to the Task model
pub fn row_to_task(row: &SqliteRow) -> Task {
    Task {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        is_completed: row.get("is_completed"),
        due_date: row.get("due_date"),
        priority: row.get("priority"),
    }
}

/// Convert a SQLx error from a read operation to a TaskError
pub fn sqlx_error_to_task_error(err: sqlx::Error) -> TaskError {
    match &err {
        sqlx::Error::Database(db_err) => {
            TaskError::Database(format!("Database error: {}", db_err.message()))
        }
        sqlx::Error::RowNotFound => {
            // Absent rows are handled at the application level, not here
            TaskError::Database("Unexpected RowNotFound error".to_string())
        }
        sqlx::Error::PoolTimedOut => TaskError::Database("Connection pool timeout".to_string()),
        sqlx::Error::Io(io_err) => TaskError::Database(format!("Database I/O error: {io_err}")),
        _ => TaskError::Database(format!("Database operation failed: {err}")),
    }
}

/// Convert a SQLx error from an insert/update to a TaskError
///
/// Distinguishes the two constraint failures the schema can raise: a title
/// collision on the unique index and a priority outside the CHECK range.
pub fn sqlx_write_error(err: sqlx::Error, title: &str) -> TaskError {
    if let sqlx::Error::Database(db_err) = &err {
        let message = db_err.message();

        if message.contains("UNIQUE constraint failed") && message.contains("tasks.title") {
            return TaskError::DuplicateTitle(title.to_string());
        }

        if message.contains("CHECK constraint failed") {
            return TaskError::Constraint(format!("Store rejected write: {message}"));
        }
    }

    sqlx_error_to_task_error(err)
}

/// Push the search and completion filters onto a query
///
/// The search filter matches the lowercased pattern against title OR
/// description with wildcards on both ends; a NULL description never
/// matches.
fn push_filter_clauses(query_builder: &mut QueryBuilder<'_, Sqlite>, query: &TaskQuery) {
    let mut has_conditions = false;

    if !query.search.is_empty() {
        let pattern = format!("%{}%", query.search.to_lowercase());
        query_builder.push(" WHERE (LOWER(title) LIKE ");
        query_builder.push_bind(pattern.clone());
        query_builder.push(" OR LOWER(description) LIKE ");
        query_builder.push_bind(pattern);
        query_builder.push(")");
        has_conditions = true;
    }

    if let Some(is_completed) = query.is_completed {
        if has_conditions {
            query_builder.push(" AND ");
        } else {
            query_builder.push(" WHERE ");
        }
        query_builder.push("is_completed = ");
        query_builder.push_bind(is_completed);
    }
}

/// Build the page query: filters, ordering, bound LIMIT/OFFSET
///
/// The ORDER BY column comes from the validated `SortField` set, never from
/// request text. Without an explicit sort the listing orders by due date,
/// newest first.
pub fn build_list_query(query: &TaskQuery) -> QueryBuilder<'static, Sqlite> {
    let mut query_builder: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {TASK_COLUMNS} FROM tasks"));

    push_filter_clauses(&mut query_builder, query);

    match query.sort {
        Some(sort) => {
            query_builder.push(format!(
                " ORDER BY {} {}",
                sort.field.column(),
                sort.order.keyword()
            ));
        }
        None => {
            query_builder.push(" ORDER BY due_date DESC");
        }
    }

    query_builder.push(" LIMIT ");
    query_builder.push_bind(query.limit);
    query_builder.push(" OFFSET ");
    query_builder.push_bind(query.offset());

    query_builder
}

/// Build the count query over the same filters, independent of pagination
pub fn build_count_query(query: &TaskQuery) -> QueryBuilder<'static, Sqlite> {
    let mut query_builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT COUNT(*) AS total FROM tasks");

    push_filter_clauses(&mut query_builder, query);

    query_builder
}
