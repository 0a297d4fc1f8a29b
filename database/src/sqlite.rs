use crate::common::{
    build_count_query, build_list_query, row_to_task, sqlx_error_to_task_error, sqlx_write_error,
    TASK_COLUMNS,
};
use async_trait::async_trait;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Row, Sqlite, SqlitePool};
use task_core::{
    error::{Result, TaskError},
    models::{NewTask, Task, TaskPage, TaskQuery},
    repository::TaskRepository,
    validation::TaskValidator,
};

/// SQLite implementation of the TaskRepository trait
///
/// Persists tasks through a pooled sqlx connection. Each operation acquires a
/// connection from the pool for the duration of one round trip and releases
/// it on every exit path.
#[derive(Debug, Clone)]
pub struct SqliteTaskRepository {
    pool: SqlitePool,
}

impl SqliteTaskRepository {
    /// Create a new SQLite repository with the given database URL
    ///
    /// # Arguments
    /// * `database_url` - SQLite database URL (file path or `:memory:`)
    ///
    /// # Returns
    /// * `Ok(SqliteTaskRepository)` - Successfully connected repository
    /// * `Err(TaskError::Database)` - If connection fails
    ///
    /// # Examples
    /// ```rust,no_run
    /// use database::SqliteTaskRepository;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// // In-memory database for testing
    /// let repo = SqliteTaskRepository::new(":memory:").await?;
    ///
    /// // File-based database
    /// let repo = SqliteTaskRepository::new("sqlite:///tmp/tasks.db").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(database_url: &str) -> Result<Self> {
        let in_memory = database_url.starts_with(":memory:");

        let db_url = if in_memory || database_url.starts_with("sqlite://") {
            database_url.to_string()
        } else {
            format!("sqlite://{database_url}")
        };

        // Create the database file if it doesn't exist yet
        if !in_memory && !Sqlite::database_exists(&db_url).await.unwrap_or(false) {
            match Sqlite::create_database(&db_url).await {
                Ok(_) => tracing::info!("Database created successfully"),
                Err(error) => {
                    tracing::error!("Error creating database: {}", error);
                    return Err(TaskError::Database(format!(
                        "Failed to create database: {error}"
                    )));
                }
            }
        }

        let connect_options = if in_memory {
            sqlx::sqlite::SqliteConnectOptions::new()
                .filename(":memory:")
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Memory)
                .busy_timeout(std::time::Duration::from_secs(5))
                .foreign_keys(true)
        } else {
            sqlx::sqlite::SqliteConnectOptions::new()
                .filename(db_url.replace("sqlite://", ""))
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .busy_timeout(std::time::Duration::from_secs(5))
                .foreign_keys(true)
        };

        // An in-memory database exists per connection, so the pool must not
        // hand out a second one or reap the first
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(sqlx_error_to_task_error)?;

        Ok(Self { pool })
    }

    /// Run database migrations
    ///
    /// Applies all pending migrations to bring the schema up to date. Call
    /// once after creating a repository instance.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations/sqlite")
            .run(&self.pool)
            .await
            .map_err(|e| TaskError::Database(format!("Migration failed: {e}")))?;

        tracing::info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get access to the underlying database pool for custom operations
    ///
    /// Primarily intended for tests that need direct SQL execution.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn create(&self, task: NewTask) -> Result<Task> {
        TaskValidator::validate_new_task(&task)?;

        let row = sqlx::query(&format!(
            "INSERT INTO tasks (title, description, is_completed, due_date, priority) \
             VALUES (?, ?, ?, ?, ?) \
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.is_completed)
        .bind(task.due_date)
        .bind(task.priority)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| sqlx_write_error(e, &task.title))?;

        Ok(row_to_task(&row))
    }

    async fn update(&self, id: i64, task: NewTask) -> Result<Task> {
        TaskValidator::validate_new_task(&task)?;

        // Full overwrite of every mutable field; absent rows are a 404, not
        // an upsert
        if self.get_by_id(id).await?.is_none() {
            return Err(TaskError::not_found_id(id));
        }

        let row = sqlx::query(&format!(
            "UPDATE tasks \
             SET title = ?, description = ?, is_completed = ?, due_date = ?, priority = ? \
             WHERE id = ? \
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.is_completed)
        .bind(task.due_date)
        .bind(task.priority)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| sqlx_write_error(e, &task.title))?;

        Ok(row_to_task(&row))
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Task>> {
        let result = sqlx::query(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(sqlx_error_to_task_error)?;

        Ok(result.map(|row| row_to_task(&row)))
    }

    async fn list(&self, query: TaskQuery) -> Result<TaskPage> {
        TaskValidator::validate_query(&query)?;

        tracing::debug!(?query, "listing tasks");

        let mut page_query = build_list_query(&query);
        let mut count_query = build_count_query(&query);

        // The page and its unpaginated match count are independent reads
        let (rows, count_row) = tokio::join!(
            page_query.build().fetch_all(&self.pool),
            count_query.build().fetch_one(&self.pool),
        );

        let rows = rows.map_err(sqlx_error_to_task_error)?;
        let total: i64 = count_row.map_err(sqlx_error_to_task_error)?.get("total");

        let tasks = rows.iter().map(row_to_task).collect();

        Ok(TaskPage::new(tasks, total, query.limit))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        if self.get_by_id(id).await?.is_none() {
            return Err(TaskError::not_found_id(id));
        }

        sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(sqlx_error_to_task_error)?;

        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        // Simple query to verify database connectivity
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(sqlx_error_to_task_error)?;

        Ok(())
    }
}
