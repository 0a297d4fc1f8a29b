use anyhow::{Context, Result};
use database::SqliteTaskRepository;
use http_api::ApiServer;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;

/// Create a task repository based on the complete configuration
pub async fn create_repository(config: &Config) -> Result<Arc<SqliteTaskRepository>> {
    let database_url = config.database_url();
    info!("Initializing SQLite repository at: {}", database_url);

    let repo = SqliteTaskRepository::new(&database_url)
        .await
        .context("Failed to create SQLite repository")?;

    info!("Running database migrations");
    repo.migrate()
        .await
        .context("Failed to run database migrations")?;

    info!("Task repository created successfully");
    Ok(Arc::new(repo))
}

/// Create and configure the REST server
pub fn create_server(repository: Arc<SqliteTaskRepository>) -> ApiServer<SqliteTaskRepository> {
    ApiServer::new(repository)
}

/// Initialize the complete application
pub async fn initialize_app(config: &Config) -> Result<ApiServer<SqliteTaskRepository>> {
    info!("Initializing application");

    let repository = create_repository(config)
        .await
        .context("Failed to create repository")?;

    let server = create_server(repository);

    info!("Application initialized successfully");
    Ok(server)
}

/// Ensure the database directory exists using config
pub fn ensure_database_directory_from_config(config: &Config) -> Result<()> {
    ensure_database_directory(&config.database_url())
}

/// Ensure the directory holding a file-based database exists
pub fn ensure_database_directory(database_url: &str) -> Result<()> {
    if let Some(db_path) = database_url.strip_prefix("sqlite://") {
        let db_path = Path::new(db_path);

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory {}", parent.display())
                })?;
                info!("Created database directory: {}", parent.display());
            }
        }
    }

    Ok(())
}
