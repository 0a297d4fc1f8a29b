//! REST layer for the task-list backend
//!
//! Exposes the task CRUD operations over HTTP/JSON:
//!
//! | Method | Path        | Purpose            |
//! |--------|-------------|--------------------|
//! | POST   | `/task`     | create             |
//! | GET    | `/task`     | list (paginated)   |
//! | GET    | `/task/:id` | get one            |
//! | PUT    | `/task/:id` | full update        |
//! | DELETE | `/task/:id` | delete             |
//! | GET    | `/health`   | service health     |
//!
//! The server is generic over any [`task_core::TaskRepository`], so tests can
//! run it against an in-memory repository and production wires in SQLite.

pub mod error;
pub mod handlers;
pub mod params;
pub mod request_logger;
pub mod server;

pub use error::ApiError;
pub use handlers::{HealthStatus, TaskApi};
pub use params::ListQuery;
pub use server::{ApiServer, ApiState};
