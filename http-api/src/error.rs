//! Error handling for the REST layer
//!
//! Maps internal task errors to HTTP status codes and JSON error bodies.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use task_core::TaskError;
use thiserror::Error;

/// Transport-level wrapper around [`TaskError`].
///
/// Handlers return this from every fallible path; the `IntoResponse`
/// implementation renders the status code the domain error maps to plus a
/// `{"error": "..."}` body.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct ApiError(#[from] pub TaskError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = Json(json!({ "error": self.0.to_string() }));

        (status, body).into_response()
    }
}
