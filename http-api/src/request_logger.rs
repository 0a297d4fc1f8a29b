//! Structured request logging middleware for the REST server
//!
//! Emits one tracing line per request with timing and a truncated query
//! string.

use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Maximum length of the logged query string before truncation
const MAX_QUERY_LENGTH: usize = 120;

/// Truncation suffix for long query strings
const TRUNCATION_SUFFIX: &str = "...";

/// Request logging middleware
///
/// Logs requests as
/// `method=GET path=/task query="isCompleted=true" status=200 elapsed_ms=3`.
pub async fn request_logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let query = request
        .uri()
        .query()
        .map(|q| truncate_string(q, MAX_QUERY_LENGTH))
        .unwrap_or_default();

    let response = next.run(request).await;

    let elapsed_ms = start_time.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    if query.is_empty() {
        tracing::info!(target: "http", %method, %path, status, elapsed_ms, "request handled");
    } else {
        tracing::info!(
            target: "http",
            %method,
            %path,
            %query,
            status,
            elapsed_ms,
            "request handled"
        );
    }

    response
}

/// Truncate a string to max length with suffix
fn truncate_string(input: &str, max_length: usize) -> String {
    if input.len() <= max_length {
        input.to_string()
    } else {
        let truncated_length = max_length.saturating_sub(TRUNCATION_SUFFIX.len());
        format!("{}{}", &input[..truncated_length], TRUNCATION_SUFFIX)
    }
}
