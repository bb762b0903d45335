//! Maps domain errors onto HTTP responses.
//!
//! # Design
//! Handlers return `Result<_, ApiError>` and let `?` do the translation.
//! Every user-visible failure renders as a JSON object with a
//! human-readable `message`, per the status table in the API docs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use todo_core::Error;

/// Wrapper giving `todo_core::Error` an HTTP rendering.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::Validation(_) | Error::MissingParameter(_) => StatusCode::BAD_REQUEST,
            Error::Storage(_) | Error::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (status, Json(json!({ "message": self.0.to_string() }))).into_response()
    }
}
