//! Error types for the todo service.
//!
//! # Design
//! One enum covers the whole service so the server can map every failure to
//! an HTTP status in a single place. `NotFound` gets a dedicated variant
//! because callers frequently distinguish "the record does not exist" from
//! "the input was bad". Storage failures carry only a message — the store
//! backend is interchangeable and its error types should not leak upward.

use thiserror::Error as ThisError;

/// Errors returned by the store adapter and the import/export pipelines.
#[derive(Debug, ThisError)]
pub enum Error {
    /// No record exists with the requested id.
    #[error("todo not found")]
    NotFound,

    /// A required field was missing, empty, or a request body was malformed.
    #[error("{0}")]
    Validation(String),

    /// A required query or form parameter was absent.
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// The underlying store was unavailable or rejected the operation.
    #[error("storage error: {0}")]
    Storage(String),

    /// The CSV encoder failed while producing an export line.
    #[error("export failed: {0}")]
    Export(String),
}

impl Error {
    /// Shorthand for a `Validation` error from any displayable cause.
    pub fn validation(cause: impl ToString) -> Self {
        Self::Validation(cause.to_string())
    }
}
