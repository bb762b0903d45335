//! Axum HTTP surface for the todo service.
//!
//! # Overview
//! Wires the deterministic `todo_core` pipelines to HTTP: an in-memory
//! record store held as shared state, thin handlers mapping verbs and paths
//! to store calls, and the CSV upload/download endpoints.
//!
//! # Design
//! - The store is constructed explicitly and passed into `app`, never
//!   reached through process-global state, so tests build a router around a
//!   pre-seeded store without any setup ceremony.
//! - Each request is handled independently; the store's lock is the only
//!   cross-request coordination, and no handler retries a failed operation.

pub mod error;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

pub use error::ApiError;
pub use store::{QueryField, TodoStore};

/// Builds the router over an explicitly provided store handle.
pub fn app(store: Arc<TodoStore>) -> Router {
    routes::router(store)
}

/// Serves a fresh store on the given listener until the process exits.
pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    let store = Arc::new(TodoStore::new());
    axum::serve(listener, app(store)).await
}
