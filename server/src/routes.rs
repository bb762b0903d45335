//! Request handlers: thin mapping between verbs/paths and the store and
//! CSV pipelines.
//!
//! # Design
//! Handlers hold no logic beyond input validation and result translation.
//! Malformed JSON bodies map to 400 via explicit `JsonRejection` handling
//! rather than axum's default 422, and a non-UUID path id maps to 400
//! through the `Path<Uuid>` extractor.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::stream;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use todo_core::{
    parse_import, CsvExport, Error, NewTodo, RowPolicy, TodoItem, TodoPatch, EXPORT_FILENAME,
};

use crate::error::ApiError;
use crate::store::{QueryField, TodoStore};

pub fn router(store: Arc<TodoStore>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/filter", get(filter_todos))
        .route("/todos/upload", post(upload_todos))
        .route("/todos/download", get(download_todos))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .with_state(store)
}

async fn index() -> &'static str {
    "Welcome to the todo service"
}

async fn list_todos(
    State(store): State<Arc<TodoStore>>,
) -> Result<Json<Vec<TodoItem>>, ApiError> {
    Ok(Json(store.all().await?))
}

async fn get_todo(
    State(store): State<Arc<TodoStore>>,
    Path(id): Path<Uuid>,
) -> Result<Json<TodoItem>, ApiError> {
    Ok(Json(store.get(id).await?))
}

async fn create_todo(
    State(store): State<Arc<TodoStore>>,
    payload: Result<Json<NewTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoItem>), ApiError> {
    let Json(input) = payload.map_err(bad_body)?;
    input.validate()?;
    let todo = store.create(input).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(store): State<Arc<TodoStore>>,
    Path(id): Path<Uuid>,
    payload: Result<Json<TodoPatch>, JsonRejection>,
) -> Result<Json<TodoItem>, ApiError> {
    let Json(patch) = payload.map_err(bad_body)?;
    patch.validate()?;
    Ok(Json(store.update(id, patch).await?))
}

async fn delete_todo(
    State(store): State<Arc<TodoStore>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let deleted = store.delete(id).await?;
    tracing::info!(id = %deleted.id, "todo deleted");
    Ok(Json(json!({ "message": "todo deleted" })))
}

#[derive(Deserialize)]
struct FilterParams {
    status: Option<String>,
}

async fn filter_todos(
    State(store): State<Arc<TodoStore>>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Vec<TodoItem>>, ApiError> {
    let status = params
        .status
        .filter(|s| !s.is_empty())
        .ok_or(Error::MissingParameter("status"))?;
    Ok(Json(
        store.find_by_field(QueryField::Status, &status).await?,
    ))
}

#[derive(Deserialize, Default)]
struct UploadParams {
    policy: Option<RowPolicy>,
}

/// Bulk import: reads the `file` multipart field as CSV and batch-inserts
/// every well-formed row. The row policy defaults to lenient skipping and
/// can be overridden with `?policy=abort`.
async fn upload_todos(
    State(store): State<Arc<TodoStore>>,
    Query(params): Query<UploadParams>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let mut file = None;
    while let Some(field) = multipart.next_field().await.map_err(Error::validation)? {
        if field.name() == Some("file") {
            file = Some(field.bytes().await.map_err(Error::validation)?);
            break;
        }
    }
    let bytes = file.ok_or(Error::MissingParameter("file"))?;

    let todos = parse_import(&bytes, params.policy.unwrap_or_default())?;
    let count = store.insert_batch(todos).await?;
    tracing::info!(count, "todos imported");
    Ok(Json(json!({ "message": "todos uploaded successfully" })))
}

/// Bulk export: streams the record set through `CsvExport` so the response
/// body never buffers the full document.
async fn download_todos(State(store): State<Arc<TodoStore>>) -> Result<Response, ApiError> {
    let todos = store.all().await?;
    tracing::info!(count = todos.len(), "todos exported");
    let body = Body::from_stream(stream::iter(CsvExport::new(todos)));
    Response::builder()
        .header(header::CONTENT_TYPE, "text/csv")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={EXPORT_FILENAME}"),
        )
        .body(body)
        .map_err(|e| ApiError(Error::Export(e.to_string())))
}

fn bad_body(rejection: JsonRejection) -> ApiError {
    ApiError(Error::Validation(rejection.body_text()))
}
