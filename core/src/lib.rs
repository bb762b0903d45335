//! Deterministic core for the todo service.
//!
//! # Overview
//! Domain types, the error taxonomy, and the CSV bulk import/export
//! pipelines. Nothing in this crate performs I/O or touches a clock — the
//! server crate owns the store, the HTTP surface, and timestamp generation,
//! so everything here is testable without a runtime.
//!
//! # Design
//! - `import` turns an uploaded byte buffer into creation payloads; the
//!   caller submits them to the store as one batch.
//! - `export` is a plain iterator of encoded CSV lines, so serialization is
//!   decoupled from however the caller drains it (a streaming HTTP body, a
//!   file, a test `collect`).
//! - Types use owned `String` fields and serialize with camelCase keys to
//!   match the public JSON shape.

pub mod error;
pub mod export;
pub mod import;
pub mod types;

pub use error::Error;
pub use export::{CsvExport, EXPORT_FILENAME};
pub use import::{parse_import, RowPolicy};
pub use types::{NewTodo, TodoItem, TodoPatch};
