//! Bulk CSV import pipeline.
//!
//! # Design
//! One pass over an uploaded byte buffer: the header row is resolved to
//! column positions, then every data row is zipped against those positions
//! to build one `NewTodo`. Records accumulate in memory and the caller
//! submits them to the store as a single batch — this layer imposes no size
//! limit, the transport's body limit is the boundary.
//!
//! The pipeline is lenient by default: a malformed row (wrong column count,
//! only whitespace, or a blank required field) is dropped without aborting
//! the batch. `RowPolicy::Abort` turns that into a hard failure for callers
//! that want all-or-nothing ingestion.

use serde::Deserialize;

use crate::error::Error;
use crate::types::NewTodo;

/// How the import pipeline treats a malformed data row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// Drop the row and keep parsing.
    #[default]
    Skip,
    /// Fail the whole import on the first malformed row.
    Abort,
}

/// Positions of the required columns in the header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    description: usize,
    status: usize,
    width: usize,
}

impl Columns {
    /// Resolves column positions from the header row, case-insensitively.
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, Error> {
        let mut description = None;
        let mut status = None;
        for (i, name) in headers.iter().enumerate() {
            match name.trim().to_ascii_lowercase().as_str() {
                "description" => description = Some(i),
                "status" => status = Some(i),
                _ => {}
            }
        }
        match (description, status) {
            (Some(description), Some(status)) => Ok(Self {
                description,
                status,
                width: headers.len(),
            }),
            _ => Err(Error::Validation(
                "csv header must name 'description' and 'status' columns".to_string(),
            )),
        }
    }
}

/// Parses a raw CSV byte buffer into creation payloads.
///
/// The header row must name `description` and `status` columns (any order,
/// extra columns are ignored). Blank lines never count as rows.
///
/// # Errors
/// Returns `Error::Validation` when the header is unusable, when the buffer
/// is not parseable as CSV, or — under `RowPolicy::Abort` — on the first
/// malformed row.
pub fn parse_import(bytes: &[u8], policy: RowPolicy) -> Result<Vec<NewTodo>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers().map_err(Error::validation)?.clone();
    let columns = Columns::from_headers(&headers)?;

    let mut todos = Vec::new();
    let mut record = csv::StringRecord::new();
    while reader.read_record(&mut record).map_err(Error::validation)? {
        match parse_row(&record, columns) {
            Some(todo) => todos.push(todo),
            None if policy == RowPolicy::Abort => {
                let line = record.position().map_or(0, csv::Position::line);
                return Err(Error::Validation(format!("malformed row at line {line}")));
            }
            None => {}
        }
    }
    Ok(todos)
}

/// Builds one record from a data row, or `None` if the row is malformed.
///
/// Blankness is judged on a trimmed view, but the emitted values keep their
/// surrounding whitespace intact so an export re-imports byte for byte.
fn parse_row(record: &csv::StringRecord, columns: Columns) -> Option<NewTodo> {
    if record.len() != columns.width {
        return None;
    }
    let description = record.get(columns.description)?;
    let status = record.get(columns.status)?;
    if description.trim().is_empty() || status.trim().is_empty() {
        return None;
    }
    Some(NewTodo {
        description: description.to_string(),
        status: status.to_string(),
    })
}
