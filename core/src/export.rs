//! Bulk CSV export pipeline.
//!
//! # Design
//! `CsvExport` is a plain iterator over encoded lines rather than a writer
//! bound to a sink: the server wraps it in a body stream, tests `collect`
//! it, and no layer ever holds the full serialized document in memory. The
//! sequence is finite and consumed exactly once. Only `description` and
//! `status` are projected — ids and timestamps are regenerated on
//! re-import, they are not round-tripped.

use crate::error::Error;
use crate::types::TodoItem;

/// Attachment filename advertised for downloads.
pub const EXPORT_FILENAME: &str = "todo_list.csv";

/// Lazily encodes a record set as CSV, one line at a time.
///
/// Yields the `description,status` header line first, then one row per
/// record in the order given. Each yielded line carries its own trailing
/// newline.
pub struct CsvExport {
    items: std::vec::IntoIter<TodoItem>,
    header_sent: bool,
}

impl CsvExport {
    pub fn new(items: Vec<TodoItem>) -> Self {
        Self {
            items: items.into_iter(),
            header_sent: false,
        }
    }
}

impl Iterator for CsvExport {
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.header_sent {
            self.header_sent = true;
            return Some(encode_line(&["description", "status"]));
        }
        let item = self.items.next()?;
        Some(encode_line(&[&item.description, &item.status]))
    }
}

/// Encodes one row, quoting fields that contain the delimiter, the quote
/// character, or a newline, with embedded quotes doubled.
fn encode_line(fields: &[&str]) -> Result<String, Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .write_record(fields)
        .map_err(|e| Error::Export(e.to_string()))?;
    let buf = writer.into_inner().map_err(|e| Error::Export(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| Error::Export(e.to_string()))
}
