// crates/actionscope-core/src/table.rs
//
// Shared CSV plumbing for the catalog and recording loaders.

use std::io::Read;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord, Trim};

use crate::error::LoadError;

/// Headered, whitespace-trimmed reader. Ragged rows are a parse error.
pub(crate) fn open_csv<R: Read>(reader: R) -> Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader)
}

pub(crate) fn column_index(
    headers: &StringRecord,
    column:  &'static str,
    origin:  &Path,
) -> Result<usize, LoadError> {
    headers.iter()
        .position(|h| h == column)
        .ok_or_else(|| LoadError::MissingColumn { path: origin.to_path_buf(), column })
}

/// 1-based source line of a record (the header is line 1).
pub(crate) fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}
