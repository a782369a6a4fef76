//! Transient delimited files handed to the bulk loader.

use crate::error::PopulateError;
use listen80_types::{DelimitedRow, Table};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default buffer size for delimited file writing.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Path of the transient file for `table` inside `dir`.
pub fn table_file(dir: &Path, table: Table) -> PathBuf {
    dir.join(table.name())
}

/// Write `rows` to `path`, one line each, replacing any existing file.
///
/// Returns the number of bytes written.
pub fn write_rows<T: DelimitedRow>(path: &Path, rows: &[T]) -> Result<u64, PopulateError> {
    let file = File::create(path).map_err(|e| PopulateError::io(path, e))?;
    let mut writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);

    let mut bytes = 0u64;
    for row in rows {
        let line = row.to_line();
        writer
            .write_all(line.as_bytes())
            .and_then(|_| writer.write_all(b"\n"))
            .map_err(|e| PopulateError::io(path, e))?;
        bytes += line.len() as u64 + 1;
    }
    writer.flush().map_err(|e| PopulateError::io(path, e))?;

    Ok(bytes)
}

/// Remove a transient file; a file that is already gone is not an error.
pub fn remove_file(path: &Path) -> Result<(), PopulateError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(PopulateError::io(path, e)),
    }
}
