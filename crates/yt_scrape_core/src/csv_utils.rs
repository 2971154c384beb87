use std::fs::{File, OpenOptions};
use std::path::Path;

use tracing::debug;

use crate::errors::ScrapeError;
use crate::rows::Row;

pub const DELIMITER: u8 = b'|';

/// Appends `rows` to the file at `path`, writing `header` first only when the file does not exist yet.
///
/// Returns the number of data rows written. The existence check and the write are not atomic.
pub fn append_rows(path: &Path, header: &[&str], rows: &[Row]) -> Result<usize, ScrapeError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let is_new_file = !path.exists();
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .from_writer(file);

    if is_new_file {
        debug!(path = %path.display(), "writing header to new output file");
        writer.write_record(header)?;
    }
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(rows.len())
}

/// Reads a file written by [`append_rows`], returning its header and data rows.
pub fn read_rows(path: &Path) -> Result<(Row, Vec<Row>), ScrapeError> {
    if !path.exists() {
        return Ok((Vec::new(), Vec::new()));
    }
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .from_reader(file);
    let header = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok((header, rows))
}
