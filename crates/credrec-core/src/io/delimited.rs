//! CSV reading and writing for tables.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{InputError, Result};
use crate::models::table::{Table, Value};

/// Parse delimited text with a header row into a table.
///
/// Ragged rows, unreadable bytes and a missing header are input errors.
pub fn read_table<R: Read>(reader: R) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| InputError::Malformed(e.to_string()))?
        .clone();
    if headers.is_empty() {
        return Err(InputError::Malformed("file has no header row".to_string()).into());
    }

    let mut table = Table::new(headers.iter());
    for record in rdr.records() {
        let record = record.map_err(|e| InputError::Malformed(e.to_string()))?;
        table.push_row(record.iter().map(Value::parse).collect());
    }

    debug!("Read table with {} columns and {} rows", table.columns().len(), table.len());
    Ok(table)
}

/// Read a CSV file from disk.
pub fn read_table_from_path(path: &Path) -> Result<Table> {
    let file = File::open(path)?;
    read_table(file)
}

/// Write a table as CSV with a header row.
pub fn write_table<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(table.columns())?;
    for row in table.rows() {
        wtr.write_record(row.values().iter().map(|v| v.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a table to a CSV file, replacing any existing file.
pub fn write_table_to_path(table: &Table, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_table(table, file)
}
