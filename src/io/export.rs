//! Cleaned-table CSV export.
//!
//! The chronological key is persisted as an explicit leading `datetime`
//! column so the file round-trips: re-ingesting it yields a table on which
//! the date indexer is a no-op.

use std::fs::File;
use std::path::Path;

use crate::clean::date_index::DATETIME_COLUMN;
use crate::error::PrepError;
use crate::table::Table;

/// Write a table to a CSV file.
pub fn write_table_csv(path: &Path, table: &Table) -> Result<(), PrepError> {
    let file = File::create(path).map_err(|e| write_err(path, e))?;
    let mut writer = csv::Writer::from_writer(file);

    let mut header: Vec<String> = Vec::with_capacity(table.n_cols() + 1);
    if table.is_date_indexed() {
        header.push(DATETIME_COLUMN.to_string());
    }
    header.extend(table.column_names().map(str::to_string));
    writer
        .write_record(&header)
        .map_err(|e| write_err(path, e))?;

    for row in 0..table.n_rows() {
        let mut record: Vec<String> = Vec::with_capacity(header.len());
        if let Some(keys) = table.date_index() {
            record.push(keys[row].to_string());
        }
        for col in table.columns() {
            // `Null` serializes as the empty field.
            record.push(col.values[row].to_string());
        }
        writer
            .write_record(&record)
            .map_err(|e| write_err(path, e))?;
    }

    writer.flush().map_err(|e| write_err(path, e))?;
    Ok(())
}

fn write_err(path: &Path, e: impl std::fmt::Display) -> PrepError {
    PrepError::Write {
        path: path.to_path_buf(),
        detail: e.to_string(),
    }
}
