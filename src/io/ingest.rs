//! CSV ingest and cell typing.
//!
//! This module turns a delimited text file into an in-memory
//! [`crate::table::Table`]. It is deliberately tolerant at the row level
//! (ragged rows are padded with missing cells) and strict at the file level:
//! a missing, empty, or unparseable file maps to the documented error
//! taxonomy so the caller can report it and degrade without crashing.
//!
//! Cell typing is per-cell, not per-column: empty fields and non-finite
//! numbers become `Null`, finite numbers become `Number`, ISO dates become
//! `Date`, and everything else stays `Text`.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::PrepError;
use crate::table::{Column, Table, Value};

/// Ingest output: the typed table plus how many data rows were read.
#[derive(Debug, Clone)]
pub struct IngestedTable {
    pub table: Table,
    pub rows_read: usize,
}

/// Load a delimited text file into a table.
pub fn read_table(path: &Path) -> Result<IngestedTable, PrepError> {
    if !path.exists() {
        return Err(PrepError::FileNotFound(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|e| PrepError::Unknown(format!(
        "failed to open '{}': {e}",
        path.display()
    )))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| PrepError::Parse {
            path: path.to_path_buf(),
            detail: format!("failed to read headers: {e}"),
        })?
        .clone();

    let names: Vec<String> = headers.iter().map(normalize_header_name).collect();
    if names.is_empty() {
        return Err(PrepError::EmptyInput(path.to_path_buf()));
    }
    // Columns are addressed by name downstream; a duplicated header would
    // shadow its twin, so the file is rejected up front.
    for (idx, name) in names.iter().enumerate() {
        if names[..idx].contains(name) {
            return Err(PrepError::Parse {
                path: path.to_path_buf(),
                detail: format!("duplicate column name '{name}' in header"),
            });
        }
    }

    let mut columns: Vec<Vec<Value>> = vec![Vec::new(); names.len()];
    let mut rows_read = 0usize;

    for result in reader.records() {
        let record = result.map_err(|e| PrepError::Parse {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        rows_read += 1;

        for (idx, values) in columns.iter_mut().enumerate() {
            // Short rows are padded with missing cells; fields beyond the
            // header width are ignored.
            let cell = record.get(idx).unwrap_or("");
            values.push(parse_cell(cell));
        }
    }

    if rows_read == 0 {
        return Err(PrepError::EmptyInput(path.to_path_buf()));
    }

    let columns = names
        .into_iter()
        .zip(columns)
        .map(|(name, values)| Column::new(name, values))
        .collect();
    let table = Table::from_columns(columns).map_err(PrepError::Unknown)?;

    Ok(IngestedTable { table, rows_read })
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on
    // the first header (e.g. "﻿Year"). If we don't strip it, the indexer
    // would incorrectly treat the column as absent.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn parse_cell(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    if let Ok(v) = raw.parse::<f64>() {
        // "NaN"/"inf" parse successfully but cannot participate in
        // arithmetic; fold them into the missing value.
        return if v.is_finite() {
            Value::Number(v)
        } else {
            Value::Null
        };
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Value::Date(d);
    }
    Value::Text(raw.to_string())
}
