//! Reporting: missing-value profiles, imputation breakdowns, and the
//! machine-readable prep summary.
//!
//! Formatting for the terminal lives in [`format`] so output changes stay
//! localized; this module owns the numbers.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::PrepError;
use crate::table::{Column, Table, Value};

pub mod format;

pub use format::*;

/// Missing/total cell counts for one column.
#[derive(Debug, Clone, Serialize)]
pub struct MissingProfile {
    pub column: String,
    pub missing: usize,
    pub total: usize,
    pub kind: ColumnKind,
}

/// Coarse column typing for the inspect view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Number,
    Text,
    Date,
    Mixed,
    Empty,
}

/// Per-target imputation outcome, split by fill rule.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnFillStats {
    pub column: String,
    pub missing_before: usize,
    /// Cells set to zero: the whole column when no anchor exists, otherwise
    /// the gaps strictly before the anchor.
    pub zero_filled: usize,
    /// Cells resolved by linear interpolation from the anchor onward.
    pub interpolated: usize,
    pub missing_after: usize,
}

/// Everything the prep run reports, terminal and JSON alike.
#[derive(Debug, Clone, Serialize)]
pub struct PrepSummary {
    pub tool: String,
    pub rows_read: usize,
    pub n_rows: usize,
    pub index_start: Option<NaiveDate>,
    pub index_end: Option<NaiveDate>,
    pub columns: Vec<ColumnFillStats>,
}

/// Profile every column of a table.
pub fn missing_profile(table: &Table) -> Vec<MissingProfile> {
    table
        .columns()
        .iter()
        .map(|col| MissingProfile {
            column: col.name.clone(),
            missing: col.missing_count(),
            total: col.len(),
            kind: column_kind(col),
        })
        .collect()
}

/// Classify a column by its non-missing cells.
pub fn column_kind(col: &Column) -> ColumnKind {
    let mut number = false;
    let mut text = false;
    let mut date = false;
    for v in &col.values {
        match v {
            Value::Null => {}
            Value::Number(_) => number = true,
            Value::Text(_) => text = true,
            Value::Date(_) => date = true,
        }
    }
    match (number, text, date) {
        (false, false, false) => ColumnKind::Empty,
        (true, false, false) => ColumnKind::Number,
        (false, true, false) => ColumnKind::Text,
        (false, false, true) => ColumnKind::Date,
        _ => ColumnKind::Mixed,
    }
}

/// Build the prep summary by comparing the table before and after
/// imputation.
///
/// The zero-filled/interpolated split is derived from the anchor position in
/// the *input* table, mirroring the imputer's two phases.
pub fn summarize_prep(
    rows_read: usize,
    before: &Table,
    after: &Table,
    targets: &[String],
) -> PrepSummary {
    let columns = targets
        .iter()
        .filter_map(|name| {
            let b = before.column(name)?;
            let a = after.column(name)?;
            Some(fill_stats(b, a))
        })
        .collect();

    let (index_start, index_end) = match after.date_index() {
        Some(keys) => (keys.iter().min().copied(), keys.iter().max().copied()),
        None => (None, None),
    };

    PrepSummary {
        tool: "eprep".to_string(),
        rows_read,
        n_rows: after.n_rows(),
        index_start,
        index_end,
        columns,
    }
}

fn fill_stats(before: &Column, after: &Column) -> ColumnFillStats {
    let missing_before = before.missing_count();
    let anchor = before.values.iter().position(|v| !v.is_missing());

    let (zero_filled, interpolated) = match anchor {
        None => (missing_before, 0),
        Some(pos) => {
            let pre = before.values[..pos]
                .iter()
                .filter(|v| v.is_missing())
                .count();
            (pre, missing_before - pre)
        }
    };

    ColumnFillStats {
        column: before.name.clone(),
        missing_before,
        zero_filled,
        interpolated,
        missing_after: after.missing_count(),
    }
}

/// Write the prep summary as pretty-printed JSON.
pub fn write_summary_json(path: &Path, summary: &PrepSummary) -> Result<(), PrepError> {
    let file = File::create(path).map_err(|e| PrepError::Write {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    serde_json::to_writer_pretty(file, summary).map_err(|e| PrepError::Write {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    Ok(())
}
