//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the cleaning code stays pure and testable
//! - output changes are localized (important for future snapshot tests)

use crate::report::{MissingProfile, PrepSummary};

/// Format the full prep-run summary (row counts + index range + per-column
/// fill table).
pub fn format_prep_summary(summary: &PrepSummary) -> String {
    let mut out = String::new();

    out.push_str("=== eprep - Energy Consumption Data Prep ===\n");
    out.push_str(&format!(
        "Rows: read={} | cleaned={}\n",
        summary.rows_read, summary.n_rows
    ));
    match (summary.index_start, summary.index_end) {
        (Some(start), Some(end)) => {
            out.push_str(&format!("Index: {start} .. {end}\n"));
        }
        _ => out.push_str("Index: positional (no chronological key)\n"),
    }

    out.push_str("\nImputation:\n");
    out.push_str(&format!(
        "{:<24} {:>10} {:>12} {:>14} {:>10}\n",
        "column", "missing", "zero-filled", "interpolated", "remaining"
    ));
    for col in &summary.columns {
        out.push_str(&format!(
            "{:<24} {:>10} {:>12} {:>14} {:>10}\n",
            col.column, col.missing_before, col.zero_filled, col.interpolated, col.missing_after
        ));
    }

    out
}

/// Format the inspect view: one line per column with its kind and missing
/// count.
pub fn format_inspect(rows_read: usize, profiles: &[MissingProfile]) -> String {
    let mut out = String::new();

    out.push_str("=== eprep - Table Inspection ===\n");
    out.push_str(&format!("Rows: {rows_read}\n\n"));
    out.push_str(&format!(
        "{:<24} {:>8} {:>10} {:>8}\n",
        "column", "kind", "missing", "total"
    ));
    for p in profiles {
        out.push_str(&format!(
            "{:<24} {:>8} {:>10} {:>8}\n",
            p.column,
            format!("{:?}", p.kind).to_lowercase(),
            p.missing,
            p.total
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ColumnFillStats;

    #[test]
    fn prep_summary_lists_each_target() {
        let summary = PrepSummary {
            tool: "eprep".to_string(),
            rows_read: 10,
            n_rows: 10,
            index_start: chrono::NaiveDate::from_ymd_opt(2020, 1, 1),
            index_end: chrono::NaiveDate::from_ymd_opt(2020, 12, 1),
            columns: vec![ColumnFillStats {
                column: "Coal".to_string(),
                missing_before: 3,
                zero_filled: 1,
                interpolated: 2,
                missing_after: 0,
            }],
        };

        let text = format_prep_summary(&summary);
        assert!(text.contains("Rows: read=10 | cleaned=10"));
        assert!(text.contains("2020-01-01 .. 2020-12-01"));
        assert!(text.contains("Coal"));
    }

    #[test]
    fn positional_tables_say_so() {
        let summary = PrepSummary {
            tool: "eprep".to_string(),
            rows_read: 1,
            n_rows: 1,
            index_start: None,
            index_end: None,
            columns: vec![],
        };
        assert!(format_prep_summary(&summary).contains("positional"));
    }
}
