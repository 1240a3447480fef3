//! Shared prep pipeline used by the CLI front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> date index -> target resolution -> impute -> summarize
//!
//! The CLI can then focus on presentation and on deciding which artifacts to
//! write.

use crate::clean::{impute, index_by_date_on_day};
use crate::domain::PrepConfig;
use crate::error::PrepError;
use crate::io::ingest::read_table;
use crate::report::{self, PrepSummary};
use crate::table::Table;

/// All computed outputs of a single `eprep prep` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub cleaned: Table,
    pub targets: Vec<String>,
    pub summary: PrepSummary,
}

/// Execute the full prep pipeline and return the computed outputs.
pub fn run_prep(config: &PrepConfig) -> Result<RunOutput, PrepError> {
    // 1) Ingest the raw table.
    let ingested = read_table(&config.input)?;

    // 2) Collapse Year/Month into the chronological key.
    let indexed = index_by_date_on_day(&ingested.table, config.day_of_month)?;

    // 3) Resolve which columns get repaired.
    let targets = resolve_targets(&indexed, config.target_columns.as_deref());

    // 4) Repair missing values.
    let cleaned = if config.impute {
        impute(&indexed, &targets)?
    } else {
        indexed.clone()
    };

    // 5) Summarize what happened.
    let summary = report::summarize_prep(ingested.rows_read, &indexed, &cleaned, &targets);

    Ok(RunOutput {
        cleaned,
        targets,
        summary,
    })
}

/// The columns the imputer will repair: the caller's explicit list, or every
/// numeric column when none was given.
pub fn resolve_targets(table: &Table, requested: Option<&[String]>) -> Vec<String> {
    match requested {
        Some(cols) if !cols.is_empty() => cols.to_vec(),
        _ => table
            .columns()
            .iter()
            .filter(|c| c.is_numeric())
            .map(|c| c.name.clone())
            .collect(),
    }
}
