//! Error type for the prep pipeline.
//!
//! Variants mirror the two failure families the pipeline distinguishes:
//!
//! - **I/O-boundary errors** (`FileNotFound`, `EmptyInput`, `Parse`, `Write`,
//!   `Unknown`): raised by the CSV collaborators. The app layer reports these
//!   on stderr and degrades to "no output produced" rather than crashing.
//! - **Input-shape errors** (`MalformedDate`, `ColumnNotFound`,
//!   `NonNumericColumn`): raised by the core transforms and always surfaced,
//!   since imputation correctness cannot be guaranteed once preconditions are
//!   violated.
//!
//! Each variant maps to a process exit code via [`PrepError::exit_code`].

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum PrepError {
    /// The input file does not exist.
    FileNotFound(PathBuf),
    /// The input file is zero bytes or contains a header with no data rows.
    EmptyInput(PathBuf),
    /// The input file could not be parsed as delimited text.
    Parse { path: PathBuf, detail: String },
    /// A `(Year, Month)` pair (plus the configured day) is not a valid
    /// calendar date.
    MalformedDate { row: usize, detail: String },
    /// A requested target column is absent from the table.
    ColumnNotFound(String),
    /// A target column holds non-missing values that are not numeric, so
    /// interpolation cannot do arithmetic on them.
    NonNumericColumn { column: String, detail: String },
    /// Writing an output artifact (CSV, JSON, SVG) failed.
    Write { path: PathBuf, detail: String },
    /// Any other ingestion failure.
    Unknown(String),
}

impl PrepError {
    /// Process exit code for this error.
    ///
    /// - `2` — I/O and parse failures
    /// - `3` — empty input
    /// - `4` — input-shape errors (the table cannot be repaired as requested)
    pub fn exit_code(&self) -> u8 {
        match self {
            PrepError::FileNotFound(_)
            | PrepError::Parse { .. }
            | PrepError::Write { .. }
            | PrepError::Unknown(_) => 2,
            PrepError::EmptyInput(_) => 3,
            PrepError::MalformedDate { .. }
            | PrepError::ColumnNotFound(_)
            | PrepError::NonNumericColumn { .. } => 4,
        }
    }

    /// Whether this error belongs to the I/O boundary (recoverable at the app
    /// layer) rather than the core transforms.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            PrepError::FileNotFound(_)
                | PrepError::EmptyInput(_)
                | PrepError::Parse { .. }
                | PrepError::Write { .. }
                | PrepError::Unknown(_)
        )
    }
}

impl std::fmt::Display for PrepError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrepError::FileNotFound(path) => {
                write!(f, "Input file '{}' does not exist.", path.display())
            }
            PrepError::EmptyInput(path) => {
                write!(f, "Input file '{}' contains no data rows.", path.display())
            }
            PrepError::Parse { path, detail } => {
                write!(f, "Failed to parse '{}': {detail}", path.display())
            }
            PrepError::MalformedDate { row, detail } => {
                write!(f, "Malformed date at row {row}: {detail}")
            }
            PrepError::ColumnNotFound(name) => {
                write!(f, "Column '{name}' not found in the table.")
            }
            PrepError::NonNumericColumn { column, detail } => {
                write!(f, "Column '{column}' is not numeric: {detail}")
            }
            PrepError::Write { path, detail } => {
                write!(f, "Failed to write '{}': {detail}", path.display())
            }
            PrepError::Unknown(detail) => write!(f, "Unexpected error: {detail}"),
        }
    }
}

impl std::error::Error for PrepError {}
