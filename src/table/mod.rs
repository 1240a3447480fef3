//! The in-memory table model.
//!
//! A [`Table`] is an ordered set of equal-length columns plus an index that
//! addresses rows either positionally or by a chronological key. The types are
//! intentionally lightweight so they can be:
//!
//! - cloned freely (every transform returns a new table, inputs are never
//!   mutated)
//! - compared structurally (idempotence is directly testable)
//! - exported back to CSV without loss

use chrono::NaiveDate;

/// A single cell.
///
/// `Null` is the missing value. Non-finite numbers are normalized to `Null`
/// at ingest, so downstream code can treat `Null` as the only missing form.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Number(f64),
    Text(String),
    Date(NaiveDate),
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the cell: `Some` for finite numbers, `None` for
    /// missing. Text/date cells have no numeric view.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Number(v) => write!(f, "{v}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Date(d) => write!(f, "{d}"),
        }
    }
}

/// A named column of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Whether every non-missing cell is numeric.
    pub fn is_numeric(&self) -> bool {
        self.values
            .iter()
            .all(|v| v.is_missing() || v.as_number().is_some())
    }
}

/// Row addressing for a table.
///
/// `Range(n)` is plain positional addressing for `n` rows. `Date` carries one
/// chronological key per row; duplicates are permitted and pass through
/// unchanged (uniqueness is the caller's responsibility).
#[derive(Debug, Clone, PartialEq)]
pub enum TableIndex {
    Range(usize),
    Date(Vec<NaiveDate>),
}

impl TableIndex {
    pub fn len(&self) -> usize {
        match self {
            TableIndex::Range(n) => *n,
            TableIndex::Date(keys) => keys.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An ordered collection of equal-length columns plus an index.
///
/// Row order is significant: the imputer reads each column in stored order,
/// which the caller guarantees is ascending by the chronological key.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    index: TableIndex,
    columns: Vec<Column>,
}

impl Table {
    /// Build a positionally-indexed table from columns.
    ///
    /// All columns must have the same length; the row count is taken from the
    /// first column (zero columns means zero rows). Column names must be
    /// unique, since columns are addressed by name throughout.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, String> {
        let n_rows = columns.first().map(Column::len).unwrap_or(0);
        for (idx, col) in columns.iter().enumerate() {
            if col.len() != n_rows {
                return Err(format!(
                    "column '{}' has {} rows, expected {n_rows}",
                    col.name,
                    col.len()
                ));
            }
            if columns[..idx].iter().any(|c| c.name == col.name) {
                return Err(format!("duplicate column name '{}'", col.name));
            }
        }
        Ok(Self {
            index: TableIndex::Range(n_rows),
            columns,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn index(&self) -> &TableIndex {
        &self.index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Whether the table is addressed by a chronological key.
    pub fn is_date_indexed(&self) -> bool {
        matches!(self.index, TableIndex::Date(_))
    }

    /// The chronological keys, if the table is date-indexed.
    pub fn date_index(&self) -> Option<&[NaiveDate]> {
        match &self.index {
            TableIndex::Date(keys) => Some(keys),
            TableIndex::Range(_) => None,
        }
    }

    /// Replace the index with a chronological key (one date per row).
    pub fn set_date_index(&mut self, keys: Vec<NaiveDate>) -> Result<(), String> {
        if keys.len() != self.n_rows() {
            return Err(format!(
                "index has {} keys, table has {} rows",
                keys.len(),
                self.n_rows()
            ));
        }
        self.index = TableIndex::Date(keys);
        Ok(())
    }

    /// Remove a column by name. Removing an absent column is a no-op.
    pub fn drop_column(&mut self, name: &str) {
        self.columns.retain(|c| c.name != name);
    }

    /// Replace the cells of an existing column, keeping its position.
    pub fn replace_column_values(&mut self, position: usize, values: Vec<Value>) {
        debug_assert_eq!(values.len(), self.n_rows());
        self.columns[position].values = values;
    }
}
