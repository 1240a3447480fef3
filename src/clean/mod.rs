//! The cleaning core: date indexing and missing-value imputation.
//!
//! Both transforms are pure functions from an input [`crate::table::Table`]
//! to a new table; neither mutates its input, performs I/O, or holds state
//! across calls.

pub mod date_index;
pub mod impute;

pub use date_index::{DEFAULT_DAY_OF_MONTH, index_by_date, index_by_date_on_day};
pub use impute::impute;
