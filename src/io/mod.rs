//! Input/output helpers.
//!
//! - CSV ingest + cell typing (`ingest`)
//! - cleaned-table CSV export (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
