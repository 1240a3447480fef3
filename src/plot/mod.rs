//! SVG chart rendering for cleaned consumption tables.
//!
//! Three descriptive views over the same date-indexed, fully-imputed table:
//! a per-source line chart, a stacked bar chart of period totals, and a
//! source-by-time heatmap.

pub mod charts;

pub use charts::*;
