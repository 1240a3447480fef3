//! Run configuration types.
//!
//! These are derived from CLI flags (plus defaults) and passed to the
//! pipeline, so the library stays independent of argument parsing.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which chart(s) to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// One line per consumption column over time.
    Line,
    /// Per-period totals stacked by source.
    Bar,
    /// Sources x time grid, color-scaled by value.
    Heatmap,
}

impl ChartKind {
    /// Output file name for this chart.
    pub fn file_name(self) -> &'static str {
        match self {
            ChartKind::Line => "consumption_line.svg",
            ChartKind::Bar => "consumption_stacked_bar.svg",
            ChartKind::Heatmap => "consumption_heatmap.svg",
        }
    }
}

/// A full prep run's configuration as understood by the pipeline.
#[derive(Debug, Clone)]
pub struct PrepConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Columns to repair; `None` means every numeric column.
    pub target_columns: Option<Vec<String>>,
    /// Day of month anchoring each synthesized chronological key.
    pub day_of_month: u32,
    /// When false, the run indexes and exports without repairing gaps.
    pub impute: bool,
    /// Optional machine-readable summary (JSON) destination.
    pub summary: Option<PathBuf>,
}

/// Configuration for the `plot` subcommand.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    /// Columns to chart; `None` means every numeric column.
    pub columns: Option<Vec<String>>,
    pub charts: Vec<ChartKind>,
    pub width: u32,
    pub height: u32,
}
