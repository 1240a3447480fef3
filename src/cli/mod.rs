//! Command-line parsing for the energy consumption prep tool.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the cleaning code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::clean::DEFAULT_DAY_OF_MONTH;
use crate::domain::ChartKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "eprep",
    version,
    about = "Energy-consumption data prep: date indexing, imputation, charts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load a raw CSV, build the chronological index, repair missing values,
    /// and write the cleaned table.
    Prep(PrepArgs),
    /// Load a CSV and print a per-column profile without writing anything.
    Inspect(InspectArgs),
    /// Render charts (line, stacked bar, heatmap) from a cleaned CSV.
    Plot(PlotArgs),
}

/// Options for the full prep pipeline.
#[derive(Debug, Parser, Clone)]
pub struct PrepArgs {
    /// Raw input CSV with `Year`/`Month` columns and per-source consumption
    /// columns.
    #[arg(short = 'i', long)]
    pub input: PathBuf,

    /// Destination for the cleaned, date-indexed CSV.
    #[arg(short = 'o', long)]
    pub output: PathBuf,

    /// Consumption columns to repair (comma-separated). Defaults to every
    /// numeric column.
    #[arg(short = 'c', long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Day of month used when synthesizing the chronological key.
    #[arg(long, default_value_t = DEFAULT_DAY_OF_MONTH)]
    pub day: u32,

    /// Index and export only; leave missing values in place.
    #[arg(long)]
    pub no_impute: bool,

    /// Write a machine-readable prep summary (JSON) to this path.
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

/// Options for the inspect view.
#[derive(Debug, Parser)]
pub struct InspectArgs {
    /// Input CSV to profile.
    #[arg(short = 'i', long)]
    pub input: PathBuf,
}

/// Options for chart rendering.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Cleaned CSV (as written by `eprep prep`).
    #[arg(short = 'i', long)]
    pub input: PathBuf,

    /// Directory receiving the rendered SVG files.
    #[arg(long, default_value = "plots")]
    pub out_dir: PathBuf,

    /// Consumption columns to chart (comma-separated). Defaults to every
    /// numeric column.
    #[arg(short = 'c', long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Which charts to render.
    #[arg(long, value_enum, value_delimiter = ',',
          default_values_t = vec![ChartKind::Line, ChartKind::Bar, ChartKind::Heatmap])]
    pub charts: Vec<ChartKind>,

    /// Chart width (pixels).
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Chart height (pixels).
    #[arg(long, default_value_t = 600)]
    pub height: u32,
}
