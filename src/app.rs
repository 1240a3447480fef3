//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the prep pipeline
//! - prints reports
//! - writes the cleaned CSV, the summary JSON, and the chart SVGs
//!
//! Error policy: I/O-boundary failures (missing/empty/unparseable input,
//! failed writes) are reported on stderr and degrade to "no output
//! produced"; input-shape failures propagate and become nonzero exit codes.

use clap::Parser;

use crate::cli::{Command, InspectArgs, PlotArgs, PrepArgs};
use crate::domain::{PlotConfig, PrepConfig};
use crate::error::PrepError;

pub mod pipeline;

/// Entry point for the `eprep` binary.
pub fn run() -> Result<(), PrepError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Prep(args) => handle_prep(args),
        Command::Inspect(args) => handle_inspect(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_prep(args: PrepArgs) -> Result<(), PrepError> {
    let config = prep_config_from_args(&args);

    let run = match pipeline::run_prep(&config) {
        Ok(run) => run,
        Err(e) if e.is_io() => {
            eprintln!("{e}");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    println!("{}", crate::report::format_prep_summary(&run.summary));

    if let Err(e) = crate::io::export::write_table_csv(&config.output, &run.cleaned) {
        eprintln!("{e}");
        return Ok(());
    }
    println!("Cleaned table written to {}", config.output.display());

    if let Some(path) = &config.summary {
        if let Err(e) = crate::report::write_summary_json(path, &run.summary) {
            eprintln!("{e}");
            return Ok(());
        }
        println!("Summary written to {}", path.display());
    }

    Ok(())
}

fn handle_inspect(args: InspectArgs) -> Result<(), PrepError> {
    let ingested = match crate::io::ingest::read_table(&args.input) {
        Ok(ingested) => ingested,
        Err(e) if e.is_io() => {
            eprintln!("{e}");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let profiles = crate::report::missing_profile(&ingested.table);
    println!(
        "{}",
        crate::report::format_inspect(ingested.rows_read, &profiles)
    );
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), PrepError> {
    let config = plot_config_from_args(&args);

    let ingested = match crate::io::ingest::read_table(&config.input) {
        Ok(ingested) => ingested,
        Err(e) if e.is_io() => {
            eprintln!("{e}");
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    let table = ingested.table;

    let columns = pipeline::resolve_targets(&table, config.columns.as_deref());
    if columns.is_empty() {
        eprintln!("No numeric consumption columns to chart.");
        return Ok(());
    }

    if let Err(e) = std::fs::create_dir_all(&config.out_dir) {
        eprintln!(
            "{}",
            PrepError::Write {
                path: config.out_dir.clone(),
                detail: e.to_string(),
            }
        );
        return Ok(());
    }

    let size = (config.width, config.height);
    for kind in &config.charts {
        let path = config.out_dir.join(kind.file_name());
        let result = match kind {
            crate::domain::ChartKind::Line => {
                crate::plot::render_line_chart(&table, &columns, &path, size)
            }
            crate::domain::ChartKind::Bar => {
                crate::plot::render_stacked_bar(&table, &columns, &path, size)
            }
            crate::domain::ChartKind::Heatmap => {
                crate::plot::render_heatmap(&table, &columns, &path, size)
            }
        };
        match result {
            Ok(()) => println!("Chart written to {}", path.display()),
            Err(e) if e.is_io() => {
                eprintln!("{e}");
                return Ok(());
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

pub fn prep_config_from_args(args: &PrepArgs) -> PrepConfig {
    PrepConfig {
        input: args.input.clone(),
        output: args.output.clone(),
        target_columns: if args.columns.is_empty() {
            None
        } else {
            Some(args.columns.clone())
        },
        day_of_month: args.day,
        impute: !args.no_impute,
        summary: args.summary.clone(),
    }
}

pub fn plot_config_from_args(args: &PlotArgs) -> PlotConfig {
    PlotConfig {
        input: args.input.clone(),
        out_dir: args.out_dir.clone(),
        columns: if args.columns.is_empty() {
            None
        } else {
            Some(args.columns.clone())
        },
        charts: args.charts.clone(),
        width: args.width,
        height: args.height,
    }
}
