//! Chart renderers built on Plotters' SVG backend.
//!
//! These are presentation only: no invariants beyond "surface I/O errors,
//! never panic". Bounds are computed defensively (degenerate ranges are
//! padded) so a single-row or constant-valued table still renders.
//!
//! Charts consume tables that already went through the imputer; any missing
//! cell that slips through renders as zero rather than poking a hole in the
//! series.

use std::path::Path;

use plotters::prelude::*;

use crate::clean::date_index::DATETIME_COLUMN;
use crate::error::PrepError;
use crate::table::Table;

/// High-contrast palette cycled across consumption series.
const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Heatmap gradient endpoints (light to dark blue).
const HEAT_LOW: RGBColor = RGBColor(247, 251, 255);
const HEAT_HIGH: RGBColor = RGBColor(8, 48, 107);

fn write_err(path: &Path, e: impl std::fmt::Display) -> PrepError {
    PrepError::Write {
        path: path.to_path_buf(),
        detail: e.to_string(),
    }
}

/// One line per consumption column over time.
pub fn render_line_chart(
    table: &Table,
    columns: &[String],
    path: &Path,
    size: (u32, u32),
) -> Result<(), PrepError> {
    let series = series_matrix(table, columns)?;
    let labels = time_labels(table);
    let n = table.n_rows();

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| write_err(path, e))?;
    if series.is_empty() || n == 0 {
        return root.present().map_err(|e| write_err(path, e));
    }

    let (y_min, y_max) = pad_range(value_range(&series), 0.05);
    let x_max = (n.saturating_sub(1)) as f64;
    let x_max = if x_max > 0.0 { x_max } else { 1.0 };

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .caption("Consumption by source", ("sans-serif", 22))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .build_cartesian_2d(0f64..x_max, y_min..y_max)
        .map_err(|e| write_err(path, e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("period")
        .y_desc("consumption")
        .x_labels(8.min(n))
        .x_label_formatter(&|v| label_at(&labels, *v))
        .draw()
        .map_err(|e| write_err(path, e))?;

    for (idx, (name, values)) in series.iter().enumerate() {
        let color = PALETTE[idx % PALETTE.len()];
        chart
            .draw_series(LineSeries::new(
                values.iter().enumerate().map(|(i, &v)| (i as f64, v)),
                color.stroke_width(2),
            ))
            .map_err(|e| write_err(path, e))?
            .label(name.clone())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(|e| write_err(path, e))?;

    root.present().map_err(|e| write_err(path, e))
}

/// Per-period totals stacked by source.
pub fn render_stacked_bar(
    table: &Table,
    columns: &[String],
    path: &Path,
    size: (u32, u32),
) -> Result<(), PrepError> {
    let series = series_matrix(table, columns)?;
    let labels = time_labels(table);
    let n = table.n_rows();

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| write_err(path, e))?;
    if series.is_empty() || n == 0 {
        return root.present().map_err(|e| write_err(path, e));
    }

    // Stack heights: consumption is non-negative after cleaning, so the
    // period total is the top of the stack.
    let mut totals = vec![0.0f64; n];
    for (_, values) in &series {
        for (slot, v) in totals.iter_mut().zip(values) {
            *slot += v.max(0.0);
        }
    }
    let top = totals.iter().copied().fold(0.0f64, f64::max);
    let (_, y_max) = pad_range((0.0, top), 0.05);

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .caption("Total consumption by source", ("sans-serif", 22))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_max)
        .map_err(|e| write_err(path, e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("period")
        .y_desc("consumption")
        .x_labels(8.min(n))
        .x_label_formatter(&|v| label_at(&labels, *v))
        .draw()
        .map_err(|e| write_err(path, e))?;

    let mut base = vec![0.0f64; n];
    for (idx, (name, values)) in series.iter().enumerate() {
        let color = PALETTE[idx % PALETTE.len()];
        let segments: Vec<Rectangle<(f64, f64)>> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let v = v.max(0.0);
                let rect = Rectangle::new(
                    [(i as f64 - 0.4, base[i]), (i as f64 + 0.4, base[i] + v)],
                    color.filled(),
                );
                base[i] += v;
                rect
            })
            .collect();

        chart
            .draw_series(segments)
            .map_err(|e| write_err(path, e))?
            .label(name.clone())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(|e| write_err(path, e))?;

    root.present().map_err(|e| write_err(path, e))
}

/// Sources x time grid, color-scaled by value.
pub fn render_heatmap(
    table: &Table,
    columns: &[String],
    path: &Path,
    size: (u32, u32),
) -> Result<(), PrepError> {
    let series = series_matrix(table, columns)?;
    let labels = time_labels(table);
    let n = table.n_rows();
    let m = series.len();

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| write_err(path, e))?;
    if m == 0 || n == 0 {
        return root.present().map_err(|e| write_err(path, e));
    }

    let (lo, hi) = value_range(&series);
    let span = if (hi - lo).abs() < f64::EPSILON {
        1.0
    } else {
        hi - lo
    };

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .caption("Consumption heatmap", ("sans-serif", 22))
        .set_label_area_size(LabelAreaPosition::Left, 120)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .build_cartesian_2d(0f64..n as f64, 0f64..m as f64)
        .map_err(|e| write_err(path, e))?;

    let names: Vec<String> = series.iter().map(|(name, _)| name.clone()).collect();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc("period")
        .x_labels(8.min(n))
        .y_labels(m)
        .x_label_formatter(&|v| label_at(&labels, *v))
        .y_label_formatter(&|v| {
            names
                .get(v.floor() as usize)
                .cloned()
                .unwrap_or_default()
        })
        .draw()
        .map_err(|e| write_err(path, e))?;

    for (j, (_, values)) in series.iter().enumerate() {
        let cells: Vec<Rectangle<(f64, f64)>> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let u = ((v - lo) / span).clamp(0.0, 1.0);
                Rectangle::new(
                    [(i as f64, j as f64), (i as f64 + 1.0, j as f64 + 1.0)],
                    heat_color(u).filled(),
                )
            })
            .collect();
        chart.draw_series(cells).map_err(|e| write_err(path, e))?;
    }

    root.present().map_err(|e| write_err(path, e))
}

/// Resolve the plotted columns to `(name, values)` pairs, with missing cells
/// rendered as zero.
fn series_matrix(table: &Table, columns: &[String]) -> Result<Vec<(String, Vec<f64>)>, PrepError> {
    let mut out = Vec::with_capacity(columns.len());
    for name in columns {
        let col = table
            .column(name)
            .ok_or_else(|| PrepError::ColumnNotFound(name.clone()))?;
        if !col.is_numeric() {
            return Err(PrepError::NonNumericColumn {
                column: name.clone(),
                detail: "charts require numeric consumption columns".to_string(),
            });
        }
        let values = col
            .values
            .iter()
            .map(|v| v.as_number().unwrap_or(0.0))
            .collect();
        out.push((name.clone(), values));
    }
    Ok(out)
}

/// Tick labels for the time axis: the date index when present, otherwise a
/// `datetime` column, otherwise row positions.
fn time_labels(table: &Table) -> Vec<String> {
    if let Some(keys) = table.date_index() {
        return keys.iter().map(|d| d.to_string()).collect();
    }
    if let Some(col) = table.column(DATETIME_COLUMN) {
        return col.values.iter().map(|v| v.to_string()).collect();
    }
    (0..table.n_rows()).map(|i| i.to_string()).collect()
}

fn label_at(labels: &[String], x: f64) -> String {
    let idx = x.round();
    if idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

fn value_range(series: &[(String, Vec<f64>)]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for (_, values) in series {
        for &v in values {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    (lo, hi)
}

fn pad_range((lo, hi): (f64, f64), frac: f64) -> (f64, f64) {
    if hi <= lo {
        return (lo - 0.5, lo + 0.5);
    }
    let pad = (hi - lo) * frac;
    (lo - pad, hi + pad)
}

fn heat_color(u: f64) -> RGBColor {
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * u).round() as u8;
    RGBColor(
        lerp(HEAT_LOW.0, HEAT_HIGH.0),
        lerp(HEAT_LOW.1, HEAT_HIGH.1),
        lerp(HEAT_LOW.2, HEAT_HIGH.2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, Value};

    fn sample_table() -> Table {
        Table::from_columns(vec![
            Column::new(
                "Coal",
                vec![
                    Value::Number(1.0),
                    Value::Number(2.0),
                    Value::Number(3.0),
                ],
            ),
            Column::new(
                "Solar",
                vec![
                    Value::Number(0.5),
                    Value::Number(0.5),
                    Value::Number(1.5),
                ],
            ),
        ])
        .unwrap()
    }

    fn targets() -> Vec<String> {
        vec!["Coal".to_string(), "Solar".to_string()]
    }

    #[test]
    fn line_chart_writes_an_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("line.svg");
        render_line_chart(&sample_table(), &targets(), &path, (640, 480)).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
    }

    #[test]
    fn stacked_bar_writes_an_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bar.svg");
        render_stacked_bar(&sample_table(), &targets(), &path, (640, 480)).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("<svg"));
    }

    #[test]
    fn heatmap_writes_an_svg_even_for_constant_values() {
        let t = Table::from_columns(vec![Column::new(
            "Flat",
            vec![Value::Number(2.0), Value::Number(2.0)],
        )])
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heat.svg");
        render_heatmap(&t, &["Flat".to_string()], &path, (640, 480)).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("<svg"));
    }

    #[test]
    fn unwritable_destination_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("line.svg");
        let err = render_line_chart(&sample_table(), &targets(), &path, (640, 480)).unwrap_err();
        assert!(matches!(err, PrepError::Write { .. }));
    }

    #[test]
    fn absent_plot_column_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("line.svg");
        let err = render_line_chart(&sample_table(), &["Nope".to_string()], &path, (640, 480)).unwrap_err();
        assert!(matches!(err, PrepError::ColumnNotFound(_)));
    }
}
