//! Consumption Imputer: deterministic repair of missing values.
//!
//! Each target column is processed independently, in stored row order
//! (ascending by the chronological key, per the caller's contract):
//!
//! 1. Find the **anchor** — the first non-missing value.
//! 2. No anchor (column entirely missing): every cell becomes `0`.
//! 3. Anchor found: missing cells strictly before the anchor become `0`
//!    (present cells are never overwritten); from the anchor onward, gaps
//!    are filled by linear interpolation against the surrounding
//!    observations, with trailing gaps carrying the last observation
//!    forward (both-direction limit policy).
//!
//! After a successful call, every target column has zero missing values,
//! unconditionally. Non-target columns and the index are untouched.
//!
//! Gap width is measured in row positions, not calendar distance, so a
//! single missing month between two observations always lands at their
//! midpoint regardless of the period length.

use rayon::prelude::*;

use crate::error::PrepError;
use crate::table::{Column, Table, Value};

/// Fill missing values in the named columns, returning a new table.
///
/// Fails with [`PrepError::ColumnNotFound`] if a target is absent and with
/// [`PrepError::NonNumericColumn`] if a target holds non-numeric
/// observations.
pub fn impute(table: &Table, targets: &[String]) -> Result<Table, PrepError> {
    // Resolve every target up front so a bad name fails before any work.
    let mut positions = Vec::with_capacity(targets.len());
    for name in targets {
        let pos = table
            .column_position(name)
            .ok_or_else(|| PrepError::ColumnNotFound(name.clone()))?;
        positions.push(pos);
    }

    // Columns are mutually independent, so the per-column work fans out
    // across threads and joins before the table is rebuilt. Correctness does
    // not depend on this; sequential iteration yields the same result.
    let repaired: Vec<(usize, Vec<Value>)> = positions
        .into_par_iter()
        .map(|pos| {
            let col = &table.columns()[pos];
            let series = numeric_series(col)?;
            let filled = fill_series(&series);
            Ok((pos, filled.into_iter().map(Value::Number).collect()))
        })
        .collect::<Result<_, PrepError>>()?;

    let mut out = table.clone();
    for (pos, values) in repaired {
        out.replace_column_values(pos, values);
    }
    Ok(out)
}

/// Numeric view of a column: `None` per missing cell, error on text/date
/// observations.
fn numeric_series(col: &Column) -> Result<Vec<Option<f64>>, PrepError> {
    col.values
        .iter()
        .enumerate()
        .map(|(row, v)| match v {
            Value::Null => Ok(None),
            // Non-finite numbers cannot anchor an interpolation; treat them
            // as missing.
            Value::Number(_) => Ok(v.as_number()),
            Value::Text(_) | Value::Date(_) => Err(PrepError::NonNumericColumn {
                column: col.name.clone(),
                detail: format!("value '{v}' at row {row} is not a number"),
            }),
        })
        .collect()
}

/// Apply the two-phase fill rule to one column's numeric series.
fn fill_series(values: &[Option<f64>]) -> Vec<f64> {
    let Some(anchor) = values.iter().position(Option::is_some) else {
        // Entirely missing: terminal all-zero state.
        return vec![0.0; values.len()];
    };

    let mut out = Vec::with_capacity(values.len());
    // Pre-anchor: zero-fill gaps only, never overwrite.
    out.extend(values[..anchor].iter().map(|v| v.unwrap_or(0.0)));
    out.extend(interpolate_linear(&values[anchor..]));
    out
}

/// Positional linear interpolation with a both-direction limit policy.
///
/// Interior gaps are filled linearly between their neighboring
/// observations; a leading gap takes the first observation and a trailing
/// gap the last, so the output never contains a missing value as long as at
/// least one observation exists.
fn interpolate_linear(values: &[Option<f64>]) -> Vec<f64> {
    let mut out = vec![0.0; values.len()];
    let known: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect();

    let (Some(&(first_pos, first_val)), Some(&(last_pos, last_val))) =
        (known.first(), known.last())
    else {
        return out;
    };

    for slot in &mut out[..first_pos] {
        *slot = first_val;
    }
    for pair in known.windows(2) {
        let (i0, v0) = pair[0];
        let (i1, v1) = pair[1];
        out[i0] = v0;
        let span = (i1 - i0) as f64;
        for k in (i0 + 1)..i1 {
            let u = (k - i0) as f64 / span;
            out[k] = v0 + u * (v1 - v0);
        }
    }
    for slot in &mut out[last_pos..] {
        *slot = last_val;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(v: f64) -> Value {
        Value::Number(v)
    }

    fn table_with(name: &str, values: Vec<Value>) -> Table {
        let labels = (0..values.len())
            .map(|i| Value::Text(format!("p{i}")))
            .collect();
        Table::from_columns(vec![
            Column::new("Label", labels),
            Column::new(name, values),
        ])
        .unwrap()
    }

    fn column_numbers(table: &Table, name: &str) -> Vec<f64> {
        table
            .column(name)
            .unwrap()
            .values
            .iter()
            .map(|v| v.as_number().unwrap())
            .collect()
    }

    #[test]
    fn pre_anchor_zero_fill_and_interior_interpolation() {
        let t = table_with(
            "X",
            vec![Value::Null, Value::Null, num(5.0), Value::Null, num(10.0)],
        );
        let out = impute(&t, &["X".to_string()]).unwrap();
        assert_eq!(column_numbers(&out, "X"), vec![0.0, 0.0, 5.0, 7.5, 10.0]);
    }

    #[test]
    fn trailing_gaps_carry_the_last_observation() {
        let t = table_with("X", vec![Value::Null, num(2.0), Value::Null, Value::Null]);
        let out = impute(&t, &["X".to_string()]).unwrap();

        let repaired = column_numbers(&out, "X");
        assert_eq!(repaired.len(), 4);
        assert!(repaired.iter().all(|v| v.is_finite()));
        assert_eq!(repaired, vec![0.0, 2.0, 2.0, 2.0]);
    }

    #[test]
    fn entirely_missing_column_becomes_all_zero() {
        let t = table_with("X", vec![Value::Null, Value::Null, Value::Null]);
        let out = impute(&t, &["X".to_string()]).unwrap();
        assert_eq!(column_numbers(&out, "X"), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn no_missing_values_remain_in_any_target() {
        let t = Table::from_columns(vec![
            Column::new("a", vec![Value::Null, num(1.0), Value::Null, num(3.0)]),
            Column::new("b", vec![Value::Null, Value::Null, Value::Null, Value::Null]),
            Column::new("c", vec![num(4.0), Value::Null, Value::Null, Value::Null]),
        ])
        .unwrap();
        let out = impute(&t, &["a".to_string(), "b".to_string(), "c".to_string()]).unwrap();
        for name in ["a", "b", "c"] {
            assert_eq!(out.column(name).unwrap().missing_count(), 0, "column {name}");
        }
    }

    #[test]
    fn non_target_columns_are_untouched() {
        let t = Table::from_columns(vec![
            Column::new("target", vec![Value::Null, num(1.0)]),
            Column::new("other", vec![Value::Null, Value::Text("keep".to_string())]),
        ])
        .unwrap();
        let out = impute(&t, &["target".to_string()]).unwrap();
        assert_eq!(out.column("other"), t.column("other"));
        assert_eq!(out.index(), t.index());
    }

    #[test]
    fn input_table_is_never_mutated() {
        let t = table_with("X", vec![Value::Null, num(1.0)]);
        let snapshot = t.clone();
        let _ = impute(&t, &["X".to_string()]).unwrap();
        assert_eq!(t, snapshot);
    }

    #[test]
    fn absent_target_is_an_error() {
        let t = table_with("X", vec![num(1.0)]);
        assert_eq!(
            impute(&t, &["Y".to_string()]).unwrap_err(),
            PrepError::ColumnNotFound("Y".to_string())
        );
    }

    #[test]
    fn text_target_is_an_error() {
        let t = table_with("Label2", vec![Value::Text("abc".to_string())]);
        // Target the label column itself.
        let err = impute(&t, &["Label".to_string()]).unwrap_err();
        assert!(matches!(err, PrepError::NonNumericColumn { .. }));
    }

    #[test]
    fn present_pre_anchor_values_are_not_overwritten() {
        // The anchor is the first non-missing value, so anything before it is
        // missing by construction; this guards the fill-gaps-only rule at the
        // series level.
        let series = vec![Some(3.0), None, Some(5.0)];
        assert_eq!(fill_series(&series), vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn interpolation_spreads_long_gaps_evenly() {
        let series = vec![Some(0.0), None, None, None, Some(8.0)];
        assert_eq!(fill_series(&series), vec![0.0, 2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn single_observation_fills_everything_with_it_after_anchor() {
        let series = vec![None, Some(7.0), None];
        assert_eq!(fill_series(&series), vec![0.0, 7.0, 7.0]);
    }
}
