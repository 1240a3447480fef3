//! Date Indexer: collapse `Year`/`Month` columns into a chronological key.
//!
//! Source tables carry consumption observations keyed by integer `Year` and
//! `Month` columns with no day-of-month. The indexer synthesizes a day
//! (first of the month by default), combines the three parts into one
//! `NaiveDate` per row, drops the source columns, and installs the dates as
//! the table's index.
//!
//! The transform is idempotent: a table that is already date-indexed, or that
//! carries a `datetime` column, is returned as an unmodified copy. A table
//! with neither `Year`/`Month` nor a `datetime` key is also returned
//! unchanged (silent no-op — the caller's contract, not an error).

use chrono::NaiveDate;

use crate::error::PrepError;
use crate::table::{Table, Value};

/// Column holding the chronological key when it arrives pre-built.
pub const DATETIME_COLUMN: &str = "datetime";

pub const YEAR_COLUMN: &str = "Year";
pub const MONTH_COLUMN: &str = "Month";
pub const DAY_COLUMN: &str = "Day";

/// Day-of-month assumed for every record when the source data has none.
pub const DEFAULT_DAY_OF_MONTH: u32 = 1;

/// Index the table by date, anchoring every period to
/// [`DEFAULT_DAY_OF_MONTH`].
pub fn index_by_date(table: &Table) -> Result<Table, PrepError> {
    index_by_date_on_day(table, DEFAULT_DAY_OF_MONTH)
}

/// Index the table by date, anchoring every period to the given day of the
/// month.
///
/// Duplicate `(Year, Month)` pairs pass through unchanged, and row order is
/// preserved; ascending chronological order is the caller's responsibility.
pub fn index_by_date_on_day(table: &Table, day: u32) -> Result<Table, PrepError> {
    if table.is_date_indexed() || table.has_column(DATETIME_COLUMN) {
        return Ok(table.clone());
    }

    let (Some(year_col), Some(month_col)) = (table.column(YEAR_COLUMN), table.column(MONTH_COLUMN))
    else {
        return Ok(table.clone());
    };

    let mut keys = Vec::with_capacity(table.n_rows());
    for (row, (year, month)) in year_col.values.iter().zip(&month_col.values).enumerate() {
        keys.push(build_date(row, year, month, day)?);
    }

    let mut out = table.clone();
    out.drop_column(YEAR_COLUMN);
    out.drop_column(MONTH_COLUMN);
    // A pre-existing `Day` column would have been overwritten by the
    // synthesized day; it is dropped along with `Year`/`Month`.
    out.drop_column(DAY_COLUMN);
    out.set_date_index(keys).map_err(PrepError::Unknown)?;
    Ok(out)
}

fn build_date(row: usize, year: &Value, month: &Value, day: u32) -> Result<NaiveDate, PrepError> {
    let y = int_part(year).ok_or_else(|| PrepError::MalformedDate {
        row,
        detail: format!("Year '{year}' is not an integer"),
    })?;
    let m = int_part(month).ok_or_else(|| PrepError::MalformedDate {
        row,
        detail: format!("Month '{month}' is not an integer"),
    })?;

    let year_i32 = i32::try_from(y).map_err(|_| PrepError::MalformedDate {
        row,
        detail: format!("Year {y} is outside the supported range"),
    })?;
    let month_u32 = u32::try_from(m).map_err(|_| PrepError::MalformedDate {
        row,
        detail: format!("Month {m} is outside 1-12"),
    })?;
    NaiveDate::from_ymd_opt(year_i32, month_u32, day).ok_or_else(|| PrepError::MalformedDate {
        row,
        detail: format!("({y}, {m}, {day}) is not a valid calendar date"),
    })
}

/// Integral view of a cell: `Some` only for finite numbers with no
/// fractional part.
fn int_part(value: &Value) -> Option<i64> {
    let v = value.as_number()?;
    if v.fract() != 0.0 {
        return None;
    }
    Some(v as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    fn num(v: f64) -> Value {
        Value::Number(v)
    }

    fn year_month_table(pairs: &[(f64, f64)]) -> Table {
        let years = pairs.iter().map(|&(y, _)| num(y)).collect();
        let months = pairs.iter().map(|&(_, m)| num(m)).collect();
        let usage = pairs.iter().map(|_| num(1.0)).collect();
        Table::from_columns(vec![
            Column::new(YEAR_COLUMN, years),
            Column::new(MONTH_COLUMN, months),
            Column::new("Coal", usage),
        ])
        .unwrap()
    }

    #[test]
    fn synthesizes_first_of_month_keys_and_drops_source_columns() {
        let t = year_month_table(&[(2020.0, 3.0), (2020.0, 11.0)]);
        let indexed = index_by_date(&t).unwrap();

        let keys = indexed.date_index().unwrap();
        assert_eq!(keys[0], NaiveDate::from_ymd_opt(2020, 3, 1).unwrap());
        assert_eq!(keys[1], NaiveDate::from_ymd_opt(2020, 11, 1).unwrap());

        assert!(!indexed.has_column(YEAR_COLUMN));
        assert!(!indexed.has_column(MONTH_COLUMN));
        assert!(!indexed.has_column(DAY_COLUMN));
        assert!(indexed.has_column("Coal"));
    }

    #[test]
    fn indexing_is_idempotent() {
        let t = year_month_table(&[(2021.0, 1.0), (2021.0, 2.0)]);
        let once = index_by_date(&t).unwrap();
        let twice = index_by_date(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn existing_datetime_column_is_a_noop() {
        let t = Table::from_columns(vec![
            Column::new(DATETIME_COLUMN, vec![Value::Text("2020-01-01".to_string())]),
            Column::new(YEAR_COLUMN, vec![num(2020.0)]),
            Column::new(MONTH_COLUMN, vec![num(1.0)]),
        ])
        .unwrap();
        let out = index_by_date(&t).unwrap();
        assert_eq!(out, t);
    }

    #[test]
    fn missing_year_month_is_a_silent_noop() {
        let t = Table::from_columns(vec![Column::new("Coal", vec![num(1.0)])]).unwrap();
        let out = index_by_date(&t).unwrap();
        assert_eq!(out, t);
    }

    #[test]
    fn month_thirteen_is_malformed() {
        let t = year_month_table(&[(2020.0, 13.0)]);
        let err = index_by_date(&t).unwrap_err();
        assert!(matches!(err, PrepError::MalformedDate { row: 0, .. }));
    }

    #[test]
    fn year_beyond_i32_range_is_malformed() {
        // 2^32 + 2020 would wrap back to 2020 under a plain cast.
        let t = year_month_table(&[(4_294_969_316.0, 1.0)]);
        assert!(matches!(
            index_by_date(&t).unwrap_err(),
            PrepError::MalformedDate { row: 0, .. }
        ));
    }

    #[test]
    fn fractional_month_is_malformed() {
        let t = year_month_table(&[(2020.0, 1.5)]);
        assert!(matches!(
            index_by_date(&t).unwrap_err(),
            PrepError::MalformedDate { .. }
        ));
    }

    #[test]
    fn duplicate_periods_pass_through() {
        let t = year_month_table(&[(2020.0, 5.0), (2020.0, 5.0)]);
        let indexed = index_by_date(&t).unwrap();
        let keys = indexed.date_index().unwrap();
        assert_eq!(keys[0], keys[1]);
        assert_eq!(indexed.n_rows(), 2);
    }

    #[test]
    fn day_override_anchors_to_that_day() {
        let t = year_month_table(&[(2020.0, 2.0)]);
        let indexed = index_by_date_on_day(&t, 15).unwrap();
        assert_eq!(
            indexed.date_index().unwrap()[0],
            NaiveDate::from_ymd_opt(2020, 2, 15).unwrap()
        );
    }

    #[test]
    fn day_override_invalid_for_month_is_malformed() {
        // 2021 is not a leap year.
        let t = year_month_table(&[(2021.0, 2.0)]);
        assert!(matches!(
            index_by_date_on_day(&t, 30).unwrap_err(),
            PrepError::MalformedDate { .. }
        ));
    }
}
