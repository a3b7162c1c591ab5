//! DataFrame preconditions and period-keyed helpers.
//!
//! Shift-based derivations (change in working capital, trailing-twelve-month
//! sums, growth rates, the valuation lags) are only meaningful on a table
//! sorted period-descending. The helpers here make that precondition
//! explicit and validated instead of an implicit row-order assumption, and
//! centralize the period-keyed joins every stage performs.

use chrono::NaiveDate;
use polars::prelude::*;

use crate::error::{ModelError, Result};
use crate::period::Period;
use crate::schema::DATE;

/// Validates that every required column is present in `df`.
///
/// # Errors
///
/// Returns [`ModelError::Schema`] naming every missing column.
pub fn require_columns(df: &DataFrame, table: &str, required: &[&str]) -> Result<()> {
    let missing: Vec<String> = required
        .iter()
        .filter(|name| df.column(name).is_err())
        .map(|name| (*name).to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ModelError::Schema {
            table: table.to_string(),
            missing,
        })
    }
}

/// Validates that the `DATE` column of `df` is strictly descending.
///
/// # Errors
///
/// Returns [`ModelError::UnsortedPeriods`] when two adjacent rows are out of
/// order or share a period.
pub fn ensure_period_descending(df: &DataFrame, table: &str) -> Result<()> {
    let days = df.column(DATE)?.cast(&DataType::Int32)?;
    let mut prev: Option<i32> = None;
    for day in days.i32()? {
        if let (Some(p), Some(d)) = (prev, day) {
            if d >= p {
                return Err(ModelError::UnsortedPeriods {
                    table: table.to_string(),
                });
            }
        }
        if day.is_some() {
            prev = day;
        }
    }
    Ok(())
}

/// Sorts `df` by period descending, preserving the relative order of rows
/// that share a period.
///
/// # Errors
///
/// Returns an error if `df` has no `DATE` column.
pub fn sort_period_descending(df: DataFrame) -> Result<DataFrame> {
    let sorted = df
        .lazy()
        .sort(
            [DATE],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .collect()?;
    Ok(sorted)
}

/// Inner-joins two period-keyed tables on `DATE`.
///
/// # Errors
///
/// Returns [`ModelError::MissingPeriod`] when no period is shared, rather
/// than silently producing an empty table.
pub fn inner_join_on_period(
    left: &DataFrame,
    right: &DataFrame,
    left_name: &str,
    right_name: &str,
) -> Result<DataFrame> {
    let joined = left
        .clone()
        .lazy()
        .join(
            right.clone().lazy(),
            [col(DATE)],
            [col(DATE)],
            JoinArgs::new(JoinType::Inner),
        )
        .collect()?;
    if joined.height() == 0 {
        return Err(ModelError::MissingPeriod {
            left: left_name.to_string(),
            right: right_name.to_string(),
        });
    }
    Ok(joined)
}

/// Outer-joins two period-keyed tables on `DATE`, keeping the union of
/// periods. Fields absent for a period stay null.
///
/// # Errors
///
/// Returns an error if either table has no `DATE` column.
pub fn outer_join_on_period(left: &DataFrame, right: &DataFrame) -> Result<DataFrame> {
    let joined = left
        .clone()
        .lazy()
        .join(
            right.clone().lazy(),
            [col(DATE)],
            [col(DATE)],
            JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns),
        )
        .collect()?;
    sort_period_descending(joined)
}

/// Builds a `Date`-typed `DATE` column from canonical periods.
///
/// # Errors
///
/// Returns an error if the cast to `Date` fails.
pub fn period_column(periods: &[Period]) -> Result<Column> {
    let days: Vec<i32> = periods.iter().map(Period::days_since_epoch).collect();
    let column = Column::new(DATE.into(), days).cast(&DataType::Date)?;
    Ok(column)
}

/// Reads the `DATE` column of `df` back as canonical periods.
///
/// # Errors
///
/// Returns [`ModelError::Parse`] if the column holds a null period.
pub fn periods(df: &DataFrame) -> Result<Vec<Period>> {
    let days = df.column(DATE)?.cast(&DataType::Int32)?;
    days.i32()?
        .into_iter()
        .map(|day| {
            day.map(|d| Period::from_date(NaiveDate::default() + chrono::Duration::days(d.into())))
                .ok_or_else(|| ModelError::Parse("null period in DATE column".to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(label: &str) -> Period {
        Period::from_quarter_label(label).unwrap()
    }

    fn frame(labels: &[&str], values: &[f64]) -> DataFrame {
        let periods: Vec<Period> = labels.iter().map(|l| period(l)).collect();
        DataFrame::new(vec![
            period_column(&periods).unwrap(),
            Column::new("VALUE".into(), values),
        ])
        .unwrap()
    }

    #[test]
    fn test_require_columns_reports_all_missing() {
        let df = frame(&["Q4 2017"], &[1.0]);
        let err = require_columns(&df, "income", &["VALUE", "REVENUE", "OPEX"]).unwrap_err();
        match err {
            ModelError::Schema { table, missing } => {
                assert_eq!(table, "income");
                assert_eq!(missing, vec!["REVENUE".to_string(), "OPEX".to_string()]);
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_ensure_period_descending_accepts_sorted() {
        let df = frame(&["Q3 2017", "Q2 2017", "Q1 2017"], &[3.0, 2.0, 1.0]);
        assert!(ensure_period_descending(&df, "t").is_ok());
    }

    #[test]
    fn test_ensure_period_descending_rejects_ascending() {
        let df = frame(&["Q1 2017", "Q2 2017"], &[1.0, 2.0]);
        assert!(matches!(
            ensure_period_descending(&df, "t"),
            Err(ModelError::UnsortedPeriods { .. })
        ));
    }

    #[test]
    fn test_ensure_period_descending_rejects_duplicates() {
        let df = frame(&["Q2 2017", "Q2 2017", "Q1 2017"], &[2.0, 2.0, 1.0]);
        assert!(ensure_period_descending(&df, "t").is_err());
    }

    #[test]
    fn test_sort_period_descending_is_stable() {
        let df = frame(&["Q1 2017", "Q3 2017", "Q2 2017"], &[1.0, 3.0, 2.0]);
        let sorted = sort_period_descending(df).unwrap();
        let values: Vec<f64> = sorted
            .column("VALUE")
            .unwrap()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(values, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_inner_join_surfaces_empty_result() {
        let left = frame(&["Q1 2017"], &[1.0]);
        let mut right = frame(&["Q2 2017"], &[2.0]);
        right.rename("VALUE", "OTHER".into()).unwrap();
        assert!(matches!(
            inner_join_on_period(&left, &right, "left", "right"),
            Err(ModelError::MissingPeriod { .. })
        ));
    }

    #[test]
    fn test_outer_join_keeps_union_of_periods() {
        let left = frame(&["Q2 2017", "Q1 2017"], &[2.0, 1.0]);
        let mut right = frame(&["Q3 2017", "Q2 2017"], &[30.0, 20.0]);
        right.rename("VALUE", "OTHER".into()).unwrap();
        let joined = outer_join_on_period(&left, &right).unwrap();
        assert_eq!(joined.height(), 3);
        // Union sorted descending; fields absent for a period stay null.
        let other = joined.column("OTHER").unwrap().f64().unwrap();
        assert_eq!(other.get(0), Some(30.0));
        assert_eq!(other.get(2), None);
    }

    #[test]
    fn test_period_column_round_trips() {
        let expected = vec![period("Q4 2017"), period("Q1 2017")];
        let df = DataFrame::new(vec![
            period_column(&expected).unwrap(),
            Column::new("VALUE".into(), vec![1.0, 2.0]),
        ])
        .unwrap();
        assert_eq!(periods(&df).unwrap(), expected);
    }
}
