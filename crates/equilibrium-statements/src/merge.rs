//! Merging statement extracts that cover overlapping historical ranges.
//!
//! A company's history arrives split across several workbooks whose period
//! ranges overlap at the seams. The merger concatenates the extracts, sorts
//! period-descending, and applies two policies: overlapping periods keep the
//! first-encountered row (callers list the higher-priority source first),
//! and no-data sentinels become zero. Both policies are deliberate and
//! exposed as functions of their own so they can be verified independently.

use polars::prelude::*;

use equilibrium_core::frame::sort_period_descending;
use equilibrium_core::{DATE, ModelError, Result};

/// Merges statement extracts into one deduplicated, descending time series.
///
/// Overlapping periods never fail; the row from the earliest-listed extract
/// wins.
///
/// # Errors
///
/// Returns [`ModelError::Config`] for an empty input list, or an error if
/// the extracts disagree on schema.
pub fn merge(extracts: Vec<DataFrame>) -> Result<DataFrame> {
    let mut iter = extracts.into_iter();
    let Some(mut combined) = iter.next() else {
        return Err(ModelError::Config(
            "no statement extracts to merge".to_string(),
        ));
    };
    for extract in iter {
        combined.vstack_mut(&extract)?;
    }
    let sorted = sort_period_descending(combined)?;
    let deduped = dedup_periods(sorted)?;
    sentinel_to_zero(deduped)
}

/// Keeps the first-encountered row for each period.
///
/// The sort preceding this step is stable, so for rows sharing a period the
/// original input ordering decides which survives.
///
/// # Errors
///
/// Returns an error if `df` has no `DATE` column.
pub fn dedup_periods(df: DataFrame) -> Result<DataFrame> {
    let out = df
        .lazy()
        .unique_stable(Some(vec![DATE.into()]), UniqueKeepStrategy::First)
        .collect()?;
    Ok(out)
}

/// Replaces no-data sentinels (carried as NaN since extraction) with zero on
/// every value column.
///
/// # Errors
///
/// Returns an error if a value column is not numeric.
pub fn sentinel_to_zero(df: DataFrame) -> Result<DataFrame> {
    let exprs: Vec<Expr> = df
        .get_column_names_owned()
        .into_iter()
        .filter(|name| name.as_str() != DATE)
        .map(|name| col(name.clone()).fill_nan(lit(0.0)))
        .collect();
    let out = df.lazy().with_columns(exprs).collect()?;
    Ok(out)
}
