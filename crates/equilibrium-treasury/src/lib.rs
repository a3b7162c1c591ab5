#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Treasury-rate series builder.
//!
//! The two source exports observe rates at quarter-start months; each
//! observation is relabeled onto the filing quarter's end month (the
//! canonical [`Period`] convention) and the series are outer-joined so a
//! gap in one never drops the other's rate.

use polars::prelude::*;

use equilibrium_core::frame::{outer_join_on_period, period_column};
use equilibrium_core::{ModelError, Period, Result, field};

/// Column carrying the observation date in the raw exports.
pub const OBSERVATION_DATE: &str = "observation_date";

/// Builds the treasury series from the raw 3-month and 10-year exports.
///
/// Output columns: DATE, TB3M, TB10YR, sorted period-descending.
///
/// # Errors
///
/// Returns [`ModelError::Parse`] for a malformed observation date,
/// [`ModelError::Schema`](ModelError::Schema) if an export lacks its
/// columns, and [`ModelError::MissingPeriod`] if the join comes out empty.
pub fn treasury_series(three_month: &DataFrame, ten_year: &DataFrame) -> Result<DataFrame> {
    let short = relabel_observations(three_month, field::TB3M)?;
    let long = relabel_observations(ten_year, field::TB10YR)?;
    let joined = outer_join_on_period(&short, &long)?;
    if joined.height() == 0 {
        return Err(ModelError::MissingPeriod {
            left: "3-month treasury".to_string(),
            right: "10-year treasury".to_string(),
        });
    }
    Ok(joined)
}

/// Relabels a raw rate export onto the canonical period index.
///
/// The export is expected to carry an `observation_date` column and one
/// rate column; the rate column is renamed to `rate_field`.
///
/// # Errors
///
/// Returns a schema error when either column is absent and a parse error
/// for an observation date that does not resolve to a period.
pub fn relabel_observations(raw: &DataFrame, rate_field: &str) -> Result<DataFrame> {
    let observations = raw
        .column(OBSERVATION_DATE)
        .map_err(|_| ModelError::Schema {
            table: rate_field.to_string(),
            missing: vec![OBSERVATION_DATE.to_string()],
        })?
        .cast(&DataType::String)?;

    let rates = raw
        .get_columns()
        .iter()
        .find(|c| c.name().as_str() != OBSERVATION_DATE)
        .ok_or_else(|| ModelError::Schema {
            table: rate_field.to_string(),
            missing: vec![rate_field.to_string()],
        })?
        .cast(&DataType::Float64)?;

    let periods: Vec<Period> = observations
        .str()?
        .into_iter()
        .map(|obs| {
            let obs = obs.ok_or_else(|| {
                ModelError::Parse("null observation date in treasury export".to_string())
            })?;
            Period::from_observation_date(obs)
        })
        .collect::<Result<_>>()?;

    Ok(DataFrame::new(vec![
        period_column(&periods)?,
        rates.with_name(rate_field.into()),
    ])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use equilibrium_core::frame::periods;

    fn date(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[test]
    fn test_relabel_shifts_observation_months() {
        let raw = df!(
            OBSERVATION_DATE => ["2017-04-01", "2017-01-01", "2016-10-01"],
            "TB3MS" => [0.8, 0.6, 0.4],
        )
        .unwrap();
        let out = relabel_observations(&raw, field::TB3M).unwrap();
        let dates: Vec<NaiveDate> = periods(&out).unwrap().iter().map(|p| p.date()).collect();
        assert_eq!(
            dates,
            vec![date(2017, 6), date(2017, 3), date(2016, 12)]
        );
        assert_eq!(
            out.column(field::TB3M).unwrap().f64().unwrap().get(0),
            Some(0.8)
        );
    }

    #[test]
    fn test_relabel_rejects_malformed_dates() {
        let raw = df!(
            OBSERVATION_DATE => ["not a date"],
            "TB3MS" => [0.8],
        )
        .unwrap();
        assert!(matches!(
            relabel_observations(&raw, field::TB3M),
            Err(ModelError::Parse(_))
        ));
    }

    #[test]
    fn test_relabel_requires_observation_column() {
        let raw = df!("TB3MS" => [0.8]).unwrap();
        assert!(matches!(
            relabel_observations(&raw, field::TB3M),
            Err(ModelError::Schema { .. })
        ));
    }

    #[test]
    fn test_series_outer_joins_and_sorts_descending() {
        let short = df!(
            OBSERVATION_DATE => ["2017-01-01", "2016-10-01"],
            "TB3MS" => [0.6, 0.4],
        )
        .unwrap();
        let long = df!(
            OBSERVATION_DATE => ["2017-04-01", "2017-01-01"],
            "DGS10" => [2.3, 2.4],
        )
        .unwrap();
        let out = treasury_series(&short, &long).unwrap();
        assert_eq!(out.height(), 3);
        let dates: Vec<NaiveDate> = periods(&out).unwrap().iter().map(|p| p.date()).collect();
        assert_eq!(
            dates,
            vec![date(2017, 6), date(2017, 3), date(2016, 12)]
        );
        // 2017-06 exists only in the 10-year series; TB3M stays null there.
        let tb3m = out.column(field::TB3M).unwrap().f64().unwrap();
        assert_eq!(tb3m.get(0), None);
        assert_eq!(tb3m.get(1), Some(0.6));
    }
}
