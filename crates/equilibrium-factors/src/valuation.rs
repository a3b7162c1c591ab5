//! The valuation engine.
//!
//! Derives non-operating assets, market capitalization and firm value from
//! the balance-sheet, share and price fields of the company dataset. Market
//! cap and firm value deliberately lag their share-count and asset inputs
//! by one fiscal quarter; the smoothing convention of the source
//! methodology is preserved as-is.

use polars::prelude::*;

use equilibrium_core::frame::{ensure_period_descending, require_columns};
use equilibrium_core::{DATE, Result, field};

/// Fields the valuation engine consumes from the company dataset.
const INPUT_FIELDS: [&str; 6] = [
    field::CASH_INVESTMENTS,
    field::DEBT,
    field::PREF_SEC,
    field::NON_CON_INT,
    field::WADS,
    field::PRICE,
];

/// Builds the valuation table from the company dataset.
///
/// - NON_OP_ASSETS = CASH_INVESTMENTS − DEBT − PREF_SEC − NON_CON_INT
/// - MARKET_CAP(n) = PRICE(n) × WADS(n−1)
/// - FIRM_VALUE(n) = MARKET_CAP(n) − NON_OP_ASSETS(n−1)
///
/// Output columns: DATE, FIRM_VALUE, NON_OP_ASSETS, WADS, PRICE.
///
/// # Errors
///
/// Returns a schema error for missing input fields and an unsorted-periods
/// error if the dataset is not period-descending.
pub fn valuation_table(company: &DataFrame) -> Result<DataFrame> {
    require_columns(company, "company dataset", &INPUT_FIELDS)?;
    ensure_period_descending(company, "company dataset")?;

    let out = company
        .clone()
        .lazy()
        .with_column(
            (col(field::CASH_INVESTMENTS)
                - col(field::DEBT)
                - col(field::PREF_SEC)
                - col(field::NON_CON_INT))
            .alias(field::NON_OP_ASSETS),
        )
        .with_column(
            (col(field::PRICE) * col(field::WADS).shift(lit(-1))).alias(field::MARKET_CAP),
        )
        .with_column(
            (col(field::MARKET_CAP) - col(field::NON_OP_ASSETS).shift(lit(-1)))
                .alias(field::FIRM_VALUE),
        )
        .select([
            col(DATE),
            col(field::FIRM_VALUE),
            col(field::NON_OP_ASSETS),
            col(field::WADS),
            col(field::PRICE),
        ])
        .collect()?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use equilibrium_core::frame::period_column;
    use equilibrium_core::{ModelError, Period};

    fn dataset() -> DataFrame {
        let periods: Vec<Period> = ["Q3 2017", "Q2 2017", "Q1 2017"]
            .iter()
            .map(|l| Period::from_quarter_label(l).unwrap())
            .collect();
        DataFrame::new(vec![
            period_column(&periods).unwrap(),
            Column::new(field::CASH_INVESTMENTS.into(), [100.0, 90.0, 80.0]),
            Column::new(field::DEBT.into(), [40.0, 40.0, 40.0]),
            Column::new(field::PREF_SEC.into(), [5.0, 5.0, 5.0]),
            Column::new(field::NON_CON_INT.into(), [5.0, 5.0, 5.0]),
            Column::new(field::WADS.into(), [1000.0, 990.0, 980.0]),
            Column::new(field::PRICE.into(), [12.0, 11.0, 10.0]),
        ])
        .unwrap()
    }

    fn values(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
        df.column(name).unwrap().f64().unwrap().into_iter().collect()
    }

    #[test]
    fn test_non_operating_assets() {
        let out = valuation_table(&dataset()).unwrap();
        assert_eq!(
            values(&out, field::NON_OP_ASSETS),
            vec![Some(50.0), Some(40.0), Some(30.0)]
        );
    }

    #[test]
    fn test_firm_value_lags_shares_and_assets_one_period() {
        let out = valuation_table(&dataset()).unwrap();
        // MARKET_CAP(n) = PRICE(n) * WADS(n-1): 12 * 990, 11 * 980.
        // FIRM_VALUE(n) = MARKET_CAP(n) - NON_OP_ASSETS(n-1).
        assert_eq!(
            values(&out, field::FIRM_VALUE),
            vec![Some(12.0 * 990.0 - 40.0), Some(11.0 * 980.0 - 30.0), None]
        );
    }

    #[test]
    fn test_valuation_rejects_unsorted_dataset() {
        let df = dataset().reverse();
        assert!(matches!(
            valuation_table(&df),
            Err(ModelError::UnsortedPeriods { .. })
        ));
    }

    #[test]
    fn test_valuation_missing_field_is_schema_error() {
        let df = dataset().drop(field::PRICE).unwrap();
        assert!(matches!(
            valuation_table(&df),
            Err(ModelError::Schema { .. })
        ));
    }
}
