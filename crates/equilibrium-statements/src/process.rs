//! Per-statement processors.
//!
//! Each processor is a pure transform from a merged statement table (raw
//! metric codes) to the canonical schema consumed by the factor and
//! valuation engines. Derivations that look at the previous fiscal period
//! (change in working capital) validate the descending-period precondition
//! first.

use polars::prelude::*;

use equilibrium_core::frame::{ensure_period_descending, require_columns};
use equilibrium_core::{DATE, Result, StatementKind, field, metric};

/// Dispatches to the processor for `kind`.
///
/// # Errors
///
/// Returns [`ModelError::Schema`](equilibrium_core::ModelError::Schema) if
/// an expected input field is missing.
pub fn process(kind: StatementKind, df: DataFrame) -> Result<DataFrame> {
    match kind {
        StatementKind::Income => income_statement(df),
        StatementKind::BalanceSheet => balance_sheet(df),
        StatementKind::CashFlow => cash_flow(df),
        StatementKind::Shares => shares(df),
        StatementKind::StockValue => stock_value(df),
    }
}

/// Income statement: OPEX = cost of revenue + operating expenses; renames
/// revenue and tax fields.
///
/// Output columns: DATE, REVENUE, OPEX, EBITDA, TAX_EXPENSE.
///
/// # Errors
///
/// Returns a schema error if an expected input field is missing.
pub fn income_statement(df: DataFrame) -> Result<DataFrame> {
    require_columns(
        &df,
        "income statement",
        &[
            metric::SALES_REV_TURN,
            metric::COST_OF_REVENUE,
            metric::OPERATING_EXPENSES,
            metric::EBITDA,
            metric::INCOME_TAX_EXPENSE,
        ],
    )?;
    let out = df
        .lazy()
        .with_column(
            (col(metric::COST_OF_REVENUE) + col(metric::OPERATING_EXPENSES)).alias(field::OPEX),
        )
        .rename(
            [metric::SALES_REV_TURN, metric::INCOME_TAX_EXPENSE],
            [field::REVENUE, field::TAX_EXPENSE],
            true,
        )
        .select([
            col(DATE),
            col(field::REVENUE),
            col(field::OPEX),
            col(field::EBITDA),
            col(field::TAX_EXPENSE),
        ])
        .collect()?;
    Ok(out)
}

/// Balance sheet: working capital, its period-over-period change, cash and
/// investments, and total debt.
///
/// CHNG_WC subtracts the next row, which in descending-period order is the
/// previous fiscal quarter; the input must therefore already be sorted
/// descending.
///
/// Output columns: DATE, CHNG_WC, CASH_INVESTMENTS, DEBT, NON_CON_INT,
/// PREF_SEC.
///
/// # Errors
///
/// Returns a schema error if an expected input field is missing, or an
/// unsorted-periods error if the table is not period-descending.
pub fn balance_sheet(df: DataFrame) -> Result<DataFrame> {
    require_columns(
        &df,
        "balance sheet",
        &[
            metric::CURRENT_ASSETS,
            metric::CURRENT_LIABILITIES,
            metric::CASH_AND_EQUIVALENTS,
            metric::LT_INVESTMENTS,
            metric::ST_BORROW,
            metric::LT_BORROW,
            metric::MINORITY_INTEREST,
            metric::PREFERRED_EQUITY,
        ],
    )?;
    ensure_period_descending(&df, "balance sheet")?;
    let out = df
        .lazy()
        .with_column(
            (col(metric::CURRENT_ASSETS) - col(metric::CURRENT_LIABILITIES))
                .alias(field::WORKING_CAP),
        )
        .with_columns([
            (col(field::WORKING_CAP) - col(field::WORKING_CAP).shift(lit(-1)))
                .alias(field::CHNG_WC),
            (col(metric::CASH_AND_EQUIVALENTS) + col(metric::LT_INVESTMENTS))
                .alias(field::CASH_INVESTMENTS),
            (col(metric::ST_BORROW) + col(metric::LT_BORROW)).alias(field::DEBT),
        ])
        .rename(
            [metric::MINORITY_INTEREST, metric::PREFERRED_EQUITY],
            [field::NON_CON_INT, field::PREF_SEC],
            true,
        )
        .select([
            col(DATE),
            col(field::CHNG_WC),
            col(field::CASH_INVESTMENTS),
            col(field::DEBT),
            col(field::NON_CON_INT),
            col(field::PREF_SEC),
        ])
        .collect()?;
    Ok(out)
}

/// Cash flow: renames capex and free-cash-flow fields and flips the capex
/// sign. The source reports capex as a negative outflow; downstream
/// arithmetic subtracts it from EBITDA, so the canonical schema carries the
/// positive magnitude.
///
/// Output columns: DATE, CAPEX, FREE_CASH_FLOW.
///
/// # Errors
///
/// Returns a schema error if an expected input field is missing.
pub fn cash_flow(df: DataFrame) -> Result<DataFrame> {
    require_columns(
        &df,
        "cash flow",
        &[metric::CHANGE_IN_FIXED_ASSETS, metric::FREE_CASH_FLOW],
    )?;
    let out = df
        .lazy()
        .rename(
            [metric::CHANGE_IN_FIXED_ASSETS, metric::FREE_CASH_FLOW],
            [field::CAPEX, field::FREE_CASH_FLOW],
            true,
        )
        .with_column((col(field::CAPEX) * lit(-1.0)).alias(field::CAPEX))
        .select([col(DATE), col(field::CAPEX), col(field::FREE_CASH_FLOW)])
        .collect()?;
    Ok(out)
}

/// Shares: renames the diluted weighted-average shares field.
///
/// Output columns: DATE, WADS.
///
/// # Errors
///
/// Returns a schema error if the shares field is missing.
pub fn shares(df: DataFrame) -> Result<DataFrame> {
    require_columns(&df, "shares", &[metric::DILUTED_WA_SHARES])?;
    let out = df
        .lazy()
        .rename([metric::DILUTED_WA_SHARES], [field::WADS], true)
        .select([col(DATE), col(field::WADS)])
        .collect()?;
    Ok(out)
}

/// Stock value: renames the last-price field.
///
/// Output columns: DATE, PRICE.
///
/// # Errors
///
/// Returns a schema error if the price field is missing.
pub fn stock_value(df: DataFrame) -> Result<DataFrame> {
    require_columns(&df, "stock value", &[metric::LAST_PRICE])?;
    let out = df
        .lazy()
        .rename([metric::LAST_PRICE], [field::PRICE], true)
        .select([col(DATE), col(field::PRICE)])
        .collect()?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use equilibrium_core::frame::period_column;
    use equilibrium_core::{ModelError, Period};

    fn dates(labels: &[&str]) -> Column {
        let periods: Vec<Period> = labels
            .iter()
            .map(|l| Period::from_quarter_label(l).unwrap())
            .collect();
        period_column(&periods).unwrap()
    }

    fn values(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
        df.column(name).unwrap().f64().unwrap().into_iter().collect()
    }

    #[test]
    fn test_income_statement_derives_opex_and_renames() {
        let df = DataFrame::new(vec![
            dates(&["Q2 2017", "Q1 2017"]),
            Column::new(metric::SALES_REV_TURN.into(), [110.0, 100.0]),
            Column::new(metric::COST_OF_REVENUE.into(), [40.0, 38.0]),
            Column::new(metric::OPERATING_EXPENSES.into(), [20.0, 19.0]),
            Column::new(metric::EBITDA.into(), [50.0, 43.0]),
            Column::new(metric::INCOME_TAX_EXPENSE.into(), [5.0, 4.0]),
        ])
        .unwrap();
        let out = income_statement(df).unwrap();
        assert_eq!(
            out.get_column_names()
                .iter()
                .map(|n| n.as_str())
                .collect::<Vec<_>>(),
            vec![
                DATE,
                field::REVENUE,
                field::OPEX,
                field::EBITDA,
                field::TAX_EXPENSE
            ]
        );
        assert_eq!(values(&out, field::OPEX), vec![Some(60.0), Some(57.0)]);
        assert_eq!(values(&out, field::REVENUE), vec![Some(110.0), Some(100.0)]);
    }

    #[test]
    fn test_income_statement_missing_field_is_schema_error() {
        let df = DataFrame::new(vec![
            dates(&["Q1 2017"]),
            Column::new(metric::SALES_REV_TURN.into(), [100.0]),
        ])
        .unwrap();
        assert!(matches!(
            income_statement(df),
            Err(ModelError::Schema { .. })
        ));
    }

    fn balance_frame(labels: &[&str], assets: &[f64], liabs: &[f64]) -> DataFrame {
        let n = labels.len();
        DataFrame::new(vec![
            dates(labels),
            Column::new(metric::CURRENT_ASSETS.into(), assets),
            Column::new(metric::CURRENT_LIABILITIES.into(), liabs),
            Column::new(metric::CASH_AND_EQUIVALENTS.into(), vec![10.0; n]),
            Column::new(metric::LT_INVESTMENTS.into(), vec![5.0; n]),
            Column::new(metric::ST_BORROW.into(), vec![3.0; n]),
            Column::new(metric::LT_BORROW.into(), vec![7.0; n]),
            Column::new(metric::MINORITY_INTEREST.into(), vec![1.0; n]),
            Column::new(metric::PREFERRED_EQUITY.into(), vec![2.0; n]),
        ])
        .unwrap()
    }

    #[test]
    fn test_balance_sheet_change_in_working_capital_uses_prior_period() {
        let df = balance_frame(
            &["Q3 2017", "Q2 2017", "Q1 2017"],
            &[50.0, 40.0, 25.0],
            &[20.0, 20.0, 20.0],
        );
        let out = balance_sheet(df).unwrap();
        // Working capital is [30, 20, 5] descending; each change subtracts
        // the quarter below. The oldest quarter has no prior period.
        assert_eq!(
            values(&out, field::CHNG_WC),
            vec![Some(10.0), Some(15.0), None]
        );
        assert_eq!(
            values(&out, field::CASH_INVESTMENTS),
            vec![Some(15.0); 3]
        );
        assert_eq!(values(&out, field::DEBT), vec![Some(10.0); 3]);
    }

    #[test]
    fn test_balance_sheet_rejects_unsorted_input() {
        let df = balance_frame(
            &["Q1 2017", "Q2 2017"],
            &[25.0, 40.0],
            &[20.0, 20.0],
        );
        assert!(matches!(
            balance_sheet(df),
            Err(ModelError::UnsortedPeriods { .. })
        ));
    }

    #[test]
    fn test_cash_flow_flips_capex_sign() {
        let df = DataFrame::new(vec![
            dates(&["Q2 2017", "Q1 2017"]),
            Column::new(metric::CHANGE_IN_FIXED_ASSETS.into(), [-12.0, -8.0]),
            Column::new(metric::FREE_CASH_FLOW.into(), [30.0, 25.0]),
        ])
        .unwrap();
        let out = cash_flow(df).unwrap();
        assert_eq!(values(&out, field::CAPEX), vec![Some(12.0), Some(8.0)]);
        assert_eq!(
            values(&out, field::FREE_CASH_FLOW),
            vec![Some(30.0), Some(25.0)]
        );
    }

    #[test]
    fn test_shares_and_stock_value_rename() {
        let shares_df = DataFrame::new(vec![
            dates(&["Q1 2017"]),
            Column::new(metric::DILUTED_WA_SHARES.into(), [512.0]),
        ])
        .unwrap();
        let out = shares(shares_df).unwrap();
        assert_eq!(values(&out, field::WADS), vec![Some(512.0)]);

        let price_df = DataFrame::new(vec![
            dates(&["Q1 2017"]),
            Column::new(metric::LAST_PRICE.into(), [42.5]),
        ])
        .unwrap();
        let out = stock_value(price_df).unwrap();
        assert_eq!(values(&out, field::PRICE), vec![Some(42.5)]);
    }
}
