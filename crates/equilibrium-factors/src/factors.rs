//! The factor/ratio engine.
//!
//! Builds the per-period factor rows of the model: trailing-twelve-month
//! aggregates of the flow metrics, margins against TTM revenue, growth
//! rates against the prior fiscal quarter, and the treasury rates for the
//! same periods.

use polars::prelude::*;

use equilibrium_core::frame::{
    ensure_period_descending, inner_join_on_period, require_columns, sort_period_descending,
};
use equilibrium_core::{DATE, Result, field};

/// Fields the factor engine consumes from the company dataset.
const INPUT_FIELDS: [&str; 6] = [
    field::REVENUE,
    field::OPEX,
    field::EBITDA,
    field::TAX_EXPENSE,
    field::CAPEX,
    field::CHNG_WC,
];

/// Fields transformed to trailing-twelve-month values.
const TTM_FIELDS: [&str; 7] = [
    field::REVENUE,
    field::OPEX,
    field::EBITDA,
    field::TAX_EXPENSE,
    field::CAPEX,
    field::CHNG_WC,
    field::FREE_CASH_FLOW,
];

/// Builds the factor table from the company dataset and treasury series.
///
/// Steps, in order: floor negative EBITDA at zero, derive free cash flow,
/// transform every flow metric to trailing twelve months, drop periods
/// without a full trailing year, compute margins and growth rates, and
/// inner-join the treasury rates.
///
/// Output columns: DATE, REVENUE, EBITDA_MARGIN, TAX_EXPENSE_MARGIN,
/// CAPEX_MARGIN, CHNG_WC_MARGIN, REVENUE_GROWTH, EBITDA_GROWTH,
/// CAPEX_GROWTH, TB3M, TB10YR, sorted period-descending.
///
/// # Errors
///
/// Returns a schema error for missing input fields, an unsorted-periods
/// error if the dataset is not period-descending, and a missing-period
/// error when no factor period is covered by the treasury series.
pub fn factor_table(company: &DataFrame, treasury: &DataFrame) -> Result<DataFrame> {
    require_columns(company, "company dataset", &INPUT_FIELDS)?;
    ensure_period_descending(company, "company dataset")?;

    let ttm: Vec<Expr> = TTM_FIELDS
        .iter()
        .map(|name| trailing_twelve_months(name))
        .collect();

    let factors = company
        .clone()
        .lazy()
        // Negative EBITDA means zero margin, not a negative ratio.
        .with_column(
            when(col(field::EBITDA).lt(lit(0.0)))
                .then(lit(0.0))
                .otherwise(col(field::EBITDA))
                .alias(field::EBITDA),
        )
        .with_column(
            (col(field::EBITDA) - col(field::TAX_EXPENSE) - col(field::CAPEX)
                - col(field::CHNG_WC))
            .alias(field::FREE_CASH_FLOW),
        )
        .with_columns(ttm)
        // A period without four quarters of history has no TTM value.
        .filter(col(field::REVENUE).is_not_null())
        .with_columns([
            (col(field::EBITDA) / col(field::REVENUE)).alias(field::EBITDA_MARGIN),
            ((col(field::REVENUE) - col(field::EBITDA)) / col(field::REVENUE))
                .alias(field::EBITDA_EXPENSE_MARGIN),
            (col(field::TAX_EXPENSE) / col(field::REVENUE)).alias(field::TAX_EXPENSE_MARGIN),
            (col(field::CAPEX) / col(field::REVENUE)).alias(field::CAPEX_MARGIN),
            (col(field::CHNG_WC) / col(field::REVENUE)).alias(field::CHNG_WC_MARGIN),
        ])
        .with_columns([
            period_over_period_growth(field::REVENUE, field::REVENUE_GROWTH),
            period_over_period_growth(field::EBITDA_EXPENSE_MARGIN, field::EBITDA_GROWTH),
            period_over_period_growth(field::CAPEX_MARGIN, field::CAPEX_GROWTH),
        ])
        .collect()?;

    let joined = inner_join_on_period(&factors, treasury, "factor table", "treasury series")?;
    let out = joined
        .lazy()
        .select([
            col(DATE),
            col(field::REVENUE),
            col(field::EBITDA_MARGIN),
            col(field::TAX_EXPENSE_MARGIN),
            col(field::CAPEX_MARGIN),
            col(field::CHNG_WC_MARGIN),
            col(field::REVENUE_GROWTH),
            col(field::EBITDA_GROWTH),
            col(field::CAPEX_GROWTH),
            col(field::TB3M),
            col(field::TB10YR),
        ])
        .collect()?;
    sort_period_descending(out)
}

/// Trailing-twelve-month transform of one field.
///
/// Sums the row with the three rows below it (the three preceding fiscal
/// quarters, given descending order). Fewer than four quarters of history
/// propagates null; a partial sum is never produced.
#[must_use]
pub fn trailing_twelve_months(name: &str) -> Expr {
    (col(name) + col(name).shift(lit(-1)) + col(name).shift(lit(-2)) + col(name).shift(lit(-3)))
        .alias(name)
}

/// Percentage change of `source` against the prior fiscal quarter (the row
/// below, given descending order), aliased to `name`.
///
/// A zero base, an infinite result, or a missing prior period all yield
/// zero; NaN and infinity never reach the output.
#[must_use]
pub fn period_over_period_growth(source: &str, name: &str) -> Expr {
    let prior = col(source).shift(lit(-1));
    when(prior.clone().eq(lit(0.0)))
        .then(lit(0.0))
        .otherwise((col(source) - prior.clone()) / prior)
        .fill_nan(lit(0.0))
        .fill_null(lit(0.0))
        .alias(name)
}
