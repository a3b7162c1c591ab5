//! Statement schemas and metric codes.
//!
//! The raw workbooks identify every line item by a Bloomberg metric code;
//! the pipeline selects a fixed subset per statement and renames them into
//! the canonical column set the model is built from. Both vocabularies live
//! here so each stage validates against the same names.

/// Column name of the canonical period index on every table.
pub const DATE: &str = "DATE";

/// Token the source exports use for "no data" cells.
pub const NO_DATA_SENTINEL: &str = "\u{2014}";

/// Raw Bloomberg metric codes selected from the source sheets.
pub mod metric {
    /// Revenue.
    pub const SALES_REV_TURN: &str = "SALES_REV_TURN";
    /// Cost of revenue.
    pub const COST_OF_REVENUE: &str = "IS_COGS_TO_FE_AND_PP_AND_G";
    /// Operating expenses.
    pub const OPERATING_EXPENSES: &str = "IS_OPERATING_EXPN";
    /// EBITDA.
    pub const EBITDA: &str = "EBITDA";
    /// Income tax expense.
    pub const INCOME_TAX_EXPENSE: &str = "IS_INC_TAX_EXP";
    /// Total current assets.
    pub const CURRENT_ASSETS: &str = "BS_CUR_ASSET_REPORT";
    /// Total current liabilities.
    pub const CURRENT_LIABILITIES: &str = "BS_CUR_LIAB";
    /// Cash, cash equivalents and short-term investments.
    pub const CASH_AND_EQUIVALENTS: &str = "C&CE_AND_STI_DETAILED";
    /// Long-term investments and receivables.
    pub const LT_INVESTMENTS: &str = "BS_LT_INVEST";
    /// Short-term borrowings.
    pub const ST_BORROW: &str = "BS_ST_BORROW";
    /// Long-term borrowings.
    pub const LT_BORROW: &str = "BS_LT_BORROW";
    /// Minority / non-controlling interest.
    pub const MINORITY_INTEREST: &str = "MINORITY_NONCONTROLLING_INTEREST";
    /// Preferred equity and hybrid capital.
    pub const PREFERRED_EQUITY: &str = "BS_PFD_EQTY_&_HYBRID_CPTL";
    /// Change in fixed and intangible assets (capex, reported negative).
    pub const CHANGE_IN_FIXED_ASSETS: &str = "CHG_IN_FXD_&_INTANG_AST_DETAILED";
    /// Free cash flow.
    pub const FREE_CASH_FLOW: &str = "CF_FREE_CASH_FLOW";
    /// Diluted weighted-average shares.
    pub const DILUTED_WA_SHARES: &str = "IS_SH_FOR_DILUTED_EPS";
    /// Last price.
    pub const LAST_PRICE: &str = "PX_LAST";
}

/// Canonical column names of the processed and derived tables.
pub mod field {
    /// Quarterly revenue.
    pub const REVENUE: &str = "REVENUE";
    /// Operating expenses including cost of revenue.
    pub const OPEX: &str = "OPEX";
    /// EBITDA.
    pub const EBITDA: &str = "EBITDA";
    /// Income tax expense.
    pub const TAX_EXPENSE: &str = "TAX_EXPENSE";
    /// Working capital (current assets less current liabilities).
    pub const WORKING_CAP: &str = "WORKING_CAP";
    /// Period-over-period change in working capital.
    pub const CHNG_WC: &str = "CHNG_WC";
    /// Cash, equivalents and long-term investments.
    pub const CASH_INVESTMENTS: &str = "CASH_INVESTMENTS";
    /// Short- plus long-term borrowings.
    pub const DEBT: &str = "DEBT";
    /// Non-controlling interest.
    pub const NON_CON_INT: &str = "NON_CON_INT";
    /// Preferred securities.
    pub const PREF_SEC: &str = "PREF_SEC";
    /// Capital expenditures, positive magnitude.
    pub const CAPEX: &str = "CAPEX";
    /// Free cash flow.
    pub const FREE_CASH_FLOW: &str = "FREE_CASH_FLOW";
    /// Diluted weighted-average shares.
    pub const WADS: &str = "WADS";
    /// Last stock price of the period.
    pub const PRICE: &str = "PRICE";
    /// 3-month treasury bill rate.
    pub const TB3M: &str = "TB3M";
    /// 10-year treasury rate.
    pub const TB10YR: &str = "TB10YR";
    /// EBITDA as a fraction of revenue.
    pub const EBITDA_MARGIN: &str = "EBITDA_MARGIN";
    /// Non-EBITDA share of revenue.
    pub const EBITDA_EXPENSE_MARGIN: &str = "EBITDA_EXPENSE_MARGIN";
    /// Tax expense as a fraction of revenue.
    pub const TAX_EXPENSE_MARGIN: &str = "TAX_EXPENSE_MARGIN";
    /// Capex as a fraction of revenue.
    pub const CAPEX_MARGIN: &str = "CAPEX_MARGIN";
    /// Change in working capital as a fraction of revenue.
    pub const CHNG_WC_MARGIN: &str = "CHNG_WC_MARGIN";
    /// Period-over-period revenue growth.
    pub const REVENUE_GROWTH: &str = "REVENUE_GROWTH";
    /// Period-over-period growth of the EBITDA expense margin.
    pub const EBITDA_GROWTH: &str = "EBITDA_GROWTH";
    /// Period-over-period growth of the capex margin.
    pub const CAPEX_GROWTH: &str = "CAPEX_GROWTH";
    /// Non-operating assets.
    pub const NON_OP_ASSETS: &str = "NON_OP_ASSETS";
    /// Market capitalization.
    pub const MARKET_CAP: &str = "MARKET_CAP";
    /// Firm value.
    pub const FIRM_VALUE: &str = "FIRM_VALUE";
}

/// The five statement types a company workbook exports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// Adjusted income statement.
    Income,
    /// Standardized balance sheet.
    BalanceSheet,
    /// Standardized cash flow statement.
    CashFlow,
    /// Per-share data.
    Shares,
    /// Stock price data.
    StockValue,
}

impl StatementKind {
    /// All statement kinds, in processing order.
    pub const ALL: [Self; 5] = [
        Self::Income,
        Self::BalanceSheet,
        Self::CashFlow,
        Self::Shares,
        Self::StockValue,
    ];

    /// Name of the sheet carrying this statement in the source workbooks.
    #[must_use]
    pub const fn sheet_name(&self) -> &'static str {
        match self {
            Self::Income => "Income - Adjusted",
            Self::BalanceSheet => "Bal Sheet - Standardized",
            Self::CashFlow => "Cash Flow - Standardized",
            Self::Shares => "Per Share",
            Self::StockValue => "Stock Value",
        }
    }

    /// The ordered metric codes the extractor selects for this statement.
    #[must_use]
    pub const fn required_metrics(&self) -> &'static [&'static str] {
        match self {
            Self::Income => &[
                metric::SALES_REV_TURN,
                metric::COST_OF_REVENUE,
                metric::OPERATING_EXPENSES,
                metric::EBITDA,
                metric::INCOME_TAX_EXPENSE,
            ],
            Self::BalanceSheet => &[
                metric::CURRENT_ASSETS,
                metric::CURRENT_LIABILITIES,
                metric::CASH_AND_EQUIVALENTS,
                metric::LT_INVESTMENTS,
                metric::ST_BORROW,
                metric::LT_BORROW,
                metric::MINORITY_INTEREST,
                metric::PREFERRED_EQUITY,
            ],
            Self::CashFlow => &[metric::CHANGE_IN_FIXED_ASSETS, metric::FREE_CASH_FLOW],
            Self::Shares => &[metric::DILUTED_WA_SHARES],
            Self::StockValue => &[metric::LAST_PRICE],
        }
    }

    /// File name of the canonical per-statement output.
    #[must_use]
    pub const fn output_file(&self) -> &'static str {
        match self {
            Self::Income => "income_statement.csv",
            Self::BalanceSheet => "balance_sheet.csv",
            Self::CashFlow => "cash_flow.csv",
            Self::Shares => "shares.csv",
            Self::StockValue => "stock_values.csv",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_names_match_source_workbooks() {
        assert_eq!(StatementKind::Income.sheet_name(), "Income - Adjusted");
        assert_eq!(StatementKind::Shares.sheet_name(), "Per Share");
    }

    #[test]
    fn test_required_metrics_are_nonempty_and_unique() {
        for kind in StatementKind::ALL {
            let metrics = kind.required_metrics();
            assert!(!metrics.is_empty());
            let mut seen = std::collections::HashSet::new();
            for m in metrics {
                assert!(seen.insert(m), "duplicate metric {m} in {kind:?}");
            }
        }
    }

    #[test]
    fn test_output_files_are_distinct() {
        let files: std::collections::HashSet<_> = StatementKind::ALL
            .iter()
            .map(|k| k.output_file())
            .collect();
        assert_eq!(files.len(), StatementKind::ALL.len());
    }
}
