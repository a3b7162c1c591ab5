#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Factor/ratio and valuation engines.
//!
//! - [`factor_table`](factors::factor_table) - TTM aggregates, margins,
//!   growth rates and treasury rates per period
//! - [`valuation_table`](valuation::valuation_table) - non-operating
//!   assets, market capitalization and firm value per period

/// The factor/ratio engine.
pub mod factors;
/// The valuation engine.
pub mod valuation;

pub use factors::{factor_table, period_over_period_growth, trailing_twelve_months};
pub use valuation::valuation_table;
