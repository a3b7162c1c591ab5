#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Statement extraction, merging and canonical-schema processing.
//!
//! The stages compose in order:
//!
//! 1. [`extract`](extract::extract) - raw wide sheet to time-indexed extract
//! 2. [`merge`](merge::merge) - overlapping extracts to one deduplicated series
//! 3. [`process`](process::process) - raw metric codes to the canonical schema

/// Statement extraction from raw wide-format sheets.
pub mod extract;
/// Merging statement extracts that cover overlapping ranges.
pub mod merge;
/// Per-statement processors.
pub mod process;

pub use extract::extract;
pub use merge::{dedup_periods, merge, sentinel_to_zero};
pub use process::{balance_sheet, cash_flow, income_statement, process, shares, stock_value};
