#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! The batch pipeline over the member crates.
//!
//! - [`RunConfig`] - per-run configuration, loadable from JSON
//! - [`WorkbookSource`] / [`TreasurySource`](source::TreasurySource) -
//!   raw-table sources, with CSV implementations
//! - [`Pipeline`] - per-company statement/factor/valuation pipeline and
//!   the failure-isolating batch runner

/// Run configuration.
pub mod config;
/// Canonical table I/O.
pub mod io;
/// The per-company pipeline and batch runner.
pub mod pipeline;
/// Raw-table sources.
pub mod source;

pub use config::{CompanyConfig, OutputOptions, RunConfig, TreasuryConfig};
pub use equilibrium_core::{Company, ModelError, Period, Result, StatementKind};
pub use pipeline::{BatchReport, CompanyRun, MODEL_FILE, Pipeline, TREASURY_FILE, statement_table};
pub use source::{CsvTreasury, CsvWorkbook, TreasurySource, WorkbookSource};
