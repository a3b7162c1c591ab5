#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for the equilibrium fundamentals pipeline.
//!
//! This crate provides the foundational vocabulary shared by every stage:
//!
//! - [`Period`] - the canonical fiscal-quarter-end time index
//! - [`StatementKind`] - the five statement types and their schemas
//! - [`ModelError`] / [`Result`] - pipeline error types
//! - [`frame`] - DataFrame preconditions and period-keyed joins
//! - [`Company`] - company identifiers

/// Company identifiers.
pub mod company;
/// Error types for pipeline operations.
pub mod error;
/// DataFrame preconditions and period-keyed helpers.
pub mod frame;
/// The canonical fiscal-period index.
pub mod period;
/// Statement schemas and metric codes.
pub mod schema;

// Re-export commonly used items at crate root
pub use company::Company;
pub use error::{ModelError, Result};
pub use period::Period;
pub use schema::{DATE, NO_DATA_SENTINEL, StatementKind, field, metric};
