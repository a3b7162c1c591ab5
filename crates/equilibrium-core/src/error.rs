//! Error types for the fundamentals pipeline.
//!
//! This module defines [`ModelError`] which covers all error cases that can occur
//! when extracting, merging, deriving, or persisting statement tables.

use thiserror::Error;

/// Errors that can occur while building a company model.
#[derive(Error, Debug)]
pub enum ModelError {
    /// An unrecognized quarter label or observation date.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Required columns are missing from an input table.
    #[error("Schema error in {table}: missing columns {missing:?}")]
    Schema {
        /// The table being validated.
        table: String,
        /// The columns that were required but absent.
        missing: Vec<String>,
    },

    /// A join produced an empty result.
    #[error("No overlapping periods between {left} and {right}")]
    MissingPeriod {
        /// Left side of the join.
        left: String,
        /// Right side of the join.
        right: String,
    },

    /// A table was not sorted period-descending where a shift-based
    /// derivation requires it.
    #[error("Table {table} is not sorted period-descending")]
    UnsortedPeriods {
        /// The offending table.
        table: String,
    },

    /// The run configuration is invalid.
    #[error("Config error: {0}")]
    Config(String),

    /// A DataFrame operation failed.
    #[error(transparent)]
    Polars(#[from] polars::error::PolarsError),

    /// An I/O operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`ModelError`].
pub type Result<T> = std::result::Result<T, ModelError>;
