//! Raw-table sources.
//!
//! The pipeline consumes raw tables through two small traits so the
//! workbook format stays a collaborator concern: a [`WorkbookSource`] hands
//! out one raw sheet per statement kind, a [`TreasurySource`] the two raw
//! rate exports. The CSV implementations cover workbooks already exported
//! sheet-per-file; tests substitute in-memory sources.

use polars::prelude::DataFrame;
use std::path::PathBuf;

use equilibrium_core::{Result, StatementKind};

use crate::io::read_raw_csv;

/// A source of raw statement sheets for one workbook export.
pub trait WorkbookSource {
    /// A human-readable name for logs and error reports.
    fn name(&self) -> String;

    /// Returns the raw wide-format sheet for `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if the sheet cannot be produced.
    fn sheet(&self, kind: StatementKind) -> Result<DataFrame>;
}

/// A source of the two raw treasury-rate exports.
pub trait TreasurySource {
    /// Returns the raw (3-month, 10-year) rate tables.
    ///
    /// # Errors
    ///
    /// Returns an error if either table cannot be produced.
    fn rates(&self) -> Result<(DataFrame, DataFrame)>;
}

/// A workbook exported as one CSV per sheet in a directory, named after the
/// source sheet (e.g. `Income - Adjusted.csv`).
#[derive(Clone, Debug)]
pub struct CsvWorkbook {
    dir: PathBuf,
}

impl CsvWorkbook {
    /// Creates a source reading sheets from `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl WorkbookSource for CsvWorkbook {
    fn name(&self) -> String {
        self.dir.display().to_string()
    }

    fn sheet(&self, kind: StatementKind) -> Result<DataFrame> {
        read_raw_csv(self.dir.join(format!("{}.csv", kind.sheet_name())))
    }
}

/// Treasury exports read from two CSV files.
#[derive(Clone, Debug)]
pub struct CsvTreasury {
    three_month: PathBuf,
    ten_year: PathBuf,
}

impl CsvTreasury {
    /// Creates a source reading the 3-month and 10-year exports.
    #[must_use]
    pub fn new(three_month: impl Into<PathBuf>, ten_year: impl Into<PathBuf>) -> Self {
        Self {
            three_month: three_month.into(),
            ten_year: ten_year.into(),
        }
    }
}

impl TreasurySource for CsvTreasury {
    fn rates(&self) -> Result<(DataFrame, DataFrame)> {
        Ok((
            read_raw_csv(&self.three_month)?,
            read_raw_csv(&self.ten_year)?,
        ))
    }
}
