//! Canonical table I/O.
//!
//! Every persisted table is a CSV with the `DATE` period index as its first
//! column. Writing and reading are inverses: a table written here and read
//! back reproduces the same period-indexed rows in the same order.

use polars::prelude::*;
use std::fs;
use std::path::Path;

use equilibrium_core::Result;

use crate::config::OutputOptions;

/// Writes a canonical table to `path`, creating parent directories as
/// needed.
///
/// # Errors
///
/// Returns an error if the file cannot be created or serialization fails.
pub fn write_table(
    df: &mut DataFrame,
    path: impl AsRef<Path>,
    options: &OutputOptions,
) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_float_precision(options.float_precision)
        .finish(df)?;
    Ok(())
}

/// Reads a canonical table back, parsing the `DATE` column to dates.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn read_table(path: impl AsRef<Path>) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_try_parse_dates(true))
        .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
        .finish()?;
    Ok(df)
}

/// Reads a raw export without any date parsing; cells keep their exported
/// text so the extractor can interpret sentinels itself.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn read_raw_csv(path: impl AsRef<Path>) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
        .finish()?;
    Ok(df)
}
