//! Statement extraction from raw wide-format sheets.
//!
//! A raw sheet arrives wide: column 0 is a descriptive label, column 1 the
//! metric code, and every remaining column one reporting period, with a
//! leading date-mapping row. Extraction selects the statement's required
//! metrics, drops forecast and current-period columns, and emits one row per
//! period with a `Date`-typed `DATE` column.

use polars::prelude::*;
use std::collections::HashMap;

use equilibrium_core::frame::period_column;
use equilibrium_core::{ModelError, NO_DATA_SENTINEL, Period, Result, StatementKind};

/// Extracts a statement table from a raw sheet.
///
/// Output columns are `DATE` followed by the statement's required metrics in
/// schema order, still under their raw metric codes; rows appear in the
/// sheet's column order (oldest period first in the source exports). Cells
/// holding the no-data sentinel become NaN, a marker the merge policy later
/// converts to zero; truly absent cells stay null.
///
/// # Errors
///
/// Returns [`ModelError::Schema`] when a required metric is missing from the
/// sheet and [`ModelError::Parse`] for an unrecognized period header.
pub fn extract(raw: &DataFrame, kind: StatementKind) -> Result<DataFrame> {
    let required = kind.required_metrics();
    let table = kind.sheet_name();

    if raw.width() < 2 {
        return Err(ModelError::Schema {
            table: table.to_string(),
            missing: required.iter().map(|m| (*m).to_string()).collect(),
        });
    }

    // Metric codes live in column 1. The first occurrence of a code wins,
    // matching the merger's first-wins rule.
    let codes = raw.get_columns()[1].cast(&DataType::String)?;
    let mut rows: HashMap<&str, usize> = HashMap::new();
    for (idx, code) in codes.str()?.into_iter().enumerate() {
        if let Some(code) = code {
            rows.entry(code.trim()).or_insert(idx);
        }
    }

    let missing: Vec<String> = required
        .iter()
        .filter(|m| !rows.contains_key(**m))
        .map(|m| (*m).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ModelError::Schema {
            table: table.to_string(),
            missing,
        });
    }

    // Remaining columns are one per reporting period; forecast and
    // current-period columns are tagged in their headers.
    let mut periods = Vec::new();
    let mut cells: Vec<Vec<Option<f64>>> = vec![Vec::new(); required.len()];
    for column in &raw.get_columns()[2..] {
        let header = column.name().as_str();
        if header.contains("Est") || header.contains("Current") {
            tracing::debug!(sheet = table, column = header, "skipping forecast column");
            continue;
        }
        periods.push(Period::from_quarter_label(header)?);
        for (slot, metric) in cells.iter_mut().zip(required) {
            let value = column.get(rows[metric])?;
            slot.push(cell_value(&value));
        }
    }

    let mut columns = Vec::with_capacity(required.len() + 1);
    columns.push(period_column(&periods)?);
    for (metric, values) in required.iter().zip(cells) {
        columns.push(Column::new((*metric).into(), values));
    }
    Ok(DataFrame::new(columns)?)
}

/// Interprets one raw cell as a numeric value.
///
/// The exports mix numeric and text cells within a column whenever the
/// no-data sentinel appears, so text is parsed here rather than relying on
/// the reader's dtype inference.
fn cell_value(value: &AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(s) => parse_text(s),
        AnyValue::StringOwned(s) => parse_text(s.as_str()),
        other => other.try_extract::<f64>().ok(),
    }
}

fn parse_text(text: &str) -> Option<f64> {
    let text = text.trim();
    if text == NO_DATA_SENTINEL {
        return Some(f64::NAN);
    }
    text.replace(',', "").parse().ok()
}
