//! Column completion: required people-affected columns and monetary columns.
//!
//! Every completed record carries all seven people-affected counts, even if
//! the source never had the column. Monetary (destruction-value) columns are
//! never hard-coded: they are discovered from the normalized column names
//! with `is_destruction_value_column` once per load.

use crate::parser::schema::{CompletedRecord, CompletedTable, NormalizedRecord, NormalizedTable};
use crate::parser::PeopleAffected;
use crate::utils::config::{DESTRUCTION_VALUE_FRAGMENT, PEOPLE_AFFECTED_COLUMNS};
use log::{debug, info};
use std::collections::BTreeMap;

/// Whether a normalized column name denotes a monetary loss
///
/// **Public** - the matching rule is a case-insensitive substring test
/// for `DESTRUCTION_VALUE_FRAGMENT`
pub fn is_destruction_value_column(name: &str) -> bool {
    name.to_lowercase().contains(DESTRUCTION_VALUE_FRAGMENT)
}

/// Discover the monetary columns of a table, in column order
pub fn discover_destruction_columns(columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .filter(|name| is_destruction_value_column(name))
        .cloned()
        .collect()
}

/// Complete a normalized table
///
/// **Public** - main entry point for column completion
///
/// # Returns
/// A new table where every record has all seven people-affected counts
/// and a value (default 0) for every discovered monetary column.
/// Columns that are neither pass through as text in `extra`.
pub fn complete_table(table: &NormalizedTable) -> CompletedTable {
    let destruction_columns = discover_destruction_columns(&table.columns);
    debug!(
        "Discovered {} destruction-value columns: {:?}",
        destruction_columns.len(),
        destruction_columns
    );

    let inserted_columns: Vec<String> = PEOPLE_AFFECTED_COLUMNS
        .iter()
        .filter(|column| !table.has_column(column))
        .map(|column| column.to_string())
        .collect();

    if !inserted_columns.is_empty() {
        info!(
            "Missing people-affected columns filled with 0: {}",
            inserted_columns.join(", ")
        );
    }

    let records = table
        .records
        .iter()
        .map(|record| complete_record(record, &destruction_columns))
        .collect();

    CompletedTable {
        records,
        destruction_columns,
        inserted_columns,
    }
}

/// Complete a single record against the discovered monetary columns
///
/// **Public** - used by `complete_table` and by tests
pub fn complete_record(
    record: &NormalizedRecord,
    destruction_columns: &[String],
) -> CompletedRecord {
    let mut people = PeopleAffected::default();
    for column in PEOPLE_AFFECTED_COLUMNS {
        if let Some(slot) = people.slot_mut(column) {
            *slot = coerce_numeric(column, record.get(column));
        }
    }

    let destruction_values: BTreeMap<String, f64> = destruction_columns
        .iter()
        .map(|column| (column.clone(), coerce_numeric(column, record.get(column))))
        .collect();

    let extra: BTreeMap<String, String> = record
        .fields
        .iter()
        .filter(|(name, _)| {
            !PEOPLE_AFFECTED_COLUMNS.contains(&name.as_str())
                && !destruction_columns.contains(name)
        })
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    CompletedRecord {
        date: record.date,
        people,
        destruction_values,
        extra,
    }
}

/// Coerce a cell to a number, treating empty and malformed values as 0
///
/// **Private** - completeness of aggregation wins over strict validation
fn coerce_numeric(column: &str, value: Option<&str>) -> f64 {
    match value {
        None => 0.0,
        Some(text) => parse_numeric(text).unwrap_or_else(|| {
            debug!("Non-numeric value '{}' in column '{}' read as 0", text, column);
            0.0
        }),
    }
}

/// Parse a numeric cell
///
/// **Public** - accepts plain decimals, Brazilian formatting
/// (`1.234,56`) and an optional `R$` currency prefix
///
/// A lone comma is read as the decimal separator. Returns None for
/// anything else, including non-finite values.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_prefix("R$").unwrap_or(trimmed);
    let cleaned: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    let last_comma = cleaned.rfind(',');
    let last_dot = cleaned.rfind('.');

    let canonical = match (last_comma, last_dot) {
        // 1.234,56 -> dots group thousands
        (Some(comma), Some(dot)) if comma > dot => cleaned.replace('.', "").replace(',', "."),
        // 1,234.56 -> commas group thousands
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(_), None) if cleaned.matches(',').count() == 1 => cleaned.replace(',', "."),
        (Some(_), None) => cleaned.replace(',', ""),
        // 1.234.567 -> several dots can only be grouping
        (None, Some(_)) if cleaned.matches('.').count() > 1 => cleaned.replace('.', ""),
        _ => cleaned,
    };

    canonical.parse::<f64>().ok().filter(|v| v.is_finite())
}
