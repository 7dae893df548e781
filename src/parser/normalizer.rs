//! Schema normalization for raw damage tables.
//!
//! Turns a `RawTable` into a `NormalizedTable`:
//! - column names trimmed, lower-cased, spaces replaced with underscores
//! - duplicate names made unique with a numeric suffix
//! - fully-empty rows and fully-empty columns dropped
//! - the date column parsed and promoted to an explicit record field

use super::schema::{NormalizedRecord, NormalizedTable};
use super::table::RawTable;
use crate::utils::config::{DATETIME_FORMATS, DATE_COLUMN, DATE_FORMATS};
use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, warn};
use std::collections::{BTreeMap, HashSet};

/// Canonicalize a single column name
///
/// **Public** - the naming rule every other stage relies on
///
/// # Example
/// ```ignore
/// assert_eq!(normalize_column_name("  DH Outros Afetados "), "dh_outros_afetados");
/// ```
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Normalize a raw table
///
/// **Public** - main entry point for schema normalization
///
/// Pure transform: the input is left untouched. Rows shorter than the
/// header read their missing trailing cells as empty.
pub fn normalize_table(raw: &RawTable) -> NormalizedTable {
    let names = unique_column_names(&raw.headers);

    // Drop rows where every cell is empty
    let rows: Vec<&Vec<Option<String>>> = raw
        .rows
        .iter()
        .filter(|row| row.iter().any(Option::is_some))
        .collect();

    // Keep only columns with at least one value
    let kept: Vec<usize> = (0..names.len())
        .filter(|&idx| rows.iter().any(|row| cell(row, idx).is_some()))
        .collect();

    let dropped_rows = raw.rows.len() - rows.len();
    let dropped_columns = names.len() - kept.len();
    if dropped_rows > 0 || dropped_columns > 0 {
        debug!(
            "Dropped {} empty rows and {} empty columns",
            dropped_rows, dropped_columns
        );
    }

    let date_idx = kept.iter().copied().find(|&idx| names[idx] == DATE_COLUMN);
    if date_idx.is_none() {
        debug!("No '{}' column; records will carry no date", DATE_COLUMN);
    }

    let columns: Vec<String> = kept
        .iter()
        .filter(|&&idx| Some(idx) != date_idx)
        .map(|&idx| names[idx].clone())
        .collect();

    let mut unparsed_dates = 0usize;
    let records: Vec<NormalizedRecord> = rows
        .iter()
        .map(|row| {
            let date = date_idx.and_then(|idx| {
                let text = cell(row, idx)?;
                let parsed = parse_event_date(text);
                if parsed.is_none() {
                    unparsed_dates += 1;
                }
                parsed
            });

            let fields: BTreeMap<String, String> = kept
                .iter()
                .filter(|&&idx| Some(idx) != date_idx)
                .filter_map(|&idx| cell(row, idx).map(|value| (names[idx].clone(), value.to_string())))
                .collect();

            NormalizedRecord { date, fields }
        })
        .collect();

    if unparsed_dates > 0 {
        warn!("{} date values could not be parsed and were left empty", unparsed_dates);
    }

    debug!(
        "Normalized table: {} columns, {} records",
        columns.len(),
        records.len()
    );

    NormalizedTable {
        columns,
        records,
        has_date_column: date_idx.is_some(),
    }
}

/// Parse an event date
///
/// **Public** - returns None instead of failing so one bad cell never
/// aborts the load
///
/// Date-time values keep only their date part.
pub fn parse_event_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
}

fn cell(row: &[Option<String>], idx: usize) -> Option<&str> {
    row.get(idx).and_then(|value| value.as_deref())
}

/// Normalize all header names and make them unique
///
/// **Private** - later duplicates get `_1`, `_2`, ... appended
fn unique_column_names(headers: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(headers.len());

    for header in headers {
        let base = normalize_column_name(header);
        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        if name != base {
            warn!("Duplicate column '{}' renamed to '{}'", base, name);
        }
        seen.insert(name.clone());
        names.push(name);
    }

    names
}
