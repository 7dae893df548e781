//! End-to-end analysis pipeline.
//!
//! raw table -> normalize -> complete -> aggregate -> rank
//!
//! Every stage is a pure function over the previous stage's output; the
//! only side effect is the initial read of the source file. Nothing is
//! cached between runs, so each call reflects the file as it is now.

use crate::aggregator::{
    calculate_impact_summary, complete_table, compute_aggregates, destruction_by_date,
    rank_top_events,
};
use crate::parser::schema::{AggregatedTable, ImpactReport, RankedEntry};
use crate::parser::{normalize_table, read_raw_table, LoadOptions, RawTable};
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::LoadError;
use log::debug;
use std::path::Path;

/// Fully materialized result of one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Every aggregated record, in source order
    pub table: AggregatedTable,

    /// Most severe events
    pub top_events: Vec<RankedEntry>,

    /// People-affected columns the source lacked
    pub inserted_columns: Vec<String>,

    /// Whether the source carried a date column at all
    pub has_date_column: bool,
}

/// Run the pipeline on a source file
///
/// **Public** - main entry point for library users
///
/// # Errors
/// Only the initial read can fail; value-level problems degrade to
/// empty dates and zero counts instead.
pub fn analyze_file(
    path: impl AsRef<Path>,
    options: &LoadOptions,
    top_n: usize,
) -> Result<Analysis, LoadError> {
    let raw = read_raw_table(path, options)?;
    Ok(analyze_table(&raw, top_n))
}

/// Run the pipeline on an already loaded raw table
///
/// **Public** - pure, never fails
pub fn analyze_table(raw: &RawTable, top_n: usize) -> Analysis {
    let normalized = normalize_table(raw);
    let completed = complete_table(&normalized);
    let aggregated = compute_aggregates(&completed);
    let top_events = rank_top_events(&aggregated.records, top_n);

    debug!(
        "Pipeline finished: {} records, {} ranked",
        aggregated.records.len(),
        top_events.len()
    );

    Analysis {
        table: aggregated,
        top_events,
        inserted_columns: completed.inserted_columns,
        has_date_column: normalized.has_date_column,
    }
}

/// Convert an analysis to the output report format
///
/// **Public** - used by commands to create final output
pub fn to_report(analysis: &Analysis, source: &Path) -> ImpactReport {
    use chrono::Utc;

    ImpactReport {
        version: SCHEMA_VERSION.to_string(),
        source: source.display().to_string(),
        destruction_columns: analysis.table.destruction_columns.clone(),
        summary: calculate_impact_summary(&analysis.table.records),
        records: analysis.table.records.clone(),
        top_events: analysis.top_events.clone(),
        destruction_by_date: destruction_by_date(&analysis.table.records),
        generated_at: Utc::now().to_rfc3339(),
    }
}
