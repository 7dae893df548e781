//! Aggregation of normalized damage records.
//!
//! This module transforms a normalized table into:
//! - Completed records (required columns guaranteed, monetary columns discovered)
//! - Per-record severity totals and table-wide statistics
//! - A ranked short-list of the most severe events

pub mod completer;
pub mod metrics;
pub mod ranking;

// Re-export main types and functions
pub use completer::{
    complete_record, complete_table, discover_destruction_columns, is_destruction_value_column,
    parse_numeric,
};
pub use metrics::{
    aggregate_record, calculate_impact_summary, compute_aggregates, destruction_by_date,
    recompute_totals,
};
pub use ranking::{compare_severity, rank_top_events, ranking_key};
