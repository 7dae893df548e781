//! Source table parsing and schema definitions.
//!
//! This module handles:
//! - Reading the raw damage table (metadata rows skipped)
//! - Normalizing column names and parsing the date column
//! - Defining the record types and the output report schema

pub mod normalizer;
pub mod schema;
pub mod table;

// Re-export main types
pub use normalizer::{normalize_column_name, normalize_table, parse_event_date};
pub use schema::{
    AggregateRecord, AggregatedTable, CompletedRecord, CompletedTable, DatedValue, ImpactReport,
    ImpactSummary, NormalizedRecord, NormalizedTable, PeopleAffected, RankedEntry,
};
pub use table::{parse_raw_table, read_raw_table, LoadOptions, RawTable};
