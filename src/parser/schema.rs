//! Record and report schema definitions.
//!
//! Records move through the pipeline as distinct types, one per stage:
//! `NormalizedRecord` -> `CompletedRecord` -> `AggregateRecord` -> `RankedEntry`.
//! The report is the JSON file we write to disk; it is versioned to allow
//! future evolution.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::utils::config::{
    DEATHS, DISPLACED, HOMELESS, ILL, INJURED, MISSING, OTHER_AFFECTED,
};

/// A data row after column names have been canonicalized
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    /// Parsed event date (None when absent or unparseable)
    pub date: Option<NaiveDate>,

    /// Non-null cells keyed by normalized column name (date column excluded)
    pub fields: BTreeMap<String, String>,
}

impl NormalizedRecord {
    /// Raw cell text for a column, if the row has a value there
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

/// Output of the schema normalizer
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    /// Surviving column names in source order (date column excluded)
    pub columns: Vec<String>,

    /// Surviving data rows in source order
    pub records: Vec<NormalizedRecord>,

    /// Whether the recognized date column was present
    pub has_date_column: bool,
}

impl NormalizedTable {
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

/// The seven human-impact counts every completed record carries
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PeopleAffected {
    #[serde(rename = "dh_mortos")]
    pub deaths: f64,

    #[serde(rename = "dh_feridos")]
    pub injured: f64,

    #[serde(rename = "dh_enfermos")]
    pub ill: f64,

    /// Relocated to public shelters (relocation type A)
    #[serde(rename = "dh_desabrigados")]
    pub homeless: f64,

    /// Relocated to private housing (relocation type B)
    #[serde(rename = "dh_desalojados")]
    pub displaced: f64,

    #[serde(rename = "dh_desaparecidos")]
    pub missing: f64,

    #[serde(rename = "dh_outros_afetados")]
    pub other_affected: f64,
}

impl PeopleAffected {
    /// Look up a count by its normalized column name
    pub fn get(&self, column: &str) -> Option<f64> {
        match column {
            DEATHS => Some(self.deaths),
            INJURED => Some(self.injured),
            ILL => Some(self.ill),
            HOMELESS => Some(self.homeless),
            DISPLACED => Some(self.displaced),
            MISSING => Some(self.missing),
            OTHER_AFFECTED => Some(self.other_affected),
            _ => None,
        }
    }

    /// Mutable slot for a count by its normalized column name
    pub fn slot_mut(&mut self, column: &str) -> Option<&mut f64> {
        match column {
            DEATHS => Some(&mut self.deaths),
            INJURED => Some(&mut self.injured),
            ILL => Some(&mut self.ill),
            HOMELESS => Some(&mut self.homeless),
            DISPLACED => Some(&mut self.displaced),
            MISSING => Some(&mut self.missing),
            OTHER_AFFECTED => Some(&mut self.other_affected),
            _ => None,
        }
    }

    /// Sum of all seven counts
    pub fn total(&self) -> f64 {
        self.deaths
            + self.injured
            + self.ill
            + self.homeless
            + self.displaced
            + self.missing
            + self.other_affected
    }
}

/// A normalized record with the required numeric columns guaranteed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedRecord {
    /// Event date, kept as an explicit field rather than a row index
    pub date: Option<NaiveDate>,

    #[serde(flatten)]
    pub people: PeopleAffected,

    /// Every discovered monetary column, missing cells read as 0
    pub destruction_values: BTreeMap<String, f64>,

    /// Unrecognized columns, passed through untouched
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

/// Output of the column completer
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedTable {
    pub records: Vec<CompletedRecord>,

    /// Monetary columns discovered in this load, in source order
    pub destruction_columns: Vec<String>,

    /// People-affected columns that were absent and filled with zeros
    pub inserted_columns: Vec<String>,
}

/// A completed record plus its two derived totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRecord {
    #[serde(flatten)]
    pub record: CompletedRecord,

    /// Sum of the seven people-affected columns
    pub total_people_affected: f64,

    /// Sum of all destruction-value columns
    pub total_destruction_value: f64,
}

impl AggregateRecord {
    pub fn date(&self) -> Option<NaiveDate> {
        self.record.date
    }

    pub fn people(&self) -> &PeopleAffected {
        &self.record.people
    }
}

/// Output of the aggregate computer
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedTable {
    pub records: Vec<AggregateRecord>,
    pub destruction_columns: Vec<String>,
}

/// One of the most severe events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based position in the short-list
    pub rank: usize,

    #[serde(flatten)]
    pub event: AggregateRecord,
}

impl RankedEntry {
    pub fn date(&self) -> Option<NaiveDate> {
        self.event.date()
    }
}

/// Total destruction for one record, in table order (chart series)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedValue {
    pub date: Option<NaiveDate>,
    pub value: f64,
}

/// Table-wide totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactSummary {
    /// Number of aggregated records
    pub record_count: usize,

    /// Records whose date parsed
    pub dated_records: usize,

    pub total_deaths: f64,
    pub total_people_affected: f64,
    pub total_destruction_value: f64,

    /// Largest single-record destruction total
    pub max_destruction_value: f64,
}

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Source table that was analyzed
    pub source: String,

    /// Monetary columns discovered in the source
    pub destruction_columns: Vec<String>,

    pub summary: ImpactSummary,

    /// Every aggregated record, in source order
    pub records: Vec<AggregateRecord>,

    /// Most severe events (ranked)
    pub top_events: Vec<RankedEntry>,

    /// Destruction by date, for chart rendering
    pub destruction_by_date: Vec<DatedValue>,

    /// Timestamp when report was generated
    pub generated_at: String,
}
