//! Derived severity metrics for completed records.
//!
//! Each record gets two totals: people affected (the seven required
//! counts) and destruction value (every discovered monetary column).
//! Totals are computed from the record's own fields only, so they can
//! be recomputed at any time.

use crate::parser::schema::{
    AggregateRecord, AggregatedTable, CompletedRecord, CompletedTable, DatedValue, ImpactSummary,
};
use log::{debug, warn};

/// Compute totals for every record of a completed table
///
/// **Public** - main entry point for aggregation
///
/// # Returns
/// A new table with the same records, in the same order, each carrying
/// `total_people_affected` and `total_destruction_value`
pub fn compute_aggregates(table: &CompletedTable) -> AggregatedTable {
    debug!("Aggregating {} records", table.records.len());

    AggregatedTable {
        records: table.records.iter().map(aggregate_record).collect(),
        destruction_columns: table.destruction_columns.clone(),
    }
}

/// Compute both totals for one record
///
/// **Public** - per-record aggregation
pub fn aggregate_record(record: &CompletedRecord) -> AggregateRecord {
    AggregateRecord {
        record: record.clone(),
        total_people_affected: clamp_total(record.people.total(), "people affected"),
        total_destruction_value: clamp_total(
            record.destruction_values.values().sum(),
            "destruction value",
        ),
    }
}

/// Recompute the totals of an already aggregated record
///
/// **Public** - derived fields are never used as inputs, so this
/// returns identical totals for any record produced by `aggregate_record`
pub fn recompute_totals(record: &AggregateRecord) -> AggregateRecord {
    aggregate_record(&record.record)
}

/// Calculate table-wide totals
///
/// **Public** - used for logging and the text summary
pub fn calculate_impact_summary(records: &[AggregateRecord]) -> ImpactSummary {
    if records.is_empty() {
        return ImpactSummary::default();
    }

    ImpactSummary {
        record_count: records.len(),
        dated_records: records.iter().filter(|r| r.date().is_some()).count(),
        total_deaths: clamp_total(records.iter().map(|r| r.people().deaths).sum(), "deaths"),
        total_people_affected: clamp_total(
            records.iter().map(|r| r.total_people_affected).sum(),
            "people affected",
        ),
        total_destruction_value: clamp_total(
            records.iter().map(|r| r.total_destruction_value).sum(),
            "destruction value",
        ),
        max_destruction_value: records
            .iter()
            .map(|r| r.total_destruction_value)
            .fold(0.0, f64::max),
    }
}

/// Destruction totals in table order
///
/// **Public** - the series a chart renderer draws (destruction by date)
pub fn destruction_by_date(records: &[AggregateRecord]) -> Vec<DatedValue> {
    records
        .iter()
        .map(|r| DatedValue {
            date: r.date(),
            value: r.total_destruction_value,
        })
        .collect()
}

/// Keep a sum of finite cells finite
///
/// **Private** - every cell is finite but a sum can still overflow, and
/// JSON cannot carry infinities. Overflow saturates at the largest `f64`.
fn clamp_total(total: f64, label: &str) -> f64 {
    if total.is_finite() {
        return total;
    }

    warn!("{} total overflowed; clamped to the largest finite value", label);
    if total.is_nan() {
        0.0
    } else if total > 0.0 {
        f64::MAX
    } else {
        f64::MIN
    }
}

impl ImpactSummary {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Records: {} ({} dated) | Deaths: {} | People affected: {} | Destruction: {:.2} (max {:.2})",
            self.record_count,
            self.dated_records,
            self.total_deaths,
            self.total_people_affected,
            self.total_destruction_value,
            self.max_destruction_value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::PeopleAffected;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn completed(deaths: f64, values: &[(&str, f64)]) -> CompletedRecord {
        CompletedRecord {
            date: NaiveDate::from_ymd_opt(2024, 3, 1),
            people: PeopleAffected {
                deaths,
                injured: 1.0,
                ..Default::default()
            },
            destruction_values: values
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<BTreeMap<_, _>>(),
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_aggregate_record() {
        let agg = aggregate_record(&completed(2.0, &[("pe_valor", 100.0), ("pp_valor", 30.0)]));
        assert_eq!(agg.total_people_affected, 3.0);
        assert_eq!(agg.total_destruction_value, 130.0);
    }

    #[test]
    fn test_overflowing_total_is_clamped() {
        let agg = aggregate_record(&completed(0.0, &[("pe_valor", 1e308), ("pp_valor", 1e308)]));
        assert_eq!(agg.total_destruction_value, f64::MAX);

        let summary = calculate_impact_summary(&[agg.clone(), agg]);
        assert_eq!(summary.total_destruction_value, f64::MAX);
    }

    #[test]
    fn test_no_destruction_columns() {
        let agg = aggregate_record(&completed(0.0, &[]));
        assert_eq!(agg.total_destruction_value, 0.0);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let agg = aggregate_record(&completed(5.0, &[("valor", 80.0)]));
        let again = recompute_totals(&agg);
        assert_eq!(again, agg);
        assert_eq!(recompute_totals(&again), agg);
    }

    #[test]
    fn test_impact_summary() {
        let records = vec![
            aggregate_record(&completed(2.0, &[("valor", 100.0)])),
            aggregate_record(&completed(1.0, &[("valor", 300.0)])),
        ];

        let summary = calculate_impact_summary(&records);

        assert_eq!(summary.record_count, 2);
        assert_eq!(summary.dated_records, 2);
        assert_eq!(summary.total_deaths, 3.0);
        assert_eq!(summary.total_people_affected, 5.0);
        assert_eq!(summary.total_destruction_value, 400.0);
        assert_eq!(summary.max_destruction_value, 300.0);
    }

    #[test]
    fn test_impact_summary_empty() {
        let summary = calculate_impact_summary(&[]);
        assert_eq!(summary.record_count, 0);
        assert_eq!(summary.total_destruction_value, 0.0);
    }

    #[test]
    fn test_destruction_by_date_keeps_order() {
        let records = vec![
            aggregate_record(&completed(0.0, &[("valor", 10.0)])),
            aggregate_record(&completed(0.0, &[("valor", 20.0)])),
        ];
        let series = destruction_by_date(&records);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].value, 10.0);
        assert_eq!(series[1].value, 20.0);
    }
}
