//! Severity ranking of aggregated records.
//!
//! Records are ordered by (deaths, injured, displaced, destruction value),
//! each descending, and the first N are kept. The sort is stable, so
//! records tied on all four keys keep their table order.

use crate::parser::schema::{AggregateRecord, RankedEntry};
use log::debug;
use std::cmp::Ordering;

/// Ranking key of a record, in priority order
///
/// **Public** - mirrors `utils::config::RANKING_KEYS`
pub fn ranking_key(record: &AggregateRecord) -> [f64; 4] {
    let people = record.people();
    [
        people.deaths,
        people.injured,
        people.displaced,
        record.total_destruction_value,
    ]
}

/// Compare two records by severity, most severe first
///
/// **Public** - lexicographic over `ranking_key`, each key descending
pub fn compare_severity(a: &AggregateRecord, b: &AggregateRecord) -> Ordering {
    let (ka, kb) = (ranking_key(a), ranking_key(b));

    ka.iter()
        .zip(kb.iter())
        .map(|(x, y)| y.partial_cmp(x).unwrap_or(Ordering::Equal))
        .find(|ord| *ord != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

/// Select the most severe events
///
/// **Public** - main entry point for ranking
///
/// # Arguments
/// * `records` - Aggregated records in table order
/// * `top_n` - Size of the short-list (e.g., 5)
///
/// # Returns
/// At most `top_n` entries, most severe first, with 1-based ranks
pub fn rank_top_events(records: &[AggregateRecord], top_n: usize) -> Vec<RankedEntry> {
    debug!("Ranking top {} of {} records", top_n, records.len());

    let mut ordered: Vec<&AggregateRecord> = records.iter().collect();
    // `sort_by` is stable
    ordered.sort_by(|a, b| compare_severity(a, b));

    ordered
        .into_iter()
        .take(top_n)
        .enumerate()
        .map(|(idx, record)| RankedEntry {
            rank: idx + 1,
            event: record.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::metrics::aggregate_record;
    use crate::parser::schema::CompletedRecord;
    use crate::parser::PeopleAffected;
    use std::collections::BTreeMap;

    fn event(tag: &str, deaths: f64, injured: f64, displaced: f64, value: f64) -> AggregateRecord {
        let mut extra = BTreeMap::new();
        extra.insert("tag".to_string(), tag.to_string());

        aggregate_record(&CompletedRecord {
            date: None,
            people: PeopleAffected {
                deaths,
                injured,
                displaced,
                ..Default::default()
            },
            destruction_values: [("valor".to_string(), value)].into_iter().collect(),
            extra,
        })
    }

    fn tags(entries: &[RankedEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| e.event.record.extra["tag"].clone())
            .collect()
    }

    #[test]
    fn test_primary_key_deaths() {
        let records = vec![event("a", 1.0, 0.0, 0.0, 0.0), event("b", 9.0, 0.0, 0.0, 0.0)];
        assert_eq!(tags(&rank_top_events(&records, 5)), vec!["b", "a"]);
    }

    #[test]
    fn test_falls_through_keys() {
        let records = vec![
            event("a", 5.0, 2.0, 0.0, 500.0),
            event("b", 5.0, 2.0, 7.0, 0.0),
            event("c", 5.0, 3.0, 0.0, 0.0),
            event("d", 5.0, 2.0, 7.0, 10.0),
        ];
        assert_eq!(tags(&rank_top_events(&records, 5)), vec!["c", "d", "b", "a"]);
    }

    #[test]
    fn test_ties_keep_table_order() {
        let records = vec![
            event("first", 1.0, 1.0, 1.0, 1.0),
            event("second", 1.0, 1.0, 1.0, 1.0),
        ];
        assert_eq!(tags(&rank_top_events(&records, 5)), vec!["first", "second"]);
    }

    #[test]
    fn test_truncates_and_ranks() {
        let records: Vec<_> = (0..8)
            .map(|i| event(&i.to_string(), i as f64, 0.0, 0.0, 0.0))
            .collect();
        let top = rank_top_events(&records, 5);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].rank, 1);
        assert_eq!(top[4].rank, 5);
        assert_eq!(top[0].event.people().deaths, 7.0);
    }

    #[test]
    fn test_fewer_records_than_n() {
        let records = vec![event("only", 0.0, 0.0, 0.0, 0.0)];
        assert_eq!(rank_top_events(&records, 5).len(), 1);
        assert!(rank_top_events(&[], 5).is_empty());
    }
}
