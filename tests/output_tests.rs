use chrono::NaiveDate;
use disaster_impact::aggregator::{aggregate_record, rank_top_events};
use disaster_impact::output::{read_report, validate_path, write_report};
use disaster_impact::parser::schema::{CompletedRecord, DatedValue, ImpactReport, ImpactSummary};
use disaster_impact::parser::PeopleAffected;
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use std::path::Path;
use tempfile::NamedTempFile;

fn create_test_report() -> ImpactReport {
    let mut extra = BTreeMap::new();
    extra.insert("municipio".to_string(), "Recife".to_string());

    let record = aggregate_record(&CompletedRecord {
        date: NaiveDate::from_ymd_opt(2024, 1, 5),
        people: PeopleAffected {
            deaths: 3.0,
            displaced: 12.0,
            ..Default::default()
        },
        destruction_values: [("pe_valor_total".to_string(), 2500.5)].into_iter().collect(),
        extra,
    });
    let records = vec![record];

    ImpactReport {
        version: "1.0.0".to_string(),
        source: "Dano.csv".to_string(),
        destruction_columns: vec!["pe_valor_total".to_string()],
        summary: ImpactSummary {
            record_count: 1,
            dated_records: 1,
            total_deaths: 3.0,
            total_people_affected: 15.0,
            total_destruction_value: 2500.5,
            max_destruction_value: 2500.5,
        },
        top_events: rank_top_events(&records, 5),
        destruction_by_date: vec![DatedValue {
            date: NaiveDate::from_ymd_opt(2024, 1, 5),
            value: 2500.5,
        }],
        records,
        generated_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

#[test]
fn test_write_and_read_report() {
    let report = create_test_report();
    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    write_report(&report, path).unwrap();
    let loaded = read_report(path).unwrap();

    assert_eq!(loaded.version, report.version);
    assert_eq!(loaded.records, report.records);
    assert_eq!(loaded.top_events, report.top_events);
    assert_eq!(loaded.summary, report.summary);
}

#[test]
fn test_ranked_entry_exposes_flat_fields() {
    let report = create_test_report();
    let json = serde_json::to_value(&report.top_events[0]).unwrap();

    assert_eq!(json["rank"], 1);
    assert_eq!(json["date"], "2024-01-05");
    assert_eq!(json["dh_mortos"], 3.0);
    assert_eq!(json["dh_desalojados"], 12.0);
    assert_eq!(json["dh_desaparecidos"], 0.0);
    assert_eq!(json["total_people_affected"], 15.0);
    assert_eq!(json["total_destruction_value"], 2500.5);
    assert_eq!(json["destruction_values"]["pe_valor_total"], 2500.5);
    assert_eq!(json["extra"]["municipio"], "Recife");
}

#[test]
fn test_validate_output_path_empty() {
    let result = validate_path(Path::new(""));
    assert!(result.is_err());
}

#[test]
fn test_validate_output_path_directory() {
    // Try to write to a directory path
    let temp_dir = tempfile::tempdir().unwrap();
    let result = validate_path(temp_dir.path());
    assert!(result.is_err());
}

#[test]
fn test_write_creates_parent_dirs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested_path = temp_dir.path().join("nested/dirs/report.json");

    write_report(&create_test_report(), &nested_path).unwrap();

    assert!(nested_path.exists());
}
