use disaster_impact::commands::{
    execute_analyze, execute_comment_add, execute_comment_list, validate_args, AnalyzeArgs,
    CommentArgs,
};
use disaster_impact::output::read_report;
use disaster_impact::parser::LoadOptions;
use disaster_impact::pipeline::analyze_file;
use std::path::PathBuf;

const TABLE: &str = "t\nt\nt\nt\nRegistro(Data),DH Mortos,DH Feridos,Valor Total\n01/01/2024,1,0,10\n02/01/2024,4,1,0\n";

#[test]
fn test_validate_args_valid() {
    assert!(validate_args(&AnalyzeArgs::default()).is_ok());
}

#[test]
fn test_validate_args_empty_input() {
    let args = AnalyzeArgs {
        input: PathBuf::new(),
        ..Default::default()
    };

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_top_zero() {
    let args = AnalyzeArgs {
        top: 0,
        ..Default::default()
    };

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_top_too_large() {
    let args = AnalyzeArgs {
        top: 2000,
        ..Default::default()
    };

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_execute_analyze_writes_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Dano.csv");
    let output = dir.path().join("out/report.json");
    std::fs::write(&input, TABLE).unwrap();

    let args = AnalyzeArgs {
        input,
        output_json: Some(output.clone()),
        top: 1,
        ..Default::default()
    };

    let analysis = execute_analyze(args).unwrap();
    let report = read_report(&output).unwrap();

    assert_eq!(analysis.top_events.len(), 1);
    assert_eq!(report.top_events[0].event.people().deaths, 4.0);
    assert_eq!(report.records.len(), 2);
}

#[test]
fn test_execute_analyze_matches_library_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Dano.csv");
    std::fs::write(&input, TABLE).unwrap();

    let from_command = execute_analyze(AnalyzeArgs {
        input: input.clone(),
        output_json: None,
        top: 2,
        ..Default::default()
    })
    .unwrap();
    let from_library = analyze_file(&input, &LoadOptions::default(), 2).unwrap();

    assert_eq!(from_command, from_library);
    assert!(from_command.has_date_column);
}

#[test]
fn test_execute_analyze_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let args = AnalyzeArgs {
        input: dir.path().join("missing.csv"),
        output_json: None,
        ..Default::default()
    };

    let err = execute_analyze(args).unwrap_err();
    assert!(err.to_string().contains("Failed to read source table"));
}

#[test]
fn test_comment_commands() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("comments.csv");

    execute_comment_add(CommentArgs {
        store: store.clone(),
        date: "2024-01-05".to_string(),
        cause: "enchente".to_string(),
        comment: "Agua ate o telhado".to_string(),
    })
    .unwrap();

    let comments = execute_comment_list(&store).unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].cause, "enchente");
}
