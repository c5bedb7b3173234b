use std::path::Path;
use tcp_trace_analyzer::aggregator::aggregate;
use tcp_trace_analyzer::output::{
    read_report_json, render_report, validate_path, write_report, write_report_json, ReportHeader,
};
use tcp_trace_analyzer::utils::config::SCHEMA_VERSION;
use tempfile::NamedTempFile;

fn create_test_report() -> tcp_trace_analyzer::aggregator::Report {
    aggregate([
        "r 1.0 /NodeList/0/x length: 500 Seq=1",
        "r 2.0 /NodeList/0/x length: 500 Seq=1",
        "+ 2.5 /NodeList/1/x length: 40 [SYN] Seq=0",
        "not something the classifier understands",
    ])
}

fn header() -> ReportHeader {
    ReportHeader {
        input_file: "experiment.tr".to_string(),
        generated_at: "2024-01-01 00:00:00".to_string(),
    }
}

#[test]
fn test_write_text_report() {
    let report = create_test_report();
    let temp_file = NamedTempFile::new().unwrap();

    write_report(&report, &header(), temp_file.path()).unwrap();

    let written = std::fs::read_to_string(temp_file.path()).unwrap();
    assert_eq!(written, render_report(&report, &header()));
    assert!(written.starts_with("Trace analysis: experiment.tr\nAnalysis date: 2024-01-01 00:00:00\n"));
}

#[test]
fn test_write_and_read_json_report() {
    let report = create_test_report();
    let temp_file = NamedTempFile::new().unwrap();

    write_report_json(&report, &header(), temp_file.path()).unwrap();
    let loaded = read_report_json(temp_file.path()).unwrap();

    assert_eq!(loaded.version, SCHEMA_VERSION);
    assert_eq!(loaded.header, header());
    assert_eq!(loaded.report, report);
}

#[test]
fn test_json_uses_trace_symbols() {
    let report = create_test_report();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["event_types"][0][0], "r");
    assert_eq!(json["packet_types"][0][0], "Data");
    assert_eq!(json["problem_lines"][0]["line_number"], 4);
}

#[test]
fn test_validate_output_path_empty() {
    let result = validate_path(Path::new(""));
    assert!(result.is_err());
}

#[test]
fn test_validate_output_path_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let result = validate_path(temp_dir.path());
    assert!(result.is_err());
}

#[test]
fn test_write_creates_parent_dirs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested_path = temp_dir.path().join("nested/dirs/analysis_results.txt");

    write_report(&create_test_report(), &header(), &nested_path).unwrap();

    assert!(nested_path.exists());
}

#[test]
fn test_header_timestamp_format() {
    let header = ReportHeader::now("a.tr");
    // YYYY-MM-DD HH:MM:SS
    assert_eq!(header.generated_at.len(), 19);
    assert_eq!(&header.generated_at[4..5], "-");
    assert_eq!(&header.generated_at[10..11], " ");
}
