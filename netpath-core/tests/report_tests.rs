// Tests for report generation functionality

use netpath_core::health::group_health;
use netpath_core::report::{
    ReportFormat, format_bytes, gather_report_data, generate_csv_report, generate_dot_report,
    generate_json_report, generate_markdown_report, generate_report, generate_text_report,
    save_report,
};
use netpath_core::{HealthGrade, PathGraph, ReconstructOptions, execute_reconstruction, reconstruct};
use netpath_search::{Direction, HealthRecord, PathRecord, SearchCriteria};
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

fn sample_graph() -> PathGraph {
    let mut record = PathRecord::new("10.0.1.5", "10.0.2.7");
    record.src_type = "vm".to_string();
    record.src_vm_name = "web-01".to_string();
    record.src_vhost_ip = "10.0.1.100".to_string();
    record.src_vhost_name = "esx-01".to_string();
    record.dest_type = "phost".to_string();
    record.dest_name = "db-01".to_string();
    record.nodes = "{2,tor,10.1.1.2,5,6}{1,device,10.1.1.1,3,4}".to_string();
    record.resolved = "T".to_string();
    record.traffic = "1536".to_string();

    let criteria = SearchCriteria::new("10.0.1.5", "10.0.2.7", Direction::Forward)
        .expect("valid criteria");
    execute_reconstruction(
        &[record],
        ReconstructOptions {
            criteria: Some(criteria),
            show_progress_bars: false,
        },
        None,
    )
}

fn health_row(value: Value) -> HealthRecord {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

// ============================================================================
// Report Format Tests
// ============================================================================

#[test]
fn test_report_format_from_str() {
    assert!(matches!(ReportFormat::from_str("text"), Some(ReportFormat::Text)));
    assert!(matches!(ReportFormat::from_str("json"), Some(ReportFormat::Json)));
    assert!(matches!(ReportFormat::from_str("csv"), Some(ReportFormat::Csv)));
    assert!(matches!(ReportFormat::from_str("markdown"), Some(ReportFormat::Markdown)));
    assert!(matches!(ReportFormat::from_str("md"), Some(ReportFormat::Markdown)));
    assert!(matches!(ReportFormat::from_str("dot"), Some(ReportFormat::Dot)));
}

#[test]
fn test_report_format_from_str_case_insensitive() {
    assert!(matches!(ReportFormat::from_str("TEXT"), Some(ReportFormat::Text)));
    assert!(matches!(ReportFormat::from_str("Json"), Some(ReportFormat::Json)));
    assert!(matches!(ReportFormat::from_str("DOT"), Some(ReportFormat::Dot)));
}

#[test]
fn test_report_format_from_str_invalid() {
    assert!(ReportFormat::from_str("pdf").is_none());
    assert!(ReportFormat::from_str("").is_none());
}

// ============================================================================
// Byte Formatting Tests
// ============================================================================

#[test]
fn test_format_bytes() {
    assert_eq!(format_bytes(0), "0 bytes");
    assert_eq!(format_bytes(1), "1 bytes");
    assert_eq!(format_bytes(1000), "1000 bytes");
    assert_eq!(format_bytes(1024), "1 KB");
    assert_eq!(format_bytes(1536), "1.5 KB");
    assert_eq!(format_bytes(1_048_576), "1 MB");
    assert_eq!(format_bytes(1_500_000), "1.43 MB");
}

// ============================================================================
// Report Data Tests
// ============================================================================

#[test]
fn test_gather_report_data() {
    let graph = sample_graph();
    let data = gather_report_data(&graph, None);

    assert_eq!(data.rows, 1);
    assert_eq!(data.nodes.len(), 5);
    assert_eq!(data.links.len(), 4);
    assert_eq!(data.paths.len(), 1);
    assert_eq!(data.traffic.forward_bytes, 1536);
    assert!(data.nodes.iter().all(|entry| entry.health.is_none()));
}

#[test]
fn test_gather_report_data_with_health() {
    let graph = sample_graph();
    let health = group_health(vec![
        health_row(json!({"device": "10.1.1.1", "snmp_index": "3", "min_health_score": "90"})),
        health_row(json!({"device": "10.1.1.2", "snmp_index": "5", "min_health_score": "10"})),
    ]);

    let data = gather_report_data(&graph, Some(&health));
    let grade = |name: &str| {
        data.nodes
            .iter()
            .find(|entry| entry.node.name == name)
            .and_then(|entry| entry.health)
    };

    assert_eq!(grade("10.1.1.1"), Some(HealthGrade::Healthy));
    assert_eq!(grade("10.1.1.2"), Some(HealthGrade::Critical));
    assert_eq!(grade("10.0.2.7"), Some(HealthGrade::Unknown));
}

// ============================================================================
// Text Report Tests
// ============================================================================

#[test]
fn test_generate_text_report() {
    let data = gather_report_data(&sample_graph(), None);
    let report = generate_text_report(&data);

    assert!(report.contains("NETPATH PATH REPORT"));
    assert!(report.contains("Source:       10.0.1.5"));
    assert!(report.contains("Direction:    forward"));
    assert!(report.contains("10.0.1.5 → 10.0.1.100 → 10.1.1.1 → 10.1.1.2 → 10.0.2.7"));
    assert!(report.contains("Traffic A→B:  1.5 KB"));
    assert!(report.contains("(not searched)"));
    assert!(report.contains("End of Report"));
}

#[test]
fn test_generate_text_report_empty() {
    let data = gather_report_data(&reconstruct(&[]), None);
    let report = generate_text_report(&data);

    assert!(report.contains("No paths found."));
    assert!(!report.contains("LINKS"));
}

// ============================================================================
// Structured Report Tests
// ============================================================================

#[test]
fn test_generate_json_report() {
    let data = gather_report_data(&sample_graph(), None);
    let report = generate_json_report(&data).expect("json report");
    let parsed: Value = serde_json::from_str(&report).expect("valid json");

    assert_eq!(parsed["report"]["metadata"]["generator"], "netpath");
    assert_eq!(parsed["report"]["summary"]["total_nodes"], 5);
    assert_eq!(parsed["report"]["summary"]["traffic"]["forward"], "1.5 KB");
    assert_eq!(parsed["report"]["criteria"]["direction"], "forward");

    let nodes = parsed["report"]["nodes"].as_array().expect("nodes array");
    assert_eq!(nodes[0]["name"], "10.0.1.5");
    assert_eq!(nodes[0]["type"], "vm");
    assert_eq!(nodes[0]["title"], "web-01");
}

#[test]
fn test_generate_csv_report() {
    let data = gather_report_data(&sample_graph(), None);
    let csv = generate_csv_report(&data);
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[0], "source,source_type,target,target_type,resolved,effective_resolved");
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[1], "10.0.1.5,vm,10.0.1.100,vm_host,true,true");
}

#[test]
fn test_generate_markdown_report() {
    let data = gather_report_data(&sample_graph(), None);
    let md = generate_markdown_report(&data);

    assert!(md.starts_with("# Path Report"));
    assert!(md.contains("| Paths | 1 |"));
    assert!(md.contains("## Nodes"));
    assert!(md.contains("| 10.1.1.2 | tor |"));
}

#[test]
fn test_generate_dot_report() {
    let data = gather_report_data(&sample_graph(), None);
    let dot = generate_dot_report(&data);

    assert!(dot.starts_with("digraph"));
    assert!(dot.contains("10.1.1.2 (tor)"));
    assert_eq!(dot.matches("->").count(), 4);
}

#[test]
fn test_generate_report_dispatches() {
    let data = gather_report_data(&sample_graph(), None);
    let text = generate_report(&data, ReportFormat::Text).expect("text");
    let csv = generate_report(&data, ReportFormat::Csv).expect("csv");

    assert_eq!(text, generate_text_report(&data));
    assert_eq!(csv, generate_csv_report(&data));
}

// ============================================================================
// Save Report Tests
// ============================================================================

#[test]
fn test_save_report() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("report.md");

    save_report("# Path Report\n", &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "# Path Report\n");
}

#[test]
fn test_save_report_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing").join("report.txt");

    assert!(save_report("content", &path).is_err());
}
