use std::path::Path;
use std::process::{Command, Output};

mod support;

fn run_sheet2cube(input: &Path, output: &Path, flags: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sheet2cube"))
        .env_remove("RUST_LOG")
        .arg("--input")
        .arg(input)
        .arg("--output")
        .arg(output)
        .args(flags)
        .output()
        .expect("should run sheet2cube binary")
}

#[test]
fn cli_writes_yaml_and_exits_zero() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let input = support::write_semantic_template(dir.path());
    let output_path = dir.path().join("out/model.yml");

    let output = run_sheet2cube(&input, &output_path, &[]);

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Wrote output to:"),
        "unexpected stdout: {stdout}"
    );

    let yaml = std::fs::read_to_string(&output_path).expect("output should exist");
    assert!(yaml.starts_with("cubes:"), "unexpected yaml:\n{yaml}");
    assert!(yaml.contains("owner: sales"));
    assert!(yaml.contains("primaryKey: true"));
}

#[test]
fn cli_json_output_follows_extension() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let input = support::write_semantic_template(dir.path());
    let output_path = dir.path().join("model.json");

    let output = run_sheet2cube(&input, &output_path, &[]);
    assert_eq!(output.status.code(), Some(0));

    let json = std::fs::read_to_string(&output_path).expect("output should exist");
    let value: serde_json::Value = serde_json::from_str(&json).expect("output is valid json");
    assert_eq!(value["joins"][0]["name"], "users");
}

#[test]
fn cli_no_include_unknown_drops_extra_columns() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let input = support::write_semantic_template(dir.path());
    let output_path = dir.path().join("model.yml");

    let output = run_sheet2cube(&input, &output_path, &["--no-include-unknown"]);
    assert_eq!(output.status.code(), Some(0));

    let yaml = std::fs::read_to_string(&output_path).expect("output should exist");
    assert!(!yaml.contains("owner"), "unknown column leaked:\n{yaml}");
    assert!(yaml.contains("sql_table: public.orders"));
}

#[test]
fn cli_only_cube_filters_cubes() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let input = support::write_semantic_template(dir.path());
    let output_path = dir.path().join("model.yml");

    let output = run_sheet2cube(&input, &output_path, &["--only-cube", "users"]);
    assert_eq!(output.status.code(), Some(0));

    let yaml = std::fs::read_to_string(&output_path).expect("output should exist");
    let parsed: serde_yaml::Value = serde_yaml::from_str(&yaml).expect("output is valid yaml");
    let cubes = parsed["cubes"].as_sequence().expect("cubes is a sequence");
    assert_eq!(cubes.len(), 1);
    assert_eq!(cubes[0]["name"].as_str(), Some("users"));
    // Without --scope-joins the orders->users join survives.
    assert_eq!(parsed["joins"].as_sequence().map(Vec::len), Some(1));
}

#[test]
fn cli_scope_joins_restricts_joins_to_the_selected_cube() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let input = support::write_semantic_template(dir.path());
    let output_path = dir.path().join("model.yml");

    let output = run_sheet2cube(
        &input,
        &output_path,
        &["--only-cube", "users", "--scope-joins"],
    );
    assert_eq!(output.status.code(), Some(0));

    let yaml = std::fs::read_to_string(&output_path).expect("output should exist");
    assert!(yaml.contains("joins: []"), "joins should be scoped away:\n{yaml}");
}

#[test]
fn cli_scope_joins_requires_only_cube() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let input = support::write_semantic_template(dir.path());
    let output_path = dir.path().join("model.yml");

    let output = run_sheet2cube(&input, &output_path, &["--scope-joins"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(!output_path.exists());
}

#[test]
fn cli_writes_report_when_requested() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let input = support::write_semantic_template(dir.path());
    let output_path = dir.path().join("model.yml");
    let report_path = dir.path().join("reports/classification.md");

    let output = run_sheet2cube(
        &input,
        &output_path,
        &["--report", report_path.to_str().expect("utf-8 temp path")],
    );
    assert_eq!(output.status.code(), Some(0));

    let report = std::fs::read_to_string(&report_path).expect("report should exist");
    assert!(report.contains("# sheet2cube Classification Report"));
    assert!(report.contains("| Notes |"));
    assert!(report.contains("unclassified"));
}

#[test]
fn cli_exits_one_when_nothing_is_classifiable() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let input = support::write_xlsx(
        dir.path(),
        "notes.xlsx",
        &[("Notes", &[&["comment", "author"], &["hello", "me"]])],
    );
    let output_path = dir.path().join("model.yml");

    let output = run_sheet2cube(&input, &output_path, &[]);

    assert_eq!(
        output.status.code(),
        Some(1),
        "expected exit code 1 for an unclassifiable workbook, got {:?}",
        output.status
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("no recognizable sections"),
        "unexpected stderr: {stderr}"
    );
    assert!(!output_path.exists());
}

#[test]
fn cli_exits_two_when_input_is_missing() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let input = dir.path().join("missing.xlsx");
    let output_path = dir.path().join("model.yml");

    let output = run_sheet2cube(&input, &output_path, &[]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("input file not found"), "unexpected stderr: {stderr}");
}

#[test]
fn cli_verbose_logs_classification_details() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let input = support::write_semantic_template(dir.path());
    let output_path = dir.path().join("model.yml");

    let output = run_sheet2cube(&input, &output_path, &["--verbose"]);
    assert_eq!(output.status.code(), Some(0));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("DEBUG"), "expected debug logs: {stderr}");
}
