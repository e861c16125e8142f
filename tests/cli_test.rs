use std::path::Path;
use std::process::{Command, Output};

use cvsift::CvRecord;

mod common;
use common::{DocxBuilder, paragraph, sample_cv};

fn cvsift(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cvsift"))
        .arg("--config")
        .arg(dir.join("absent-config.toml"))
        .args(args)
        .output()
        .expect("Failed to execute cvsift")
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_help_available() {
    let dir = tempfile::tempdir().unwrap();
    let output = cvsift(dir.path(), &["--help"]);

    assert!(output.status.success(), "cvsift should show help");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("extract"));
    assert!(stdout.contains("batch"));
}

#[test]
fn test_extract_prints_record_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = sample_cv().write(&dir.path().join("ada.docx"));

    let output = cvsift(dir.path(), &["extract", path_str(&input)]);
    assert!(
        output.status.success(),
        "extract failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let record: CvRecord = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record.identity.title, "Senior Engineer");
    assert_eq!(record.experiences[0].bullets, vec!["Shipped Y"]);
}

#[test]
fn test_compare_docx_against_its_extracted_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = sample_cv().write(&dir.path().join("ada.docx"));
    let json = dir.path().join("ada.json");

    let output = cvsift(
        dir.path(),
        &["extract", path_str(&input), "-o", path_str(&json), "--pretty"],
    );
    assert!(output.status.success());

    let output = cvsift(dir.path(), &["compare", path_str(&input), path_str(&json)]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "OK");
}

#[test]
fn test_compare_reports_findings_and_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = sample_cv().write(&dir.path().join("ada.docx"));
    let json = dir.path().join("edited.json");

    let mut record = cvsift::extract_path(&input).unwrap();
    record.overview = "Rewritten.".to_string();
    std::fs::write(&json, serde_json::to_string(&record).unwrap()).unwrap();

    let output = cvsift(dir.path(), &["compare", path_str(&input), path_str(&json)]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("$.overview: value mismatch"), "got: {stdout}");
}

#[test]
fn test_validate_exit_status_follows_errors() {
    let dir = tempfile::tempdir().unwrap();
    let good = sample_cv().write(&dir.path().join("good.docx"));
    let bare = DocxBuilder::new()
        .body(paragraph("Just a letter"))
        .write(&dir.path().join("bare.docx"));

    let output = cvsift(dir.path(), &["validate", path_str(&good)]);
    assert!(output.status.success());

    let output = cvsift(dir.path(), &["validate", path_str(&bare)]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("error: no experience entries"), "got: {stdout}");
}

#[test]
fn test_extract_missing_file_fails_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.docx");

    let output = cvsift(dir.path(), &["extract", path_str(&missing)]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.docx"));
}

#[test]
fn test_batch_writes_outputs_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let first = sample_cv().write(&dir.path().join("one.docx"));
    let second = sample_cv().write(&dir.path().join("two.docx"));
    let out = dir.path().join("out");

    let output = cvsift(
        dir.path(),
        &[
            "batch",
            path_str(&first),
            path_str(&second),
            "-o",
            path_str(&out),
            "-w",
            "2",
        ],
    );

    assert!(output.status.success());
    assert!(out.join("one.json").is_file());
    assert!(out.join("two.json").is_file());
    assert!(String::from_utf8_lossy(&output.stderr).contains("2 extracted, 0 failed, 0 skipped"));
}

#[test]
fn test_init_config_writes_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("cvsift").join("config.toml");

    let output = cvsift(dir.path(), &["init-config", path_str(&target)]);
    assert!(output.status.success());

    let content = std::fs::read_to_string(&target).unwrap();
    assert!(content.contains("[batch]"));
    assert!(content.contains("workers"));
}
