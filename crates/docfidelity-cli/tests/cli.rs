use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn docfidelity() -> Command {
    Command::cargo_bin("docfidelity").unwrap()
}

#[test]
fn convert_rejects_unknown_extension() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    fs::write(&input, b"\x89PNG\r\n\x1a\n").unwrap();

    docfidelity()
        .arg("convert")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"reason\": \"unsupported_format\""));
}

#[test]
fn convert_reports_malformed_docx() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("contrato.docx");
    fs::write(&input, b"not a zip archive").unwrap();

    docfidelity()
        .arg("convert")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed docx input"));
}

#[test]
fn convert_missing_file() {
    docfidelity()
        .args(["convert", "/nonexistent/contrato.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn fields_lists_placeholders() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("template.html");
    fs::write(&input, "<p>{{ cliente }} - {{fecha}} - {{ cliente }}</p>").unwrap();

    docfidelity()
        .arg("fields")
        .arg(&input)
        .assert()
        .success()
        .stdout("cliente\nfecha\n");
}

#[test]
fn fields_merges_values() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("template.html");
    let output = dir.path().join("merged.html");
    fs::write(&input, "<p>{{ cliente }} / {{fecha}}</p>").unwrap();

    docfidelity()
        .arg("fields")
        .arg(&input)
        .args(["--set", "cliente=Smith & Sons", "-o"])
        .arg(&output)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "<p>Smith &amp; Sons / </p>"
    );
}

#[test]
fn config_init_writes_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    docfidelity()
        .args(["config", "init", "-o"])
        .arg(&path)
        .assert()
        .success();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("\"container_css\""));
    assert!(written.contains("\"eng+spa\""));
}

#[test]
fn config_show_uses_global_config_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.json");
    fs::write(&path, r#"{ "container_css": "font-family:Garamond;" }"#).unwrap();

    docfidelity()
        .arg("-c")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("font-family:Garamond;"));
}

#[test]
fn config_path_reports_global_config_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.json");
    fs::write(&path, "{}").unwrap();

    docfidelity()
        .args(["config", "path", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.json"));
}

#[test]
fn config_show_rejects_missing_config_file() {
    docfidelity()
        .args(["-c", "/nonexistent/docfidelity.json", "config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read config"));
}
