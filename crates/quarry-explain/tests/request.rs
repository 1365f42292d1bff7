use std::fs;
use std::process::Command;

use quarry_explain::{ExplainError, ExplainRequest, explain, load_request, to_json};

#[test]
fn load_yaml_request() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("request.yaml");
    fs::write(&path, "session_key: k0\nfields:\n  - a.b\n  - c\n").unwrap();

    let request = load_request(&path).unwrap();
    assert_eq!(
        request,
        ExplainRequest {
            session_key: Some("k0".into()),
            fields: vec!["a.b".into(), "c".into()],
        }
    );
}

#[test]
fn load_json_request_without_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("request.json");
    fs::write(&path, r#"{ "fields": ["x"] }"#).unwrap();

    let request = load_request(&path).unwrap();
    assert_eq!(request.session_key, None);
    assert_eq!(request.fields, vec!["x".to_string()]);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_request(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ExplainError::Io(_)));
}

#[test]
fn malformed_yaml_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("request.yml");
    fs::write(&path, "fields: [unclosed\n").unwrap();
    assert!(matches!(load_request(&path), Err(ExplainError::Yaml(_))));
}

#[test]
fn file_to_pretty_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("request.json");
    fs::write(&path, r#"{ "session_key": "k0", "fields": ["a.b"] }"#).unwrap();

    let pipeline = explain(&load_request(&path).unwrap()).unwrap();
    let json = to_json(&pipeline, false).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(
        parsed,
        serde_json::json!([
            { "$addFields": { "k0": "$$ROOT" } },
            { "$match": { "k0.a.b": { "$exists": true } } },
            { "$addFields": { "k0_project": "$k0.a.b" } },
            { "$addFields": { "k0": "$k0_project" } }
        ])
    );
}

// ── Binary ──────────────────────────────────────────────────────

fn explain_command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_quarry-explain"));
    cmd.env_remove("QUARRY_EXPLAIN_REQUEST")
        .env_remove("QUARRY_EXPLAIN_COMPACT");
    cmd
}

#[test]
fn binary_without_request_exits_with_status_one() {
    let output = explain_command().output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("QUARRY_EXPLAIN_REQUEST"));
}

#[test]
fn binary_reads_env_request_and_prints_compact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("request.json");
    fs::write(&path, r#"{ "session_key": "u1", "fields": ["x"] }"#).unwrap();

    let output = explain_command()
        .env("QUARRY_EXPLAIN_REQUEST", &path)
        .env("QUARRY_EXPLAIN_COMPACT", "1")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.starts_with(r#"[{"$addFields":{"u1":"$$ROOT"}}"#));
}

#[test]
fn binary_argument_wins_over_env() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("request.yaml");
    fs::write(&path, "session_key: k0\nfields: [a]\n").unwrap();

    let output = explain_command()
        .arg(&path)
        .env("QUARRY_EXPLAIN_REQUEST", dir.path().join("absent.json"))
        .output()
        .unwrap();
    assert!(output.status.success());
    let stages: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stages.as_array().map(Vec::len), Some(4));
}
