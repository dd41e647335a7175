//! `testra start` and `testra results` against a scripted server

use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tempfile::TempDir;

use super::helpers::{capture_logs, exec_file, targets, StubServer};
use testra::commands::{results, start};
use testra::ResultStatus;

const COUNTERS: (u16, &str) = (200, r#"{"projectsCount":1}"#);
const PROJECT: (u16, &str) = (200, r#"{"id":"p-1","name":"acme"}"#);

fn start_options(config_path: &Path) -> start::StartOptions<'_> {
    capture_logs();
    start::StartOptions {
        config_path: Some(config_path),
        strict: false,
        execution_id: None,
        reuse_exec_file: false,
        write_exec_file: true,
        description: None,
        tags: Vec::new(),
    }
}

fn results_options(config_path: &Path, fail_on_match: bool) -> results::ResultsOptions<'_> {
    capture_logs();
    results::ResultsOptions {
        config_path: Some(config_path),
        strict: false,
        execution_id: None,
        status: ResultStatus::Failed,
        fail_on_match,
    }
}

#[test]
fn test_start_creates_execution_and_writes_exec_file() {
    let temp = TempDir::new().unwrap();
    let server = StubServer::start(vec![COUNTERS, PROJECT, (201, r#"{"id":"e-9"}"#)]);
    let config_path = server.write_config(temp.path());

    let mut options = start_options(&config_path);
    options.description = Some("nightly regression".to_string());
    options.tags = vec!["nightly".to_string(), "smoke".to_string()];
    let execution_id = start::execute(options).unwrap();
    let requests = server.finish();

    assert_eq!(execution_id, "e-9");
    assert_eq!(
        targets(&requests),
        vec![
            "GET /api/v1/counters",
            "GET /api/v1/projects/acme",
            "POST /api/v1/projects/p-1/executions",
        ]
    );
    let body: serde_json::Value = serde_json::from_str(&requests[2].body).unwrap();
    assert_eq!(body["description"], "nightly regression");
    assert_eq!(body["tags"], serde_json::json!(["nightly", "smoke"]));

    let written = fs::read_to_string(exec_file(temp.path())).unwrap();
    assert_eq!(written.trim(), "e-9");
}

#[test]
fn test_start_without_exec_file_leaves_no_file() {
    let temp = TempDir::new().unwrap();
    let server = StubServer::start(vec![COUNTERS, PROJECT, (201, r#"{"id":"e-9"}"#)]);
    let config_path = server.write_config(temp.path());

    let mut options = start_options(&config_path);
    options.write_exec_file = false;
    start::execute(options).unwrap();
    server.finish();

    assert!(!exec_file(temp.path()).exists());
}

#[test]
fn test_start_reuse_adopts_recorded_execution() {
    let temp = TempDir::new().unwrap();
    fs::write(exec_file(temp.path()), "e-7\n").unwrap();
    let server = StubServer::start(vec![COUNTERS, PROJECT, (200, r#"{"id":"e-7"}"#)]);
    let config_path = server.write_config(temp.path());

    let mut options = start_options(&config_path);
    options.reuse_exec_file = true;
    let execution_id = start::execute(options).unwrap();
    let requests = server.finish();

    assert_eq!(execution_id, "e-7");
    let sent = targets(&requests);
    assert_eq!(sent[2], "GET /api/v1/projects/p-1/executions/e-7");
    assert!(sent.iter().all(|t| !t.starts_with("POST")));
    assert_eq!(
        fs::read_to_string(exec_file(temp.path())).unwrap().trim(),
        "e-7"
    );
}

#[test]
fn test_results_reads_exec_file_and_fails_on_match() {
    let temp = TempDir::new().unwrap();
    fs::write(exec_file(temp.path()), "e-9").unwrap();
    let server = StubServer::start(vec![
        COUNTERS,
        PROJECT,
        (200, r#"{"id":"e-9"}"#),
        (
            200,
            r#"[{"id":"r-1","targetId":"t-1","status":"FAILED","targetName":"login works"}]"#,
        ),
    ]);
    let config_path = server.write_config(temp.path());

    let code = results::execute(results_options(&config_path, true)).unwrap();
    let requests = server.finish();

    assert_eq!(code, ExitCode::FAILURE);
    assert_eq!(
        targets(&requests)[3],
        "GET /api/v1/projects/p-1/executions/e-9/results?result=FAILED"
    );
}

#[test]
fn test_results_without_matches_succeeds() {
    let temp = TempDir::new().unwrap();
    fs::write(exec_file(temp.path()), "e-9").unwrap();
    let server = StubServer::start(vec![
        COUNTERS,
        PROJECT,
        (200, r#"{"id":"e-9"}"#),
        (200, "[]"),
    ]);
    let config_path = server.write_config(temp.path());

    let code = results::execute(results_options(&config_path, true)).unwrap();
    server.finish();

    assert_eq!(code, ExitCode::SUCCESS);
}

#[test]
fn test_results_without_execution_id_fails_before_any_request() {
    let temp = TempDir::new().unwrap();
    let server = StubServer::start(Vec::new());
    let config_path = server.write_config(temp.path());

    let err = results::execute(results_options(&config_path, false)).unwrap_err();
    let requests = server.finish();

    assert!(err.to_string().contains("testra start"));
    assert!(requests.is_empty());
}

#[test]
fn test_results_strict_rejects_unverifiable_execution() {
    let temp = TempDir::new().unwrap();
    fs::write(exec_file(temp.path()), "e-9").unwrap();
    let server = StubServer::start(vec![
        COUNTERS,
        PROJECT,
        (500, r#"{"message":"internal error"}"#),
    ]);
    let config_path = server.write_config(temp.path());

    let mut options = results_options(&config_path, false);
    options.strict = true;
    let result = results::execute(options);
    let requests = server.finish();

    assert!(result.is_err());
    assert_eq!(requests.len(), 3);
}
