//! Session lifecycle end to end over HTTP

use super::helpers::StubServer;
use testra::{
    ExecutionMetadata, ResultStatus, Session, StepResult, TestResultRequest, TestraError,
};

#[test]
fn test_run_lifecycle_over_http() {
    let server = StubServer::start(vec![
        (200, r#"{"projectsCount":1}"#),
        (200, r#"{"id":"p-1","name":"acme"}"#),
        (201, r#"{"id":"e-9","host":"ci-1"}"#),
        (
            201,
            r#"{"id":"r-1","targetId":"t-1","executionId":"e-9","status":"FAILED"}"#,
        ),
        (
            200,
            r#"[{"id":"r-1","targetId":"t-1","status":"FAILED","targetName":"login works"}]"#,
        ),
    ]);
    let session = Session::connect(server.config(), server.transport()).unwrap();

    let metadata = ExecutionMetadata::default().with_host("ci-1");
    let execution_id = session.resolve_execution(None, &metadata).unwrap();
    // stored id is returned without another request
    assert_eq!(session.resolve_execution(None, &metadata).unwrap(), execution_id);

    let request = TestResultRequest::new("t-1", ResultStatus::Failed)
        .with_retry_count(2)
        .with_step(StepResult {
            index: 0,
            status: ResultStatus::Failed,
            duration: 12,
            error: Some("element not found".to_string()),
        });
    let result = session.create_result(&request).unwrap();
    let failed = session.failed_results().unwrap();
    let requests = server.finish();

    assert_eq!(execution_id, "e-9");
    assert_eq!(result.id, "r-1");
    assert_eq!(failed[0].target_name.as_deref(), Some("login works"));

    let targets: Vec<_> = requests
        .iter()
        .map(|r| format!("{} {}", r.method, r.target))
        .collect();
    assert_eq!(
        targets,
        vec![
            "GET /api/v1/counters",
            "GET /api/v1/projects/acme",
            "POST /api/v1/projects/p-1/executions",
            "POST /api/v1/projects/p-1/executions/e-9/results",
            "GET /api/v1/projects/p-1/executions/e-9/results?result=FAILED",
        ]
    );

    let execution_body: serde_json::Value = serde_json::from_str(&requests[2].body).unwrap();
    assert_eq!(execution_body["host"], "ci-1");
    assert_eq!(execution_body["tags"], serde_json::json!([""]));
    assert!(execution_body.get("branch").is_none());

    let result_body: serde_json::Value = serde_json::from_str(&requests[3].body).unwrap();
    assert_eq!(result_body["retryCount"], 2);
    assert_eq!(result_body["stepResults"][0]["status"], "FAILED");
    assert_eq!(result_body["stepResults"][0]["error"], "element not found");
}

#[test]
fn test_unknown_project_over_http() {
    let server = StubServer::start(vec![
        (200, r#"{"projectsCount":0}"#),
        (404, r#"{"message":"Project not found"}"#),
    ]);
    let mut config = server.config();
    config.project = "ghost".to_string();

    let result = Session::connect(config, server.transport());
    server.finish();

    assert!(matches!(
        result,
        Err(TestraError::ProjectNotFound { ref name }) if name == "ghost"
    ));
}

#[test]
fn test_update_of_unknown_result_over_http() {
    let server = StubServer::start(vec![
        (200, r#"{"id":"p-1","name":"acme"}"#),
        (200, r#"{"id":"e-9"}"#),
        (404, r#"{"message":"Result not found"}"#),
    ]);
    let session = Session::new(server.config(), server.transport());
    session.resolve_project("acme").unwrap();
    session
        .resolve_execution(Some("e-9"), &ExecutionMetadata::default())
        .unwrap();

    let err = session
        .update_result("r-404", &TestResultRequest::new("t-1", ResultStatus::Passed))
        .unwrap_err();
    server.finish();

    assert!(matches!(err, TestraError::ResultNotFound { .. }));
}
