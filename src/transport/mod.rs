//! Binding between the session and the Testra REST API.
//!
//! One trait method per remote call. Implementations perform exactly one
//! request per call, with no retries.

mod http;

pub use http::HttpTransport;

use thiserror::Error;

use crate::models::{
    Counters, EnrichedTestResult, Execution, ExecutionRequest, Project, ResultStatus, ScanResult,
    ScanResultRequest, Scenario, ScenarioRequest, Simulation, SimulationRequest, TestResult,
    TestResultRequest, Testcase, TestcaseRequest,
};

/// Failure of a single remote call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No response was obtained (connection, DNS, timeout).
    #[error("network error: {message}")]
    Network { message: String },
    /// The service answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// A 2xx response whose body could not be decoded.
    #[error("undecodable response: {message}")]
    Decode { message: String },
}

impl TransportError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TransportError::Status { status: 404, .. })
    }
}

pub type TransportResult<T> = std::result::Result<T, TransportError>;

pub trait Transport: Send + Sync {
    fn counters(&self) -> TransportResult<Counters>;

    /// Look a project up by its name (or id).
    fn get_project(&self, name: &str) -> TransportResult<Project>;

    fn list_projects(&self) -> TransportResult<Vec<Project>>;

    fn create_execution(
        &self,
        project_id: &str,
        request: &ExecutionRequest,
    ) -> TransportResult<Execution>;

    fn get_execution(&self, project_id: &str, execution_id: &str) -> TransportResult<Execution>;

    fn create_scenario(
        &self,
        project_id: &str,
        request: &ScenarioRequest,
    ) -> TransportResult<Scenario>;

    fn create_testcase(
        &self,
        project_id: &str,
        request: &TestcaseRequest,
    ) -> TransportResult<Testcase>;

    fn create_result(
        &self,
        project_id: &str,
        execution_id: &str,
        request: &TestResultRequest,
    ) -> TransportResult<TestResult>;

    fn update_result(
        &self,
        project_id: &str,
        execution_id: &str,
        result_id: &str,
        request: &TestResultRequest,
    ) -> TransportResult<TestResult>;

    /// Results of an execution, optionally filtered by status.
    fn list_results(
        &self,
        project_id: &str,
        execution_id: &str,
        status: Option<ResultStatus>,
    ) -> TransportResult<Vec<EnrichedTestResult>>;

    fn create_simulation(
        &self,
        project_id: &str,
        execution_id: &str,
        request: &SimulationRequest,
    ) -> TransportResult<Simulation>;

    fn create_security_scan_result(
        &self,
        project_id: &str,
        execution_id: &str,
        request: &ScanResultRequest,
    ) -> TransportResult<ScanResult>;
}
