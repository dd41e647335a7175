use tracing::error;

use super::Session;
use crate::config::ErrorPolicy;
use crate::error::{Result, TestraError};
use crate::models::{
    EnrichedTestResult, ResultStatus, ScanResult, ScanResultRequest, Scenario, ScenarioRequest,
    Simulation, SimulationRequest, TestResult, TestResultRequest, Testcase, TestcaseRequest,
};
use crate::transport::{Transport, TransportResult};

impl<T: Transport> Session<T> {
    pub fn create_scenario(&self, request: &ScenarioRequest) -> Result<Scenario> {
        let project_id = self.state.require_project()?;
        self.transport
            .create_scenario(&project_id, request)
            .map_err(|err| {
                error!(scenario = %request.name, error = %err, "error creating scenario");
                TestraError::from_transport("create_scenario", err)
            })
    }

    pub fn create_testcase(&self, request: &TestcaseRequest) -> Result<Testcase> {
        let project_id = self.state.require_project()?;
        self.transport
            .create_testcase(&project_id, request)
            .map_err(|err| {
                error!(testcase = %request.name, error = %err, "error creating test case");
                TestraError::from_transport("create_testcase", err)
            })
    }

    /// Record a result in the current execution. Never swallowed.
    pub fn create_result(&self, request: &TestResultRequest) -> Result<TestResult> {
        let (project_id, execution_id) = self.state.require_scope()?;
        let result = self
            .transport
            .create_result(&project_id, &execution_id, request)
            .map_err(|err| {
                error!(target_id = %request.target_id, error = %err, "error creating result");
                TestraError::from_transport("create_result", err)
            })?;
        self.state.mark_reporting();
        Ok(result)
    }

    pub fn update_result(&self, result_id: &str, request: &TestResultRequest) -> Result<TestResult> {
        if result_id.trim().is_empty() {
            return Err(TestraError::InvalidArgument(
                "result id must not be empty".to_string(),
            ));
        }
        let (project_id, execution_id) = self.state.require_scope()?;
        let result = self
            .transport
            .update_result(&project_id, &execution_id, result_id, request)
            .map_err(|err| {
                if err.is_not_found() {
                    TestraError::ResultNotFound {
                        result_id: result_id.to_string(),
                        execution_id: execution_id.clone(),
                    }
                } else {
                    error!(result_id, error = %err, "could not update result");
                    TestraError::from_transport("update_result", err)
                }
            })?;
        self.state.mark_reporting();
        Ok(result)
    }

    /// Results of the current execution with the given status.
    pub fn list_results(&self, status: ResultStatus) -> Result<Vec<EnrichedTestResult>> {
        let (project_id, execution_id) = self.state.require_scope()?;
        self.transport
            .list_results(&project_id, &execution_id, Some(status))
            .map_err(|err| {
                error!(%execution_id, error = %err, "no results found for execution");
                TestraError::from_transport("list_results", err)
            })
    }

    pub fn failed_results(&self) -> Result<Vec<EnrichedTestResult>> {
        self.list_results(ResultStatus::Failed)
    }

    /// Submit a simulation. Under the lenient policy a failed submission is
    /// logged and yields `Ok(None)`.
    pub fn create_simulation(&self, request: &SimulationRequest) -> Result<Option<Simulation>> {
        let (project_id, execution_id) = self.state.require_scope()?;
        let outcome = self
            .transport
            .create_simulation(&project_id, &execution_id, request);
        self.soft("create_simulation", outcome)
    }

    /// Submit a security scan result. Same failure handling as
    /// [`create_simulation`](Session::create_simulation).
    pub fn create_security_scan_result(
        &self,
        request: &ScanResultRequest,
    ) -> Result<Option<ScanResult>> {
        let (project_id, execution_id) = self.state.require_scope()?;
        let outcome = self
            .transport
            .create_security_scan_result(&project_id, &execution_id, request);
        self.soft("create_security_scan_result", outcome)
    }

    fn soft<R>(&self, operation: &'static str, outcome: TransportResult<R>) -> Result<Option<R>> {
        match outcome {
            Ok(value) => {
                self.state.mark_reporting();
                Ok(Some(value))
            }
            Err(err) => {
                let err = TestraError::from_transport(operation, err);
                match self.config.error_policy {
                    ErrorPolicy::Strict => Err(err),
                    ErrorPolicy::Lenient => {
                        error!(operation, error = %err, "telemetry submission failed, continuing");
                        Ok(None)
                    }
                }
            }
        }
    }
}
