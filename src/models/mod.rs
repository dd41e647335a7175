//! Request and response payloads exchanged with the Testra service.
//!
//! Field names follow the service's camelCase JSON. Only the fields the client
//! reads or sets are modelled; unknown response fields are ignored.

pub mod constants;
pub mod execution;
pub mod project;
pub mod result;
pub mod scenario;
pub mod telemetry;

pub use execution::{host_name, Execution, ExecutionMetadata, ExecutionRequest};
pub use project::{Counters, Project};
pub use result::{
    EnrichedTestResult, ResultStatus, ResultType, StepResult, TestResult, TestResultRequest,
};
pub use scenario::{Scenario, ScenarioRequest, Testcase, TestcaseRequest};
pub use telemetry::{ScanAlert, ScanResult, ScanResultRequest, Simulation, SimulationRequest};
