use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Outcome of one test within an execution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultStatus {
    Passed,
    Failed,
    Skipped,
    Pending,
    Ambiguous,
    Undefined,
}

impl ResultStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultStatus::Passed => "PASSED",
            ResultStatus::Failed => "FAILED",
            ResultStatus::Skipped => "SKIPPED",
            ResultStatus::Pending => "PENDING",
            ResultStatus::Ambiguous => "AMBIGUOUS",
            ResultStatus::Undefined => "UNDEFINED",
        }
    }
}

impl std::fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResultStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PASSED" => Ok(ResultStatus::Passed),
            "FAILED" => Ok(ResultStatus::Failed),
            "SKIPPED" => Ok(ResultStatus::Skipped),
            "PENDING" => Ok(ResultStatus::Pending),
            "AMBIGUOUS" => Ok(ResultStatus::Ambiguous),
            "UNDEFINED" => Ok(ResultStatus::Undefined),
            other => Err(format!("Unknown result status: {other}")),
        }
    }
}

/// Kind of target a result is recorded against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultType {
    #[default]
    Scenario,
    TestCase,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StepResult {
    pub index: u32,
    pub status: ResultStatus,
    #[serde(default)]
    pub duration: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of the create/update result calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TestResultRequest {
    pub target_id: String,
    pub result_type: ResultType,
    pub status: ResultStatus,
    #[serde(default)]
    pub duration_in_ms: u64,
    #[serde(default)]
    pub start_time: i64,
    #[serde(default)]
    pub end_time: i64,
    #[serde(default)]
    pub retry_count: u32,
    #[serde(default)]
    pub expected_to_fail: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub step_results: Vec<StepResult>,
}

impl TestResultRequest {
    pub fn new(target_id: impl Into<String>, status: ResultStatus) -> Self {
        Self {
            target_id: target_id.into(),
            result_type: ResultType::default(),
            status,
            duration_in_ms: 0,
            start_time: 0,
            end_time: 0,
            retry_count: 0,
            expected_to_fail: false,
            error: None,
            step_results: Vec::new(),
        }
    }

    pub fn with_result_type(mut self, result_type: ResultType) -> Self {
        self.result_type = result_type;
        self
    }

    /// Record start/end times (epoch millis) and the duration between them.
    /// An end before the start yields a zero duration.
    pub fn with_timing(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_time = start.timestamp_millis();
        self.end_time = end.timestamp_millis();
        self.duration_in_ms = (end - start).num_milliseconds().max(0) as u64;
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    pub fn with_step(mut self, step: StepResult) -> Self {
        self.step_results.push(step);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub id: String,
    pub target_id: String,
    #[serde(default)]
    pub execution_id: Option<String>,
    #[serde(default)]
    pub result_type: ResultType,
    pub status: ResultStatus,
    #[serde(default)]
    pub duration_in_ms: u64,
    #[serde(default)]
    pub start_time: i64,
    #[serde(default)]
    pub end_time: i64,
    #[serde(default)]
    pub retry_count: u32,
    #[serde(default)]
    pub error: Option<String>,
}

/// A result as returned by the listing call, joined with its target's names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedTestResult {
    #[serde(flatten)]
    pub result: TestResult,
    #[serde(default)]
    pub target_name: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub feature_name: Option<String>,
}
