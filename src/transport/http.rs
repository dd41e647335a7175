//! `reqwest::blocking` implementation of [`Transport`].

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use super::{Transport, TransportError, TransportResult};
use crate::config::ClientConfig;
use crate::error::{Result, TestraError};
use crate::models::constants::API_PREFIX;
use crate::models::{
    Counters, EnrichedTestResult, Execution, ExecutionRequest, Project, ResultStatus, ScanResult,
    ScanResultRequest, Scenario, ScenarioRequest, Simulation, SimulationRequest, TestResult,
    TestResultRequest, Testcase, TestcaseRequest,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct HttpTransport {
    base_url: Url,
    client: Client,
    request_id: String,
    debug: bool,
}

impl HttpTransport {
    /// Create a transport for the configured service URL.
    ///
    /// Every request carries an `X-Request-Id` unique to this transport so
    /// server logs for one test run can be correlated.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let request_id = Uuid::new_v4().simple().to_string();

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            headers.insert("X-Request-Id", value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(format!("testra-rs/{VERSION}"))
            .build()
            .map_err(|e| TestraError::Config(format!("Failed to create HTTP client: {e}")))?;

        let base_url = Url::parse(config.api_url.trim_end_matches('/')).map_err(|e| {
            TestraError::Config(format!("Invalid apiUrl '{}': {e}", config.api_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(TestraError::Config(format!(
                "apiUrl '{}' cannot be used as a base URL",
                config.api_url
            )));
        }

        Ok(Self {
            base_url,
            client,
            request_id,
            debug: config.debug,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Build `<base>/api/v1/<segments...>`. Segments are percent-encoded, so
    /// project names containing spaces or slashes stay a single segment.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(API_PREFIX.split('/').filter(|s| !s.is_empty()));
            path.extend(segments);
        }
        url
    }

    fn get<T: DeserializeOwned>(&self, url: Url) -> TransportResult<T> {
        let path = url.path().to_string();
        self.send("GET", &path, self.client.get(url))
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, url: Url, body: &B) -> TransportResult<T> {
        let path = url.path().to_string();
        self.log_body("POST", &path, body);
        self.send("POST", &path, self.client.post(url).json(body))
    }

    fn put<B: Serialize, T: DeserializeOwned>(&self, url: Url, body: &B) -> TransportResult<T> {
        let path = url.path().to_string();
        self.log_body("PUT", &path, body);
        self.send("PUT", &path, self.client.put(url).json(body))
    }

    fn log_body<B: Serialize>(&self, method: &str, path: &str, body: &B) {
        if self.debug {
            let json = serde_json::to_string(body).unwrap_or_default();
            debug!(method, path, body = %json, "testra request");
        }
    }

    fn send<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        builder: RequestBuilder,
    ) -> TransportResult<T> {
        let response = builder.send().map_err(|e| TransportError::Network {
            message: e.to_string(),
        })?;

        let status = response.status();
        let text = response.text().map_err(|e| TransportError::Network {
            message: format!("Failed to read response body: {e}"),
        })?;

        if self.debug {
            debug!(method, path, status = status.as_u16(), body = %text, "testra response");
        }

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: if text.is_empty() {
                    status.canonical_reason().unwrap_or("Unknown error").to_string()
                } else {
                    text
                },
            });
        }

        serde_json::from_str(&text).map_err(|e| TransportError::Decode {
            message: e.to_string(),
        })
    }
}

impl Transport for HttpTransport {
    fn counters(&self) -> TransportResult<Counters> {
        self.get(self.url(&["counters"]))
    }

    fn get_project(&self, name: &str) -> TransportResult<Project> {
        self.get(self.url(&["projects", name]))
    }

    fn list_projects(&self) -> TransportResult<Vec<Project>> {
        self.get(self.url(&["projects"]))
    }

    fn create_execution(
        &self,
        project_id: &str,
        request: &ExecutionRequest,
    ) -> TransportResult<Execution> {
        self.post(self.url(&["projects", project_id, "executions"]), request)
    }

    fn get_execution(&self, project_id: &str, execution_id: &str) -> TransportResult<Execution> {
        self.get(self.url(&["projects", project_id, "executions", execution_id]))
    }

    fn create_scenario(
        &self,
        project_id: &str,
        request: &ScenarioRequest,
    ) -> TransportResult<Scenario> {
        self.post(self.url(&["projects", project_id, "scenarios"]), request)
    }

    fn create_testcase(
        &self,
        project_id: &str,
        request: &TestcaseRequest,
    ) -> TransportResult<Testcase> {
        self.post(self.url(&["projects", project_id, "testcases"]), request)
    }

    fn create_result(
        &self,
        project_id: &str,
        execution_id: &str,
        request: &TestResultRequest,
    ) -> TransportResult<TestResult> {
        let url = self.url(&["projects", project_id, "executions", execution_id, "results"]);
        self.post(url, request)
    }

    fn update_result(
        &self,
        project_id: &str,
        execution_id: &str,
        result_id: &str,
        request: &TestResultRequest,
    ) -> TransportResult<TestResult> {
        let url = self.url(&[
            "projects",
            project_id,
            "executions",
            execution_id,
            "results",
            result_id,
        ]);
        self.put(url, request)
    }

    fn list_results(
        &self,
        project_id: &str,
        execution_id: &str,
        status: Option<ResultStatus>,
    ) -> TransportResult<Vec<EnrichedTestResult>> {
        let mut url = self.url(&["projects", project_id, "executions", execution_id, "results"]);
        if let Some(status) = status {
            url.query_pairs_mut().append_pair("result", status.as_str());
        }
        self.get(url)
    }

    fn create_simulation(
        &self,
        project_id: &str,
        execution_id: &str,
        request: &SimulationRequest,
    ) -> TransportResult<Simulation> {
        let url = self.url(&[
            "projects",
            project_id,
            "executions",
            execution_id,
            "simulations",
        ]);
        self.post(url, request)
    }

    fn create_security_scan_result(
        &self,
        project_id: &str,
        execution_id: &str,
        request: &ScanResultRequest,
    ) -> TransportResult<ScanResult> {
        let url = self.url(&[
            "projects",
            project_id,
            "executions",
            execution_id,
            "security-scan-results",
        ]);
        self.post(url, request)
    }
}
