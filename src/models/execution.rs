use serde::{Deserialize, Serialize};

use super::constants::UNKNOWN_HOST;
use crate::config::ClientConfig;

/// Body of the create-execution call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRequest {
    pub host: String,
    pub parallel: bool,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_ref: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    pub id: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub parallel: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Caller-side description of the run an execution is created for.
///
/// Absent optional values are left out of the request entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionMetadata {
    /// Overrides the locally computed host name.
    pub host: Option<String>,
    pub branch: Option<String>,
    pub environment: Option<String>,
    pub description: Option<String>,
    pub build_ref: Option<String>,
    pub parallel: bool,
    pub tags: Vec<String>,
}

impl ExecutionMetadata {
    /// Metadata sourced from the client configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            host: None,
            branch: config.branch.clone(),
            environment: config.environment.clone(),
            description: config.execution_description.clone(),
            build_ref: config.build_ref.clone(),
            parallel: false,
            tags: Vec::new(),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Build the wire request. Tags default to a single empty tag, which is
    /// what the service expects when none are given.
    pub fn to_request(&self) -> ExecutionRequest {
        let tags = if self.tags.is_empty() {
            vec![String::new()]
        } else {
            self.tags.clone()
        };

        ExecutionRequest {
            host: self.host.clone().unwrap_or_else(host_name),
            parallel: self.parallel,
            tags,
            branch: non_empty(&self.branch),
            environment: non_empty(&self.environment),
            description: non_empty(&self.description),
            build_ref: non_empty(&self.build_ref),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

/// Name of the machine the run executes on.
pub fn host_name() -> String {
    nix::unistd::gethostname()
        .ok()
        .and_then(|name| name.into_string().ok())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_HOST.to_string())
}
