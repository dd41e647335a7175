//! Client configuration.
//!
//! Values are layered: defaults, then a TOML file or key/value pairs, then
//! `TESTRA_*` environment variables. Later layers win.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Result, TestraError};
use crate::models::constants::{
    env as env_keys, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_EXEC_FILE, DEFAULT_REQUEST_TIMEOUT_SECS,
};

/// How failures of soft telemetry calls (simulations, security scans, and
/// verification of an adopted execution) are handled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Propagate every failure to the caller.
    Strict,
    /// Log soft failures and let the run continue.
    #[default]
    Lenient,
}

impl std::fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorPolicy::Strict => write!(f, "strict"),
            ErrorPolicy::Lenient => write!(f, "lenient"),
        }
    }
}

impl FromStr for ErrorPolicy {
    type Err = TestraError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ErrorPolicy::Strict),
            "lenient" => Ok(ErrorPolicy::Lenient),
            other => Err(TestraError::Config(format!(
                "Unknown error policy '{other}' (expected 'strict' or 'lenient')"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the service, e.g. `http://testra.internal:8080`.
    pub api_url: String,
    /// Human-readable project name, resolved to an id at startup.
    pub project: String,
    pub branch: Option<String>,
    pub environment: Option<String>,
    pub build_ref: Option<String>,
    pub execution_description: Option<String>,
    /// Log request/response bodies.
    pub debug: bool,
    pub error_policy: ErrorPolicy,
    /// Look up an externally supplied execution id before adopting it.
    pub verify_adopted_execution: bool,
    pub exec_file: PathBuf,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            project: String::new(),
            branch: None,
            environment: None,
            build_ref: None,
            execution_description: None,
            debug: false,
            error_policy: ErrorPolicy::default(),
            verify_adopted_execution: true,
            exec_file: PathBuf::from(DEFAULT_EXEC_FILE),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            project: project.into(),
            ..Self::default()
        }
    }

    /// Load a TOML configuration file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| TestraError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| {
            TestraError::Config(format!("Failed to parse {}: {e}", path.display()))
        })
    }

    /// Build from properties-style key/value pairs.
    ///
    /// Recognised keys: `apiUrl`, `project`, `branch`, `testra.environment`,
    /// `buildRef`, `executionDescription`, `testra.debug` / `debugTestra`,
    /// `testra.errorPolicy`. Unknown keys are ignored.
    pub fn from_pairs(pairs: &HashMap<String, String>) -> Result<Self> {
        let mut config = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "apiUrl" => config.api_url = value.clone(),
                "project" => config.project = value.clone(),
                "branch" => config.branch = Some(value.clone()),
                "testra.environment" => config.environment = Some(value.clone()),
                "buildRef" => config.build_ref = Some(value.clone()),
                "executionDescription" => config.execution_description = Some(value.clone()),
                "testra.debug" => config.debug = parse_flag(value),
                // presence alone enables debug
                "debugTestra" => config.debug = true,
                "testra.errorPolicy" => config.error_policy = value.parse()?,
                _ => {}
            }
        }
        Ok(config)
    }

    /// Overlay `TESTRA_*` environment variables onto this configuration.
    pub fn apply_env(mut self) -> Result<Self> {
        if let Some(value) = env_value(env_keys::API_URL) {
            self.api_url = value;
        }
        if let Some(value) = env_value(env_keys::PROJECT) {
            self.project = value;
        }
        if let Some(value) = env_value(env_keys::BRANCH) {
            self.branch = Some(value);
        }
        if let Some(value) = env_value(env_keys::ENVIRONMENT) {
            self.environment = Some(value);
        }
        if let Some(value) = env_value(env_keys::BUILD_REF) {
            self.build_ref = Some(value);
        }
        if let Some(value) = env_value(env_keys::EXECUTION_DESCRIPTION) {
            self.execution_description = Some(value);
        }
        if let Some(value) = env_value(env_keys::DEBUG) {
            self.debug = parse_flag(&value);
        }
        if let Some(value) = env_value(env_keys::ERROR_POLICY) {
            self.error_policy = value.parse()?;
        }
        Ok(self)
    }

    /// Check that the service URL and project name are usable.
    pub fn validate(&self) -> Result<()> {
        let url = self.api_url.trim();
        if url.is_empty() {
            return Err(TestraError::Config("apiUrl is not set".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(TestraError::Config(format!(
                "apiUrl must start with http:// or https://, got '{url}'"
            )));
        }
        if self.project.trim().is_empty() {
            return Err(TestraError::Config("project is not set".to_string()));
        }
        Ok(())
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
