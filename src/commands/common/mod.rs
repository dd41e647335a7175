//! Common utility functions shared across command implementations.
//!
//! This module provides utilities for:
//! - Configuration discovery and loading
//! - Opening a connected session
//! - Picking up an execution id from the command line or the exec file

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::{ClientConfig, ErrorPolicy};
use crate::fs::read_execution_id;
use crate::logging;
use crate::models::constants::DEFAULT_CONFIG_FILE;
use crate::session::Session;
use crate::transport::HttpTransport;

/// Find `testra.toml` by walking up from `start`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from an explicit file, a discovered `testra.toml`, or
/// defaults, then overlay the environment.
pub fn load_config(config_path: Option<&Path>, strict: bool) -> Result<ClientConfig> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(&std::env::current_dir()?),
    };

    let base = match &path {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => ClientConfig::default(),
    };

    let mut config = base.apply_env().context("Invalid environment configuration")?;
    if strict {
        config.error_policy = ErrorPolicy::Strict;
    }
    config.validate()?;
    Ok(config)
}

/// Install logging and connect a session over HTTP.
pub fn open_session(config: ClientConfig) -> Result<Session<HttpTransport>> {
    logging::init(config.debug);
    let transport = HttpTransport::new(&config)?;
    let api_url = config.api_url.clone();
    Session::connect(config, transport)
        .with_context(|| format!("Failed to start Testra session against {api_url}"))
}

/// An explicit id wins; otherwise fall back to the exec file, if present.
pub fn execution_id_from(explicit: Option<String>, exec_file: &Path) -> Result<Option<String>> {
    if let Some(id) = explicit.filter(|id| !id.trim().is_empty()) {
        return Ok(Some(id));
    }
    Ok(read_execution_id(exec_file)?)
}
