//! Start command - resolves the run's execution and records its id
//!
//! Run once at the beginning of a CI pipeline; later steps adopt the
//! execution through the exec file or `--execution-id`.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use super::common::{execution_id_from, load_config, open_session};
use crate::models::ExecutionMetadata;

pub struct StartOptions<'a> {
    pub config_path: Option<&'a Path>,
    pub strict: bool,
    pub execution_id: Option<String>,
    /// Adopt the id found in an existing exec file instead of creating.
    pub reuse_exec_file: bool,
    pub write_exec_file: bool,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

/// Returns the resolved execution id.
pub fn execute(options: StartOptions<'_>) -> Result<String> {
    let config = load_config(options.config_path, options.strict)?;
    let exec_file = config.exec_file.clone();

    let existing = if options.reuse_exec_file {
        execution_id_from(options.execution_id, &exec_file)?
    } else {
        options.execution_id
    };

    let mut metadata = ExecutionMetadata::from_config(&config);
    if options.description.is_some() {
        metadata.description = options.description;
    }
    metadata.tags = options.tags;

    let session = open_session(config)?;
    let adopting = existing.is_some();
    let execution_id = session
        .resolve_execution(existing.as_deref(), &metadata)
        .context("Failed to resolve Testra execution")?;

    if adopting {
        println!("{} Adopted execution {}", "✓".green().bold(), execution_id.bold());
    } else {
        println!("{} Created execution {}", "✓".green().bold(), execution_id.bold());
    }

    if options.write_exec_file {
        let path = session.write_execution_file()?;
        println!("  {} {}", "Execution id written to".dimmed(), path.display());
    }

    Ok(execution_id)
}
