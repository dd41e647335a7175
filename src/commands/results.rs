//! Results command - lists results of an execution by status

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use super::common::{execution_id_from, load_config, open_session};
use crate::models::{EnrichedTestResult, ExecutionMetadata, ResultStatus};

pub struct ResultsOptions<'a> {
    pub config_path: Option<&'a Path>,
    pub strict: bool,
    pub execution_id: Option<String>,
    pub status: ResultStatus,
    /// Fail the pipeline when any result matches `status`.
    pub fail_on_match: bool,
}

pub fn execute(options: ResultsOptions<'_>) -> Result<ExitCode> {
    let count = list(&options)?;
    Ok(exit_code(count, options.fail_on_match))
}

fn exit_code(count: usize, fail_on_match: bool) -> ExitCode {
    if fail_on_match && count > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Print matching results and return how many were found.
fn list(options: &ResultsOptions<'_>) -> Result<usize> {
    let status = options.status;
    let config = load_config(options.config_path, options.strict)?;
    let Some(execution_id) = execution_id_from(options.execution_id.clone(), &config.exec_file)?
    else {
        bail!(
            "No execution id given and no {} file found. Run `testra start` first.",
            config.exec_file.display()
        );
    };

    let metadata = ExecutionMetadata::from_config(&config);
    let session = open_session(config)?;
    session.resolve_execution(Some(execution_id.as_str()), &metadata)?;

    let results = session
        .list_results(status)
        .with_context(|| format!("Failed to list {status} results"))?;

    if results.is_empty() {
        println!(
            "{} No {} results in execution {}",
            "─".dimmed(),
            status,
            execution_id
        );
        return Ok(0);
    }

    println!(
        "{} {} {} result(s) in execution {}",
        "→".cyan().bold(),
        results.len(),
        status,
        execution_id.bold()
    );
    for result in &results {
        println!("  {}", format_result(result));
    }
    Ok(results.len())
}

fn format_result(result: &EnrichedTestResult) -> String {
    let name = result
        .target_name
        .as_deref()
        .unwrap_or(result.result.target_id.as_str());
    let status = match result.result.status {
        ResultStatus::Passed => result.result.status.to_string().green(),
        ResultStatus::Failed => result.result.status.to_string().red(),
        _ => result.result.status.to_string().yellow(),
    };
    match &result.result.error {
        Some(error) => format!(
            "{status} {name} ({}ms) {}",
            result.result.duration_in_ms,
            error.dimmed()
        ),
        None => format!("{status} {name} ({}ms)", result.result.duration_in_ms),
    }
}
