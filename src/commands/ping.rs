//! Ping command - checks the service is reachable and the project resolves

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::common::{load_config, open_session};

pub fn execute(config_path: Option<&Path>, strict: bool) -> Result<()> {
    let config = load_config(config_path, strict)?;
    println!("{} Contacting {}...", "→".cyan().bold(), config.api_url);

    let session = open_session(config)?;
    println!(
        "{} Project {} resolved to {}",
        "✓".green().bold(),
        session.config().project.bold(),
        session.project_id().unwrap_or_default()
    );
    Ok(())
}
