use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use testra::commands::{ping, results, start};
use testra::ResultStatus;

#[derive(Parser)]
#[command(name = "testra")]
#[command(about = "Report test runs to a Testra test-management service", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a testra.toml (default: discovered from the current directory upwards)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Fail on any reporting error instead of logging soft failures
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the service is reachable and the project exists
    Ping,

    /// Create (or adopt) the execution for this run
    Start {
        /// Adopt this execution instead of creating one
        #[arg(short, long)]
        execution_id: Option<String>,

        /// Adopt the execution recorded in an existing exec file
        #[arg(long)]
        reuse: bool,

        /// Do not write the execution id to the exec file
        #[arg(long)]
        no_exec_file: bool,

        /// Free-text description of the execution
        #[arg(short, long)]
        description: Option<String>,

        /// Tag to attach to the execution (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// List results of an execution by status
    Results {
        /// Execution to inspect (default: read from the exec file)
        #[arg(short, long)]
        execution_id: Option<String>,

        /// Result status to filter by
        #[arg(short, long, default_value = "FAILED")]
        status: ResultStatus,

        /// Exit non-zero when any result matches
        #[arg(long)]
        fail_on_match: bool,
    },
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = cli.config.as_deref();
    let strict = cli.strict;
    match cli.command {
        Commands::Ping => ping::execute(config, strict).map(|_| ExitCode::SUCCESS),
        Commands::Start {
            execution_id,
            reuse,
            no_exec_file,
            description,
            tags,
        } => start::execute(start::StartOptions {
            config_path: config,
            strict,
            execution_id,
            reuse_exec_file: reuse,
            write_exec_file: !no_exec_file,
            description,
            tags,
        })
        .map(|_| ExitCode::SUCCESS),
        Commands::Results {
            execution_id,
            status,
            fail_on_match,
        } => results::execute(results::ResultsOptions {
            config_path: config,
            strict,
            execution_id,
            status,
            fail_on_match,
        }),
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
