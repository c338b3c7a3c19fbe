//! docmap table tool
//!
//! Loads a table config file (schema plus enabled write extensions) into an
//! in-memory table and either describes it or replays a JSON script of
//! put/update/get/delete operations against it.
//!
//! Usage:
//!   docmap --config table.toml describe
//!   docmap --config table.toml run script.json

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docmap_cli::{Operation, describe, run_script};
use docmap_store::MemoryTable;
use std::{fs, path::PathBuf};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "docmap")]
#[command(about = "Inspect docmap table configs and replay write scripts")]
struct Args {
    /// Path to the table config file
    #[arg(short, long, default_value = "table.toml")]
    config: PathBuf,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the table's keys, counter bindings and extensions
    Describe,
    /// Replay a JSON array of operations and print each result
    Run {
        /// Path to the script file
        script: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let table = MemoryTable::from_config_file(&args.config)
        .with_context(|| format!("failed to load table config {}", args.config.display()))?;

    match args.command {
        Command::Describe => {
            println!("{}", serde_json::to_string_pretty(&describe(&table))?);
        }
        Command::Run { script } => {
            let contents = fs::read_to_string(&script)
                .with_context(|| format!("failed to read script {}", script.display()))?;
            let operations: Vec<Operation> = serde_json::from_str(&contents)
                .with_context(|| format!("invalid script {}", script.display()))?;
            info!(operations = operations.len(), "Running script");

            let outcomes = run_script(&table, operations)?;
            println!("{}", serde_json::to_string_pretty(&outcomes)?);
        }
    }

    Ok(())
}
