//! Command-line driver for the time registration tool surface.
//!
//! # Responsibility
//! - Load configuration, open the database and invoke one tool per run.
//! - Print JSON so the output can be piped into other tooling.

use clap::{Parser, Subcommand};
use log::info;
use serde_json::Value;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use timereg_core::db::open_db;
use timereg_core::tools::tool_definitions;
use timereg_core::{core_version, init_logging_from_config, invoke, EngineConfig};

#[derive(Parser)]
#[command(name = "timereg", version, about = "Register and query work time")]
struct Cli {
    /// JSON config file; defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// SQLite database path, overriding config and environment.
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the tool catalog as JSON.
    Tools,
    /// Invoke one tool with a JSON object of arguments.
    Call {
        tool: String,
        /// e.g. '{"first_name":"Ada","last_name":"Lovelace"}'
        args: Option<String>,
    },
    /// Print the core library version.
    Version,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    let (tool, args) = match cli.command {
        Command::Version => {
            println!("timereg_core version={}", core_version());
            return Ok(ExitCode::SUCCESS);
        }
        Command::Tools => {
            println!("{}", serde_json::to_string_pretty(tool_definitions())?);
            return Ok(ExitCode::SUCCESS);
        }
        Command::Call { tool, args } => (tool, args),
    };
    let args: Value = match args.as_deref() {
        Some(raw) => serde_json::from_str(raw)?,
        None => Value::Null,
    };

    let mut config = match cli.config.as_deref() {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    config.apply_env_overrides()?;
    if let Some(db) = cli.db {
        config.database.path = db;
    }
    init_logging_from_config(&config.logging)?;

    let conn = open_db(&config.database.path)?;
    info!("event=cli_call module=cli status=start tool={tool}");

    let response = invoke(&conn, &config, &tool, &args);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(if response.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
