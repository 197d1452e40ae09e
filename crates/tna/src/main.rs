// SPDX-FileCopyrightText: 2026 TNA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! TNA - a personal agent that drives an Android phone from Termux.
//!
//! This is the binary entry point. It exposes the tool layer directly:
//! listing the function declarations offered to the model, running a single
//! tool invocation, and checking the host environment.

mod doctor;
mod runtime;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tna_config::TnaConfig;
use tna_skill::ToolStatus;
use tracing::error;

/// TNA - a personal agent that drives an Android phone from Termux.
#[derive(Parser, Debug)]
#[command(name = "tna", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the default hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the function declarations offered to the model as JSON.
    Tools,
    /// Run one tool call and print its result as JSON.
    Invoke {
        /// Tool name, e.g. `execute_shell`.
        tool: String,
        /// Arguments as a JSON object. Defaults to `{}`.
        arguments: Option<String>,
    },
    /// Check host utilities, credentials, and storage locations.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => tna_config::load_and_validate_path(path),
        None => tna_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            tna_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);
    tracing::debug!(agent = %config.agent.name, "config loaded");

    let code = match cli.command {
        Commands::Tools => list_tools(&config),
        Commands::Invoke { tool, arguments } => invoke(&config, &tool, arguments.as_deref()).await,
        Commands::Doctor { plain } => {
            if doctor::run_doctor(&config, plain).await > 0 {
                1
            } else {
                0
            }
        }
    };
    std::process::exit(code);
}

fn list_tools(config: &TnaConfig) -> i32 {
    let registry = match runtime::build_registry(config) {
        Ok(registry) => registry,
        Err(e) => return fatal(&e),
    };
    print_json(&serde_json::Value::from(registry.function_declarations()))
}

async fn invoke(config: &TnaConfig, tool: &str, raw_arguments: Option<&str>) -> i32 {
    // The primary model must be usable before any tool runs.
    if let Err(e) = tna_gemini::connect_primary(&config.gemini) {
        return fatal(&e);
    }
    let registry = match runtime::build_registry(config) {
        Ok(registry) => registry,
        Err(e) => return fatal(&e),
    };
    let arguments = match runtime::parse_arguments(tool, raw_arguments) {
        Ok(arguments) => arguments,
        Err(e) => return fatal(&e),
    };

    let result = runtime::invoke(&registry, tool, arguments).await;
    let code = print_json(&result);
    match (code, result.status) {
        (0, ToolStatus::FailedSoftly) => 2,
        (code, _) => code,
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            0
        }
        Err(e) => {
            eprintln!("tna: failed to encode output: {e}");
            1
        }
    }
}

fn fatal(err: &tna_core::TnaError) -> i32 {
    error!(error = %err, "startup failed");
    eprintln!("tna: {err}");
    1
}

/// Initializes the tracing subscriber with the given log level.
///
/// Logs go to stderr so stdout carries only JSON.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "tna={log_level},tna_skill={log_level},tna_gemini={log_level},tna_memory={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
