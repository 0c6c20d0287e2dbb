//! sundry
//!
//! Command-line entry point for the sundry tools.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod cli;
mod commands;
mod config_handlers;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use sundry_core::SundryConfig;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::commands::Outcome;
use crate::commands::serve::ServeFlags;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<Outcome> {
    let config_path = cli.config.as_deref();
    let command = match cli.command {
        Command::Config { action } => {
            config_handlers::handle_config_command(config_path, action)?;
            return Ok(Outcome::Ok);
        }
        command => command,
    };

    let config = SundryConfig::load(config_path)?;
    tracing::debug!(?config, "Configuration loaded");
    match command {
        Command::Icons { out, sizes } => commands::icons::run(&config, out, sizes)?,
        Command::Catalog { action } => return commands::catalog::run(&config, action),
        Command::Portal { action } => commands::portal::run(&config, action)?,
        Command::Chart {
            out,
            total,
            summary_only,
        } => commands::chart::run(&config, out, total, summary_only)?,
        Command::Serve {
            root,
            port,
            https,
            cert,
            key,
        } => {
            let flags = ServeFlags {
                root,
                port,
                https,
                cert,
                key,
            };
            commands::serve::run(&config, flags).await?
        }
        Command::Config { .. } => {}
    }
    Ok(Outcome::Ok)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(Outcome::Ok) => ExitCode::SUCCESS,
        Ok(Outcome::Problems) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
