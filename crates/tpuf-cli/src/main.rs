#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod commands;
mod config;
mod telemetry;

use std::process;

use anyhow::Context;
use tpuf_vector::TurbopufferStore;

use crate::commands::PrecomputedEmbeddings;
use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "tpuf_cli::startup";
pub const TRACING_TARGET_CONFIG: &str = "tpuf_cli::config";
pub const TRACING_TARGET_COMMAND: &str = "tpuf_cli::command";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_COMMAND,
            "command failed: {error:#}"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing()?;
    cli.log_config();

    cli.turbopuffer
        .validate()
        .context("invalid turbopuffer configuration")?;

    let store = TurbopufferStore::new(PrecomputedEmbeddings::service(), &cli.turbopuffer)
        .context("failed to create turbopuffer store")?;

    cli.command.execute(&store).await
}
