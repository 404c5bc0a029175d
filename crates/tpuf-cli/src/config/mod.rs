//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── turbopuffer: TurbopufferConfig  # API key, namespace, endpoint
//! └── command: Command                # upload | query | search
//! ```
//!
//! All turbopuffer settings can be provided via CLI arguments or environment
//! variables. Use `--help` to see all available options.

use std::process;

use clap::Parser;
use tpuf_vector::TurbopufferConfig;

use crate::commands::Command;
use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Parser)]
#[command(name = "tpuf")]
#[command(about = "Upload to and query turbopuffer namespaces")]
#[command(version)]
pub struct Cli {
    /// Turbopuffer connection configuration.
    #[clap(flatten)]
    pub turbopuffer: TurbopufferConfig,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Logs build information and configuration (no secrets).
    pub fn log_config(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            namespace = %self.turbopuffer.namespace(),
            base_url = ?self.turbopuffer.base_url.as_ref().map(|url| url.as_str()),
            timeout_secs = ?self.turbopuffer.timeout_secs,
            api_key_configured = self.turbopuffer.api_key.is_some(),
            command = self.command.name(),
            "Turbopuffer configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from([
            "tpuf",
            "--turbopuffer-api-key",
            "key",
            "--turbopuffer-namespace",
            "docs",
            "search",
            "--vector",
            "0.5,-0.25",
            "-k",
            "3",
        ])
        .unwrap();

        assert_eq!(cli.turbopuffer.namespace(), "docs");
        assert_eq!(cli.command.name(), "search");
    }
}
