//! `qc-client` entry point.

use anyhow::{Context, Result};
use clap::Parser;
use client_runtime::{Cli, Client, ClientConfig};
use qc_telemetry::{init_telemetry, TelemetryConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut telemetry = TelemetryConfig::from_env();
    if cli.global.verbose {
        telemetry = telemetry.verbose();
    }
    let _telemetry = init_telemetry(telemetry).context("Failed to initialize telemetry")?;

    let config = ClientConfig::from(&cli.global);
    tracing::debug!(?config, "[qc-client] Resolved configuration");

    let client = Client::tcp(config);
    let mut stdout = std::io::stdout();
    client.run(&cli.command, &mut stdout).await
}
