//! CLI entry point for certvault.
//!
//! Collects credential inputs and operation fields from the command line,
//! hands them to [`certvault_client::VaultClient`] and prints the result.

mod cli;

use anyhow::{Context, Result};
use certvault_client::{ClientConfig, OperationResult, VaultClient, VaultOperation};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(level_for(cli.verbose));

    let mut config = ClientConfig::from_env().context("failed to load configuration")?;
    if let Some(url) = cli.base_url.clone() {
        config = config.with_base_url(url);
    }

    let client = VaultClient::new(config)?;
    debug!(base_url = %client.base_url(), "client ready");

    match cli.command.operation() {
        Some(operation) => {
            let inputs = cli.credentials.to_inputs();
            let result = client.execute(&inputs, &operation).await?;
            let (output, status) = render(&operation, &result);
            if let Some(output) = output {
                println!("{output}");
            }
            eprintln!("{status}");
        }
        None => {
            let health = client.health().await?;
            println!("{}", health.status);
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Turn an operation result into stdout payload and a status line.
fn render(operation: &VaultOperation, result: &OperationResult) -> (Option<String>, String) {
    match (operation, result) {
        (VaultOperation::Put { path, .. }, OperationResult::Stored) => {
            (None, format!("Stored secret at {path}"))
        }
        (VaultOperation::Get { path }, OperationResult::Secret(secret)) => {
            (Some(secret.clone()), format!("Fetched secret at {path}"))
        }
        (VaultOperation::List { .. }, OperationResult::Items(items)) => {
            let output = (!items.is_empty()).then(|| items.join("\n"));
            (output, format!("Found {} secret path(s).", items.len()))
        }
        (VaultOperation::Delete { path }, OperationResult::Deleted) => {
            (None, format!("Deleted secret at {path}"))
        }
        (_, other) => (None, format!("Unexpected result: {other:?}")),
    }
}

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Initialize the tracing subscriber with the given default log level.
///
/// `RUST_LOG` takes precedence when set.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
