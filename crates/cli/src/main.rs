//! CodeREADr CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration** — credential, endpoint, and timeout from flags
//!    or `CODEREADR_*` environment variables.
//! 2. **Wire observability** — `tracing-subscriber` on stderr, plus an
//!    OpenTelemetry OTLP exporter when one is configured.
//! 3. **Construct infrastructure** — build a [`CodeReadrClient`] over the
//!    reqwest transport.
//! 4. **Perform one call** — encode the section, action, and parameters,
//!    send them, and print the raw XML on success.

mod args;
mod telemetry;

use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use codereadr_client::{ClientConfig, CodeReadrClient};
use codereadr_protocol::{ApiKey, Parameter, Parameters};

use crate::args::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let provider = match telemetry::init(cli.log_format) {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("error: failed to initialise logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let result = run(cli).await;
    telemetry::shutdown(provider);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let api_key = ApiKey::new(cli.api_key).context("API key must not be empty")?;
    let config = ClientConfig::new(api_key)
        .with_endpoint(cli.endpoint)
        .with_timeout(Duration::from_secs(cli.timeout_secs));
    let client = CodeReadrClient::new(config)?;

    let parameters = build_parameters(cli.params, cli.files).await?;
    tracing::info!(
        section = %cli.section,
        action = %cli.action,
        parameters = parameters.len(),
        "calling API"
    );

    let raw = client
        .call_raw(cli.section, cli.action, &parameters)
        .await?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&raw)?;
    writeln!(stdout)?;
    Ok(())
}

async fn build_parameters(
    scalars: Vec<(String, String)>,
    files: Vec<(String, std::path::PathBuf)>,
) -> anyhow::Result<Parameters> {
    let mut parameters: Parameters = scalars
        .into_iter()
        .map(|(name, value)| (name, Parameter::Scalar(value)))
        .collect();

    for (name, path) in files {
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read '{}'", path.display()))?;
        parameters.insert(name.clone(), Parameter::file_payload(name, content));
    }

    Ok(parameters)
}
