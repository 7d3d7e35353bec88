//! config-wrangler - print aggregated runtime configuration.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Load the configuration once, or keep reloading it on remote changes.
//! - Print each result to stdout as JSON or YAML.
//!
//! Does NOT handle:
//! - Aggregation rules or the etcd protocol (see `crates/wrangler` and `crates/client`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Logs go to stderr; stdout carries only configuration documents.
//! - A missing required key exits with status 1 after printing a diagnostic.

mod args;
mod error;
mod formatters;

use std::io::Write;
use std::sync::Arc;

use args::Cli;
use clap::Parser;
use config_wrangler::{CancellationToken, ConfigWrangler, LoadError, ProcessEnvironment};
use error::{ExitCode, ExitCodeExt};
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = wrangler_config::load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let code = match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            let code = err.exit_code();
            if code == ExitCode::Interrupted {
                eprintln!("^C\nOperation cancelled by user");
            } else {
                eprintln!("Error: {:#}", err);
            }
            code
        }
    };
    std::process::exit(code.as_i32());
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let descriptor = cli.descriptor()?;
    let environment = ProcessEnvironment::new().with_args(cli.passthrough.clone());

    let cancel = CancellationToken::new();
    let mut builder = ConfigWrangler::builder(descriptor)
        .environment(Arc::new(environment))
        .cancellation(cancel.clone());
    if let Some(policy) = cli.retry_policy() {
        builder = builder.retry_policy(policy);
    }
    let wrangler = builder.build()?;

    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Received interrupt");
            interrupt.cancel();
        }
    });

    let vars = wrangler.load_or_exit().await?;
    print_vars(&vars, cli.format, cli.watch)?;

    if !cli.watch {
        return Ok(ExitCode::Success);
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    let Some(handle) = wrangler.watch(move |result| {
        let _ = tx.send(result);
    }) else {
        info!("No etcd namespace configured, nothing to watch");
        return Ok(ExitCode::Success);
    };

    let mut last_error: Option<LoadError> = None;
    while let Some(result) = rx.recv().await {
        match result {
            Ok(vars) => {
                print_vars(&vars, cli.format, true)?;
                last_error = None;
            }
            Err(err) if err.is_fatal() => err.exit_process(),
            Err(err) if err.is_cancelled() => break,
            Err(err) => {
                error!(error = %err, "Reload failed");
                last_error = Some(err);
            }
        }
    }
    handle.join().await?;

    if cancel.is_cancelled() {
        return Ok(ExitCode::Interrupted);
    }
    match last_error {
        Some(err) => Err(err.into()),
        None => Ok(ExitCode::Success),
    }
}

fn print_vars(
    vars: &config_wrangler::FoundVars,
    format: args::OutputFormat,
    streaming: bool,
) -> anyhow::Result<()> {
    let rendered = formatters::format_vars(vars, format, streaming)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
