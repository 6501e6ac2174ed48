//! Command line interface for the update bundler.
//!
//! This module provides the CLI shell around [`Pipeline`]: argument parsing,
//! logging setup, and result or error reporting.

mod args;
mod output;

pub use args::Args;
pub use output::OutputManager;

use crate::bundler::{Pipeline, ProcessExecutor};
use crate::error::Result;

/// Main CLI entry point
///
/// Returns the process exit code: 0 when the bundle exists at the reported
/// path, 1 otherwise.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    init_logging(args.verbose);

    let output = OutputManager::new(args.verbose, args.json);
    match execute(&args, &output).await {
        Ok(()) => Ok(0),
        Err(e) => {
            output.error(&e.to_string(), &e.recovery_suggestions())?;
            Ok(1)
        }
    }
}

async fn execute(args: &Args, output: &OutputManager) -> Result<()> {
    args.validate()?;
    let options = args.to_options()?;
    output.verbose(&format!("Options: {:?}", options))?;

    let mut executor = ProcessExecutor::new();
    if let Some(timeout) = args.timeout() {
        executor = executor.with_timeout(timeout);
        output.verbose(&format!("Tool timeout: {}s", timeout.as_secs()))?;
    }
    // Tool output would corrupt the JSON document on stdout.
    if args.json {
        executor = executor.quiet();
    }

    let pipeline = Pipeline::new(executor)
        .with_reporter(output.clone())
        .with_preflight(true);
    let result = pipeline.run(&options).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        output.summary(&result)?;
    }
    Ok(())
}

/// Initializes `env_logger`; `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
