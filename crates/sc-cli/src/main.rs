mod cli;
mod report;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use sc_compressor::{GovernorConfig, ResourceGovernor, ScError, SemanticCompressor};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};
use report::{AnalyzeReport, CompressReport, ErrorReport};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error in semantic compression: {e:#}");
            eprintln!("{}", serde_json::to_string(&ErrorReport::new(&e)).unwrap_or_default());
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; stdout carries only the JSON report.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "semantic_compressor=debug,sc_compressor=debug"
    } else {
        "semantic_compressor=info,sc_compressor=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let governor = ResourceGovernor::new(GovernorConfig::default());
    governor.apply_limits();

    println!("{}", execute(cli, &governor)?);
    Ok(())
}

/// Runs the selected action under `governor` and returns the JSON report.
fn execute(cli: &Cli, governor: &ResourceGovernor) -> anyhow::Result<String> {
    let compressor = SemanticCompressor::new(cli.engine_config())?;
    let max_time = compressor.config().max_time();
    info!(
        "Starting semantic compression with {}s timeout",
        governor.effective_timeout(max_time).as_secs()
    );

    let content = read_input(cli.input_file.as_deref())?;
    if content.trim().is_empty() {
        error!("No input content provided");
        return Err(ScError::EmptyInput.into());
    }

    match cli.command {
        Commands::Analyze => {
            governor.check_memory(&content)?;
            let analysis = governor.run(max_time, |_| Ok(compressor.analyze(&content)))?;
            to_json(&AnalyzeReport::from(&analysis))
        }
        Commands::Compress => {
            let result = compressor.compress_governed(&content, governor)?;
            if let Some(path) = &cli.output_file {
                write_output(path, &result.output)?;
            }
            to_json(&CompressReport::new(&result, compressor.config().preservation_threshold))
        }
    }
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display())),
        None => std::io::read_to_string(std::io::stdin()).context("reading stdin"),
    }
}

fn write_output(path: &Path, text: &str) -> anyhow::Result<()> {
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
