//! `problem` - build and convert RFC 7807 problem details documents.

mod commands;
mod config;

use clap::Parser;
use tracing::debug;

use crate::config::CliConfig;

/// Installs the tracing subscriber. Logs go to standard error so that
/// documents written to standard output stay clean.
fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "helios_problem={level},helios_problem_cli={level}",
            level = level
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    debug!(command = ?config.command, "Running command");
    let output = commands::run(&config.command)?;
    println!("{}", output);
    Ok(())
}
