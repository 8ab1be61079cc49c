//! Command line configuration for the `problem` tool.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PROBLEM_LOG_LEVEL` | warn | Log level |
//! | `PROBLEM_INDENT` | (compact) | Spaces per nesting level in output |

use clap::{Args, Parser, Subcommand};
use helios_problem::ProblemFormat;
use serde_json::Value;
use std::path::PathBuf;

/// Largest indentation accepted for output documents.
pub const MAX_INDENT: usize = 16;

/// Configuration for the `problem` tool.
#[derive(Debug, Clone, Parser)]
#[command(name = "problem")]
#[command(about = "Build and convert RFC 7807 problem details documents")]
#[command(version)]
pub struct CliConfig {
    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true, env = "PROBLEM_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Convert a problem document between JSON and XML.
    Convert(ConvertArgs),
    /// Build a problem document from its members.
    New(NewArgs),
    /// Print the media type for a format.
    MediaType {
        /// Format key (json or xml).
        format: ProblemFormat,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ConvertArgs {
    /// Input format. Detected from the file extension or content when omitted.
    #[arg(long)]
    pub from: Option<ProblemFormat>,

    /// Output format. Defaults to the other format.
    #[arg(long)]
    pub to: Option<ProblemFormat>,

    /// Spaces per nesting level in the output.
    #[arg(long, env = "PROBLEM_INDENT")]
    pub indent: Option<usize>,

    /// Input file. Reads standard input when omitted.
    pub input: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct NewArgs {
    /// Status code or symbolic name (e.g. 404 or not_found).
    #[arg(long)]
    pub status: Option<String>,

    /// Problem type URI.
    #[arg(long = "type")]
    pub type_url: Option<String>,

    /// Short summary. Derived from the status when omitted.
    #[arg(long)]
    pub title: Option<String>,

    /// Explanation specific to this occurrence.
    #[arg(long)]
    pub detail: Option<String>,

    /// URI identifying this occurrence.
    #[arg(long)]
    pub instance: Option<String>,

    /// Extension member as key=value. Values are parsed as JSON when possible.
    #[arg(long = "ext", value_parser = parse_extension)]
    pub extensions: Vec<(String, Value)>,

    /// Output format.
    #[arg(long, default_value = "json")]
    pub format: ProblemFormat,

    /// Spaces per nesting level in the output.
    #[arg(long, env = "PROBLEM_INDENT")]
    pub indent: Option<usize>,
}

impl CliConfig {
    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let indent = match &self.command {
            Command::Convert(args) => args.indent,
            Command::New(args) => args.indent,
            Command::MediaType { .. } => None,
        };
        if indent.is_some_and(|n| n > MAX_INDENT) {
            errors.push(format!("Indent cannot exceed {} spaces", MAX_INDENT));
        }

        if let Command::New(args) = &self.command {
            if args.extensions.iter().any(|(key, _)| key.is_empty()) {
                errors.push("Extension names cannot be empty".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Parses `key=value`, reading the value as JSON and falling back to a string.
pub fn parse_extension(s: &str) -> Result<(String, Value), String> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid extension '{}', expected key=value", s))?;
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.trim().to_string(), value))
}
