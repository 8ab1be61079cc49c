//! Command implementations.

use anyhow::Context;
use helios_problem::{Payload, ProblemFields, ProblemFormat, decode, encode};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::config::{Command, ConvertArgs, NewArgs};

/// Runs a command and returns the text to print.
pub fn run(command: &Command) -> anyhow::Result<String> {
    match command {
        Command::Convert(args) => convert(args),
        Command::New(args) => new_problem(args),
        Command::MediaType { format } => Ok(format.media_type().to_string()),
    }
}

fn convert(args: &ConvertArgs) -> anyhow::Result<String> {
    let content = read_input(args.input.as_deref())?;
    let from = args
        .from
        .unwrap_or_else(|| detect_format(args.input.as_deref(), &content));
    let to = args.to.unwrap_or(match from {
        ProblemFormat::Json => ProblemFormat::Xml,
        ProblemFormat::Xml => ProblemFormat::Json,
    });
    info!(%from, %to, "Converting problem document");

    let payload = decode(from, &content)
        .with_context(|| format!("Failed to decode {} problem document", from))?;
    Ok(encode(&payload, to, args.indent)?)
}

fn new_problem(args: &NewArgs) -> anyhow::Result<String> {
    let payload = build_payload(args)?;
    Ok(encode(&payload, args.format, args.indent)?)
}

/// Builds a payload from the `new` command arguments.
pub fn build_payload(args: &NewArgs) -> anyhow::Result<Payload> {
    let mut fields = ProblemFields::new();
    fields.type_url = args.type_url.clone();
    fields.title = args.title.clone();
    fields.status = args.status.clone().map(Into::into);
    fields.detail = args.detail.clone();
    fields.instance = args.instance.clone();
    for (name, value) in &args.extensions {
        fields.extensions.insert(name.clone(), value.clone());
    }

    let payload = Payload::new(fields).context("Failed to build problem document")?;
    debug!(status = ?payload.status(), extensions = payload.extensions().len(), "Built problem document");
    Ok(payload)
}

/// Picks the input format from the file extension, then from the first
/// non-whitespace character (`<` means XML).
pub fn detect_format(path: Option<&Path>, content: &str) -> ProblemFormat {
    let by_extension = path
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .and_then(|e| e.parse::<ProblemFormat>().ok());
    if let Some(format) = by_extension {
        return format;
    }

    if content.trim_start().starts_with('<') {
        ProblemFormat::Xml
    } else {
        ProblemFormat::Json
    }
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read standard input")?;
            Ok(content)
        }
    }
}
