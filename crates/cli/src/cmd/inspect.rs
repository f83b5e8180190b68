//! Inspect command implementation.

use color_eyre::eyre::Result;
use folio_core::frontmatter::{ContentRead, HeaderOutcome, read_content};
use serde::Serialize;
use std::process::ExitCode;

use crate::InspectArgs;

/// Inspection result for JSON output.
#[derive(Debug, Serialize)]
struct InspectOutput<'a> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a serde_yaml::Mapping>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    body_bytes: usize,
    trace: &'a [String],
}

impl<'a> From<&'a ContentRead> for InspectOutput<'a> {
    fn from(read: &'a ContentRead) -> Self {
        let error = match &read.outcome {
            HeaderOutcome::Degraded { error, .. } => Some(error.as_str()),
            _ => None,
        };
        Self {
            status: read.outcome.status(),
            format: read.format().map(|f| f.as_str()),
            fields: read.frontmatter().map(|fm| &fm.fields),
            error,
            body_bytes: read.body().len(),
            trace: &read.trace,
        }
    }
}

pub fn run(args: &InspectArgs) -> Result<ExitCode> {
    let content = super::read_file(&args.file)?;
    let read = read_content(&content);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&InspectOutput::from(&read))?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("file: {}", args.file.display());
    println!("status: {}", read.outcome.status());
    if let Some(format) = read.format() {
        println!("format: {format}");
    }
    match &read.outcome {
        HeaderOutcome::Decoded { frontmatter, .. } => {
            println!("fields: {}", frontmatter.len());
            for key in frontmatter.keys() {
                println!("  {key}");
            }
        }
        HeaderOutcome::Degraded { error, .. } => println!("error: {error}"),
        HeaderOutcome::Absent => {}
    }
    println!("body: {} bytes", read.body().len());
    for line in &read.trace {
        println!("trace: {line}");
    }
    Ok(ExitCode::SUCCESS)
}
