//! Edit command implementation.

use color_eyre::eyre::{Result, WrapErr, eyre};
use folio_core::frontmatter::{
    FieldEdit, FieldEditOp, Frontmatter, HeaderFormat, HeaderOutcome, apply_edits,
    read_content, save_with_fence,
};
use serde_yaml::Value;
use std::fs;
use std::process::ExitCode;

use crate::EditArgs;

pub fn run(args: &EditArgs) -> Result<ExitCode> {
    let content = super::read_file(&args.file)?;
    let read = read_content(&content);

    let (mut fm, format) = match &read.outcome {
        HeaderOutcome::Decoded { format, frontmatter } => (frontmatter.clone(), *format),
        HeaderOutcome::Absent => (Frontmatter::new(), HeaderFormat::from(args.format)),
        HeaderOutcome::Degraded { error, .. } => {
            eprintln!(
                "Error: refusing to edit {}: header could not be decoded: {error}",
                args.file.display()
            );
            return Ok(ExitCode::FAILURE);
        }
    };

    let edits = build_edits(args)?;
    if edits.is_empty() {
        eprintln!("nothing to do: pass --set, --remove or --toggle");
        return Ok(ExitCode::from(2));
    }

    if let Err(e) = apply_edits(&mut fm, &edits) {
        eprintln!("Error: {e}");
        return Ok(ExitCode::FAILURE);
    }

    // Keep the fence the document was written with.
    let fence = read.fence().unwrap_or(format.fence());
    let output = save_with_fence(&fm, format, fence, read.body())
        .wrap_err("failed to encode header")?;

    if args.dry_run {
        println!("{output}");
        return Ok(ExitCode::SUCCESS);
    }

    fs::write(&args.file, format!("{output}\n"))
        .wrap_err_with(|| format!("failed to write {}", args.file.display()))?;
    tracing::info!(file = %args.file.display(), edits = edits.len(), %format, "header updated");
    println!("Updated {} ({} edit(s))", args.file.display(), edits.len());
    Ok(ExitCode::SUCCESS)
}

fn build_edits(args: &EditArgs) -> Result<Vec<FieldEdit>> {
    let mut edits = Vec::new();
    for raw in &args.set {
        edits.push(parse_assignment(raw)?);
    }
    for key in &args.toggle {
        edits.push(FieldEdit { field: key.clone(), op: FieldEditOp::Toggle, value: None });
    }
    for key in &args.remove {
        edits.push(FieldEdit::remove(key.clone()));
    }
    Ok(edits)
}

/// Parse `key=value`, reading the value as YAML so `3`, `true` and `[a, b]`
/// keep their types. Unparseable or empty values stay strings.
fn parse_assignment(raw: &str) -> Result<FieldEdit> {
    let (key, value) =
        raw.split_once('=').ok_or_else(|| eyre!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(eyre!("empty field name in '{raw}'"));
    }

    let parsed = match serde_yaml::from_str::<Value>(value) {
        Ok(Value::Null) if value.trim().is_empty() => Value::String(String::new()),
        Ok(v) => v,
        Err(_) => Value::String(value.to_string()),
    };
    Ok(FieldEdit::set(key, parsed))
}
