//! Render command implementation.

use color_eyre::eyre::{Result, WrapErr};
use folio_core::config::{ConfigError, ResolvedConfig};
use folio_core::layout::{parse_layout, serialize_layout};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::RenderArgs;

pub fn run(loaded: Result<ResolvedConfig, ConfigError>, args: &RenderArgs) -> Result<ExitCode> {
    let rc = loaded.wrap_err("failed to load config")?;

    let path = resolve_layout_path(&rc, &args.file);
    let json = super::read_file(&path)?;
    let tree = match parse_layout(&json) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("Error: {}: {e}", path.display());
            return Ok(ExitCode::FAILURE);
        }
    };

    if rc.registry.is_empty() {
        tracing::warn!("component registry is empty, every component renders as a placeholder");
    }

    let markup = serialize_layout(&tree, &rc.registry);

    match &args.output {
        Some(out) => {
            fs::write(out, format!("{markup}\n"))
                .wrap_err_with(|| format!("failed to write {}", out.display()))?;
            println!("Wrote {}", out.display());
        }
        None => println!("{markup}"),
    }
    Ok(ExitCode::SUCCESS)
}

/// Relative paths that don't exist from the working directory are looked up
/// in the profile's layout directory.
fn resolve_layout_path(rc: &ResolvedConfig, file: &Path) -> PathBuf {
    if file.is_relative() && !file.exists() {
        let candidate = rc.layout_dir.join(file);
        if candidate.exists() {
            return candidate;
        }
    }
    file.to_path_buf()
}
