//! Scan command implementation.

use color_eyre::eyre::{Result, WrapErr};
use folio_core::config::{ConfigError, ResolvedConfig};
use folio_core::frontmatter::{HeaderOutcome, read_content};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tabled::{Table, Tabled, settings::Style};
use walkdir::{DirEntry, WalkDir};

use crate::ScanArgs;

const DOCUMENT_EXTENSIONS: [&str; 4] = ["md", "mdx", "markdown", "astro"];

#[derive(Tabled)]
struct ScanRow {
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Format")]
    format: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Fields")]
    fields: String,
}

pub fn run(loaded: Result<ResolvedConfig, ConfigError>, args: &ScanArgs) -> Result<ExitCode> {
    let (root, excluded) = match &args.dir {
        Some(dir) => (dir.clone(), Vec::new()),
        None => {
            let rc = loaded.wrap_err("failed to load config")?;
            (rc.content_root, rc.excluded_folders)
        }
    };

    if !root.is_dir() {
        eprintln!("Error: directory not found: {}", root.display());
        return Ok(ExitCode::FAILURE);
    }

    let files = collect_documents(&root, &excluded)?;
    let mut rows = Vec::new();
    let mut with_header = 0;
    let mut degraded = 0;

    for path in &files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "skipping unreadable file");
                continue;
            }
        };
        let read = read_content(&content);
        let fields = match &read.outcome {
            HeaderOutcome::Decoded { frontmatter, .. } => frontmatter.len().to_string(),
            _ => "-".to_string(),
        };
        if read.document.has_header() {
            with_header += 1;
        }
        if read.is_degraded() {
            degraded += 1;
        } else if args.degraded_only {
            continue;
        }

        rows.push(ScanRow {
            path: path.strip_prefix(&root).unwrap_or(path).display().to_string(),
            format: read.format().map_or("-", |f| f.as_str()).to_string(),
            status: read.outcome.status().to_string(),
            fields,
        });
    }

    if rows.is_empty() {
        println!("(no documents found)");
    } else {
        let table = Table::new(&rows).with(Style::rounded()).to_string();
        println!("{table}");
    }
    println!(
        "\n{} document(s), {} with header, {} degraded",
        files.len(),
        with_header,
        degraded
    );
    Ok(ExitCode::SUCCESS)
}

fn collect_documents(root: &Path, excluded: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !(is_hidden(e) || is_excluded(e, excluded)))
    {
        let entry = entry.wrap_err_with(|| format!("failed to walk {}", root.display()))?;
        if entry.file_type().is_file() && is_document(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
}

fn is_excluded(entry: &DirEntry, excluded: &[PathBuf]) -> bool {
    excluded.iter().any(|dir| entry.path().starts_with(dir))
}

fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}
