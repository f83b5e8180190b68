//! Split command implementation.

use color_eyre::eyre::Result;
use folio_core::frontmatter::split;
use std::process::ExitCode;

use crate::SplitArgs;

pub fn run(args: &SplitArgs) -> Result<ExitCode> {
    let content = super::read_file(&args.file)?;
    let doc = split(&content);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(ExitCode::SUCCESS);
    }

    if doc.has_header() {
        println!("== header ({} bytes)", doc.header.len());
        print!("{}", doc.header);
    } else {
        println!("== header (none)");
    }
    println!("== body ({} bytes)", doc.body.len());
    print!("{}", doc.body);
    if !doc.body.is_empty() && !doc.body.ends_with('\n') {
        println!();
    }
    Ok(ExitCode::SUCCESS)
}
