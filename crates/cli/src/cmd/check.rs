//! Check command implementation.

use color_eyre::eyre::Result;
use folio_core::layout::check_layout;
use std::process::ExitCode;

use crate::CheckArgs;

pub fn run(args: &CheckArgs) -> Result<ExitCode> {
    let json = super::read_file(&args.file)?;
    let report = check_layout(&json);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let verdict = if report.is_valid { "OK  " } else { "FAIL" };
        println!("{verdict} {}", args.file.display());
        for error in &report.errors {
            println!("  error: {error}");
        }
        for warning in &report.warnings {
            println!("  warning: {warning}");
        }
        println!("{} error(s), {} warning(s)", report.errors.len(), report.warnings.len());
    }

    if args.strict && !report.is_valid {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
