mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand, ValueEnum};
use folio_core::config::{ConfigLoader, LoggingConfig};
use folio_core::frontmatter::HeaderFormat;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "Round-trip page documents and layouts")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved settings
    Doctor,

    /// Split a document into its raw header and body
    Split(SplitArgs),

    /// Detect and decode a document's header, printing the diagnostic trace
    Inspect(InspectArgs),

    /// Edit header fields of a document in place
    Edit(EditArgs),

    /// Serialize a layout JSON file to markup
    Render(RenderArgs),

    /// Lint a layout JSON file
    Check(CheckArgs),

    /// Report header status for every document under a directory
    Scan(ScanArgs),
}

#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Document to split
    pub file: PathBuf,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Document to inspect
    pub file: PathBuf,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Document to edit
    pub file: PathBuf,

    /// Set a field: key=value (value parsed as YAML, e.g. 3, true, [a, b])
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Remove a field
    #[arg(long = "remove", value_name = "KEY")]
    pub remove: Vec<String>,

    /// Toggle a boolean field
    #[arg(long = "toggle", value_name = "KEY")]
    pub toggle: Vec<String>,

    /// Header format used when the document has no header yet
    #[arg(long, value_enum, default_value = "yaml")]
    pub format: FormatArg,

    /// Print the result instead of writing the file
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Yaml,
    Toml,
    Json,
}

impl From<FormatArg> for HeaderFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Yaml => HeaderFormat::Yaml,
            FormatArg::Toml => HeaderFormat::Toml,
            FormatArg::Json => HeaderFormat::Json,
        }
    }
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Layout JSON file
    pub file: PathBuf,

    /// Write markup to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Layout JSON file
    pub file: PathBuf,

    /// Exit with status 1 when the layout has errors
    #[arg(long)]
    pub strict: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Directory to scan (defaults to the profile's content_root)
    pub dir: Option<PathBuf>,

    /// Only list documents whose header could not be decoded
    #[arg(long)]
    pub degraded_only: bool,
}

fn main() -> ExitCode {
    if let Err(e) = color_eyre::install() {
        eprintln!("failed to install error reporter: {e}");
    }

    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let profile = cli.profile.as_deref();

    let loaded = ConfigLoader::load_or_default(config, profile);
    match &loaded {
        Ok(rc) => logging::init(&rc.logging),
        Err(_) => logging::init(&LoggingConfig::default()),
    }

    let result = match cli.command {
        Commands::Doctor => cmd::doctor::run(config, profile),
        Commands::Split(args) => cmd::split::run(&args),
        Commands::Inspect(args) => cmd::inspect::run(&args),
        Commands::Edit(args) => cmd::edit::run(&args),
        Commands::Render(args) => cmd::render::run(loaded, &args),
        Commands::Check(args) => cmd::check::run(&args),
        Commands::Scan(args) => cmd::scan::run(loaded, &args),
    };

    let code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    };

    logging::shutdown();
    code
}
