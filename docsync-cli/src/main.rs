//! docsync CLI - push Swagger documents into Apifox.
//!
//! # Commands
//!
//! - `docsync push --file openapi.json` - Import a Swagger document
//! - `docsync plan --folder a/b` - Show which folders a push would create
//! - `docsync export --file in.json --out openapi/v1` - Check and rewrite a document

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use docsync_apifox::{ApiOverwriteMode, SchemaOverwriteMode};
use std::path::PathBuf;

mod commands;
mod error;
mod logging;
mod settings;

use error::CliResult;
use logging::{LogConfig, LogFormat, LogLevel};

/// docsync - Swagger documents into Apifox
#[derive(Parser)]
#[command(name = "docsync")]
#[command(author = "Pegasus Heavy Industries LLC")]
#[command(version)]
#[command(about = "Push Swagger 2.0 documents into Apifox projects")]
#[command(long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = format!(
    "{}\n  {} docsync plan --folder backend/users\n  {} docsync push --file openapi/v1/openapi.json --folder backend/users\n",
    "Examples:".bright_cyan().bold(),
    "$".dimmed(),
    "$".dimmed(),
))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Log filter directives, overrides RUST_LOG
    #[arg(long, global = true)]
    log_filter: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a Swagger document into an Apifox project
    #[command(alias = "p")]
    Push(PushArgs),

    /// Show the folders a push would create, without creating them
    Plan(PlanArgs),

    /// Check a Swagger document and write it as openapi.json
    Export(ExportArgs),
}

/// Options shared by every command that talks to Apifox.
#[derive(Args, Debug, Clone, Default)]
pub struct SyncArgs {
    /// Settings file (defaults to ./docsync.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Apifox project id
    #[arg(long, env = "APIFOX_PROJECT_ID")]
    pub project: Option<String>,

    /// Apifox access token
    #[arg(long, env = "APIFOX_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Target folder, `/`-separated; missing folders are created
    #[arg(short, long)]
    pub folder: Option<String>,

    /// Apifox API origin
    #[arg(long, env = "APIFOX_BASE_URL")]
    pub base_url: Option<String>,

    /// What to do with an endpoint that already exists
    /// (methodAndPath, both, merge, ignore)
    #[arg(long)]
    pub api_overwrite: Option<ApiOverwriteMode>,

    /// What to do with a data model that already exists
    /// (name, both, merge, ignore)
    #[arg(long)]
    pub schema_overwrite: Option<SchemaOverwriteMode>,

    /// Move endpoints into the folders named by the document
    /// (`--sync-folder=false` turns off a settings file value)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub sync_folder: Option<bool>,

    /// Prefix endpoint paths with the document base path
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub import_base_path: Option<bool>,
}

#[derive(Args)]
struct PushArgs {
    /// Swagger JSON document to import
    #[arg(long, default_value = "openapi/v1/openapi.json")]
    file: PathBuf,

    #[command(flatten)]
    sync: SyncArgs,
}

#[derive(Args)]
struct PlanArgs {
    #[command(flatten)]
    sync: SyncArgs,
}

#[derive(Args)]
struct ExportArgs {
    /// Swagger JSON document to read
    #[arg(long)]
    file: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = docsync_schema::DEFAULT_EXPORT_DIR)]
    out: PathBuf,
}

#[tokio::main]
async fn main() {
    // .env must be loaded before clap reads env-backed flags
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut log = LogConfig::new()
        .level(LogLevel::from_flags(cli.verbose, cli.quiet))
        .format(cli.log_format)
        .with_colors(!cli.no_color);
    if let Some(filter) = &cli.log_filter {
        log = log.with_env_filter(filter);
    }
    let guard = log.init();

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Ignoring unreadable .env"),
    }

    let result: CliResult<()> = match cli.command {
        Commands::Push(args) => commands::push::execute(&args.file, &args.sync, cli.quiet).await,
        Commands::Plan(args) => commands::plan::execute(&args.sync).await,
        Commands::Export(args) => commands::export::execute(&args.file, &args.out, cli.quiet),
    };

    if let Err(e) = result {
        drop(guard);
        eprintln!("\n  {} {}\n", "Error:".red().bold(), e);
        std::process::exit(1);
    };
}
