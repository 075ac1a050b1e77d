//! Command-line interface for repolens.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::ProgressBar;

use crate::config::EngineConfig;
use crate::engine::{Engine, EngineError};
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_USAGE: i32 = 2;

/// Repository intelligence engine - build and inspect structured code
/// profiles of cloned repositories.
///
/// Repolens walks a repository tree, classifies every file by language
/// and purpose, extracts functions, classes and imports with lightweight
/// lexical rules, and persists an aggregated profile (main language,
/// architecture pattern, module layout) for documentation pipelines.
#[derive(Parser)]
#[command(name = "repolens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a repository and persist its profile
    Scan(ScanArgs),
    /// Print a stored analysis
    Show(ShowArgs),
    /// List repositories with stored analyses
    List(ListArgs),
}

/// Arguments for the scan command.
#[derive(Parser)]
pub struct ScanArgs {
    /// Path to the repository to analyze
    pub path: PathBuf,

    /// Rescan even when the stored analysis is still fresh
    #[arg(short, long)]
    pub force: bool,

    /// Output format: pretty or json
    #[arg(long, default_value = "pretty")]
    pub format: String,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the show command.
#[derive(Parser)]
pub struct ShowArgs {
    /// Repository id (the repository directory name)
    pub id: String,

    /// Output format: pretty or json
    #[arg(long, default_value = "pretty")]
    pub format: String,

    /// Include language and purpose breakdowns
    #[arg(long)]
    pub stats: bool,

    /// Include guessed API endpoints
    #[arg(long)]
    pub endpoints: bool,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the list command.
#[derive(Parser)]
pub struct ListArgs {
    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Run the scan command.
pub fn run_scan(args: &ScanArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_USAGE);
    }

    let config = EngineConfig::load(args.config.as_deref())?;
    let engine = Engine::new(config)?;

    // Spinner only for terminal output; JSON stays clean for pipelines.
    let spinner = if args.format == "pretty" {
        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_message(format!("scanning {}", args.path.display()));
        Some(bar)
    } else {
        None
    };

    let result = engine.scan_path(&args.path, args.force);

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    match result {
        Ok(analysis) => {
            match args.format.as_str() {
                "json" => report::write_json(&analysis, false, false)?,
                _ => report::write_pretty(&analysis, false, false),
            }
            Ok(EXIT_SUCCESS)
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            Ok(EXIT_ERROR)
        }
    }
}

/// Run the show command.
pub fn run_show(args: &ShowArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_USAGE);
    }

    let config = EngineConfig::load(args.config.as_deref())?;
    let engine = Engine::new(config)?;

    match engine.load(&args.id) {
        Ok(analysis) => {
            match args.format.as_str() {
                "json" => report::write_json(&analysis, args.stats, args.endpoints)?,
                _ => report::write_pretty(&analysis, args.stats, args.endpoints),
            }
            Ok(EXIT_SUCCESS)
        }
        Err(err @ EngineError::AnalysisNotFound(_)) => {
            eprintln!("Error: {}", err);
            eprintln!("Run 'repolens scan <path>' to analyze the repository first");
            Ok(EXIT_ERROR)
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            Ok(EXIT_ERROR)
        }
    }
}

/// Run the list command.
pub fn run_list(args: &ListArgs) -> anyhow::Result<i32> {
    let config = EngineConfig::load(args.config.as_deref())?;
    let engine = Engine::new(config)?;
    let ids = engine.list()?;
    report::write_list(&ids);
    Ok(EXIT_SUCCESS)
}
