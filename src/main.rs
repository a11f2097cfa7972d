//! youth-programs CLI
//!
//! Browse Global Flame Youth Community programs and send an inquiry.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use youth_programs::catalog::Catalog;
use youth_programs::delivery::LogSink;
use youth_programs::report::{format_catalog, format_issues, format_program};
use youth_programs::tui::theme::is_known_accent;
use youth_programs::types::{BrowseConfig, OutputFormat, DEFAULT_RESET_DELAY};

#[derive(Parser)]
#[command(name = "youth-programs")]
#[command(about = "Browse youth programs and contact the team")]
#[command(version)]
struct Cli {
    /// Catalog JSON file (default: built-in programs)
    #[arg(long, global = true, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Log file (default: <data dir>/youth-programs/youth-programs.log)
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse programs interactively (default)
    Browse {
        /// How long the confirmation stays up, in milliseconds
        #[arg(long, default_value_t = DEFAULT_RESET_DELAY.as_millis() as u64)]
        reset_delay_ms: u64,

        /// Site root holding assets/images/ (checks icons when given)
        #[arg(long, value_name = "DIR")]
        assets_dir: Option<PathBuf>,
    },

    /// List programs
    List {
        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Show one program's details
    Show {
        /// Program title (case-insensitive) or 1-based number
        program: String,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Check the catalog for missing or inconsistent records
    Validate,

    /// Write the catalog as JSON
    Export {
        /// Destination file (default: stdout)
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_file.as_deref()) {
        eprintln!("Note: logging disabled: {:#}", e);
    }

    let command = cli.command.unwrap_or(Commands::Browse {
        reset_delay_ms: DEFAULT_RESET_DELAY.as_millis() as u64,
        assets_dir: None,
    });

    let result = load_catalog(cli.catalog.as_deref()).and_then(|catalog| match command {
        Commands::Browse {
            reset_delay_ms,
            assets_dir,
        } => cmd_browse(catalog, reset_delay_ms, assets_dir),
        Commands::List { format } => cmd_list(&catalog, format.into()),
        Commands::Show { program, format } => cmd_show(&catalog, &program, format.into()),
        Commands::Validate => cmd_validate(&catalog),
        Commands::Export { output } => cmd_export(&catalog, output.as_deref()),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// SETUP
// ============================================================================

/// Default log location under the platform data directory.
fn default_log_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("youth-programs").join("youth-programs.log"))
}

/// Send tracing events to a file; the terminal belongs to the TUI.
///
/// RUST_LOG controls the filter, e.g. RUST_LOG=debug.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path.map(Path::to_path_buf).or_else(default_log_path) else {
        bail!("no data directory on this platform; pass --log-file");
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false) // No color codes in log file
        .init();

    Ok(())
}

/// Built-in programs, or the catalog file when one is given.
fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => {
            let catalog = Catalog::load(path)?;
            info!(path = %path.display(), programs = catalog.len(), "catalog loaded");
            Ok(catalog)
        }
        None => Ok(Catalog::builtin()),
    }
}

/// Resolve a title (any case) or 1-based number to a program index.
fn resolve_program(catalog: &Catalog, query: &str) -> Option<usize> {
    if let Ok(n) = query.trim().parse::<usize>() {
        return (1..=catalog.len()).contains(&n).then(|| n - 1);
    }
    catalog
        .programs()
        .iter()
        .position(|p| p.title.eq_ignore_ascii_case(query.trim()))
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_browse(catalog: Catalog, reset_delay_ms: u64, assets_dir: Option<PathBuf>) -> Result<()> {
    let config = BrowseConfig {
        reset_delay: Duration::from_millis(reset_delay_ms),
        assets_dir,
    };

    youth_programs::tui::run::run(catalog, config, &LogSink).context("terminal UI failed")
}

fn cmd_list(catalog: &Catalog, format: OutputFormat) -> Result<()> {
    print!("{}", format_catalog(catalog, format)?);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

fn cmd_show(catalog: &Catalog, query: &str, format: OutputFormat) -> Result<()> {
    let Some(index) = resolve_program(catalog, query) else {
        bail!(
            "no program matches '{}' (try `youth-programs list`)",
            query
        );
    };

    print!("{}", format_program(catalog, index, format)?);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

fn cmd_validate(catalog: &Catalog) -> Result<()> {
    let issues = catalog.audit(is_known_accent);
    print!("{}", format_issues(&issues));

    if !issues.is_empty() {
        bail!("catalog has {} issue(s)", issues.len());
    }
    Ok(())
}

fn cmd_export(catalog: &Catalog, output: Option<&Path>) -> Result<()> {
    let json = catalog.to_json()?;

    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", json))
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!("Wrote {} programs to {}", catalog.len(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
