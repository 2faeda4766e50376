//! skiff - a file browser core with a reversible operation engine.
//!
//! Usage:
//!   skiff [PATH]             Print the directory listing
//!   skiff status [PATH]      Print version-control status codes
//!   skiff info PATH          Print a file summary
//!   skiff --help             Show help
//!
//! The interactive shell lives elsewhere; this binary exposes the same
//! core as one-shot, read-only queries.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};

use skiff_core::{SessionConfig, SortMode};
use skiff_session::FileSession;

#[derive(Parser)]
#[command(
    name = "skiff",
    version,
    about = "A file browser core with a reversible operation engine",
    long_about = "skiff lists directories the way its interactive shell renders them:\n\
                  directories first, sorted, hidden files excluded, annotated with\n\
                  version-control status codes."
)]
struct Cli {
    /// Directory to list (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Show hidden files
    #[arg(short = 'H', long)]
    hidden: bool,

    /// Sort order
    #[arg(short, long, default_value = "name")]
    sort: SortArg,

    /// Only show names containing this substring
    #[arg(short, long, default_value = "")]
    filter: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print version-control status codes for a directory
    Status {
        /// Directory to probe
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Print a summary of one file or directory
    Info {
        /// Path to describe
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum SortArg {
    #[default]
    Name,
    Size,
    Modified,
    Type,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortMode::Name,
            SortArg::Size => SortMode::Size,
            SortArg::Modified => SortMode::Modified,
            SortArg::Type => SortMode::Type,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Status { path }) => run_status(&path)?,
        Some(Command::Info { path }) => run_info(&path)?,
        None => run_listing(&cli.path, cli.hidden, cli.sort.into(), &cli.filter)?,
    }

    Ok(())
}

fn open_session(path: &PathBuf) -> Result<FileSession> {
    let start = path
        .canonicalize()
        .wrap_err_with(|| format!("Cannot resolve {}", path.display()))?;
    let config = SessionConfig::new(start);
    FileSession::new(config).wrap_err("Cannot open session")
}

fn run_listing(path: &PathBuf, hidden: bool, sort: SortMode, filter: &str) -> Result<()> {
    let mut session = open_session(path)?;
    if hidden {
        session.toggle_hidden();
    }
    session.set_sort_mode(sort);
    session.set_filter(filter);

    let listing = session.listing().wrap_err("Cannot read directory")?;

    println!("{}", session.current_dir().display());
    for entry in &listing {
        let status = session.status_code(&entry.name).unwrap_or(' ');
        let kind = if entry.is_dir { "d" } else { " " };
        println!(
            "{status} {kind} {:<32} {:>10}  {:<16} {}",
            entry.name,
            entry.size_display(),
            entry.modified_display(),
            entry.permissions,
        );
    }
    println!("{}", session.status_line(&listing));

    Ok(())
}

fn run_status(path: &PathBuf) -> Result<()> {
    let session = open_session(path)?;

    let statuses = session.vcs_status();
    if statuses.is_empty() {
        println!("No version-control status available.");
        return Ok(());
    }

    let mut names: Vec<_> = statuses.keys().collect();
    names.sort();
    for name in names {
        let code = session.status_code(name).unwrap_or(' ');
        println!("{code} {name}");
    }

    Ok(())
}

fn run_info(path: &PathBuf) -> Result<()> {
    let resolved = path
        .canonicalize()
        .wrap_err_with(|| format!("Cannot resolve {}", path.display()))?;
    let parent = resolved
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| resolved.clone());

    let session = open_session(&parent)?;
    let info = session.file_info(&resolved).wrap_err("Cannot stat path")?;
    println!("{info}");

    Ok(())
}
