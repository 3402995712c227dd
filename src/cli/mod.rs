//! h5tui CLI - browse HDF5-style group/dataset trees in the terminal.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::config::BrowserConfig;
use crate::logging::{self, Verbosity};

mod basic;
mod view;

/// h5tui - terminal browser for group/dataset trees
#[derive(Parser)]
#[command(name = "h5tui")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only show errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Restore the highlight of every ancestor when moving up, not just the
    /// last one
    #[arg(long, global = true)]
    remember_all_levels: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse a file interactively
    View {
        /// Path to an HDF5 file or JSON tree
        file: PathBuf,
        /// Lines scrolled by PgUp/PgDn
        #[arg(long, default_value = "20")]
        page_size: usize,
    },
    /// List the children of a group
    Ls {
        /// Path to an HDF5 file or JSON tree
        file: PathBuf,
        /// Group to list
        #[arg(default_value = "/")]
        group: String,
    },
    /// Print a dataset
    Show {
        /// Path to an HDF5 file or JSON tree
        file: PathBuf,
        /// Dataset to print, e.g. /group/data
        dataset: String,
        /// Print every element instead of summarizing long arrays
        #[arg(long)]
        full: bool,
        /// Keep small floats in fixed notation
        #[arg(long)]
        suppress: bool,
    },
}

/// Main CLI entry point
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let verbosity = Verbosity::from_flags(cli.verbose, cli.quiet);

    // The browser owns the screen: without a log file it runs unlogged.
    let interactive = matches!(cli.command, Commands::View { .. });
    if !interactive || cli.log_file.is_some() {
        if let Err(e) = logging::init(verbosity, cli.log_file.as_deref()) {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    }

    let result = match cli.command {
        Commands::View { file, page_size } => {
            let config = BrowserConfig::default()
                .with_remember_all_levels(cli.remember_all_levels)
                .with_content_page_size(page_size);
            view::cmd_view(&file, config)
        }
        Commands::Ls { file, group } => basic::cmd_ls(&file, &group),
        Commands::Show {
            file,
            dataset,
            full,
            suppress,
        } => basic::cmd_show(&file, &dataset, full, suppress),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
