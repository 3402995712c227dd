//! Tracing subscriber setup for the `h5tui` binary.
//!
//! # Filter priority (highest to lowest)
//!
//! 1. `H5TUI_LOG` env var (directives, e.g. `h5tui=debug,warn`)
//! 2. `RUST_LOG` env var
//! 3. CLI flags (`-v` gives debug, `-q` gives error)
//! 4. Default level: `warn`
//!
//! Logs go to stderr, or to a file when one is given. The interactive
//! browser owns the screen, so it should always be given a file.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Env var holding filter directives for this crate's binary.
pub const LOG_ENV: &str = "H5TUI_LOG";

/// Verbosity level derived from CLI flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// `--quiet` / `-q`: only errors.
    Quiet,
    /// Default: warnings and above.
    Normal,
    /// `--verbose` / `-v`: debug output.
    Verbose,
}

impl Verbosity {
    /// Determine verbosity from the parsed CLI flags. Verbose wins.
    #[must_use]
    pub const fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    /// Level used when no env var sets a filter.
    #[must_use]
    pub const fn default_level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
        }
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be created or a global
/// subscriber is already installed.
pub fn init(verbosity: Verbosity, log_file: Option<&Path>) -> Result<()> {
    let filter = build_env_filter(verbosity);
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match log_file {
        Some(path) => {
            let file = File::create(path).map_err(|e| Error::io(e, path))?;
            registry
                .with(
                    fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_target(true),
                )
                .try_init()
        }
        None => {
            let use_ansi = std::io::IsTerminal::is_terminal(&std::io::stderr());
            registry
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_ansi(use_ansi)
                        .with_target(true)
                        .without_time()
                        .compact(),
                )
                .try_init()
        }
    };

    installed.map_err(|e| Error::invalid_config(format!("logging already initialised: {e}")))
}

fn build_env_filter(verbosity: Verbosity) -> EnvFilter {
    // Unparseable directives fall through rather than fail.
    if let Ok(directives) = std::env::var(LOG_ENV) {
        if let Ok(filter) = EnvFilter::try_new(&directives) {
            return filter;
        }
    }

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let level = verbosity.default_level();
    let directive = if verbosity == Verbosity::Verbose {
        format!("{level},h5tui=debug")
    } else {
        level.to_string()
    };

    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}
