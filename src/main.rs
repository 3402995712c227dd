//! h5tui CLI - terminal browser for group/dataset trees

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::process::ExitCode;

fn main() -> ExitCode {
    h5tui::cli::run()
}
