//! deplist CLI entry point
//!
//! Parses the command line, lists the requested dependency column and turns
//! any failure into a colored diagnostic on stderr with exit status 1.

use anyhow::Result;
use clap::Parser;
use deplist_cli::cli;
use deplist_cli::core::user_friendly_error;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
