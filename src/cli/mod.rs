//! Command-line interface for deplist.
//!
//! deplist takes two positional arguments, the dependency table and the
//! column to read, and prints the column's `;`-separated dependency names one
//! per line:
//!
//! ```bash
//! deplist docker-files/dependencies.csv "build dependencies"
//! deplist deps.csv "runtime dependencies" | xargs apt-get install -y
//! ```
//!
//! Standard output carries nothing but dependency names. Logs and error
//! diagnostics go to stderr.
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Log errors only

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::lister;

/// Log level used when neither a flag nor `RUST_LOG` selects one.
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Runtime configuration for CLI execution.
///
/// Built from the parsed flags by [`Cli::build_config`], or constructed
/// directly by tests that want to run a command without going through
/// argument parsing.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive for the tracing subscriber.
    ///
    /// When `None`, the `RUST_LOG` environment variable is used if set and
    /// [`DEFAULT_LOG_LEVEL`] otherwise.
    pub log_level: Option<String>,
}

impl CliConfig {
    /// Create a new CLI configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The filter this configuration selects.
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
        }
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// Only the first call in a process has an effect.
    pub fn init_logging(&self) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(self.env_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Print the dependency names stored in one column of a CSV table.
#[derive(Parser, Debug)]
#[command(
    name = "deplist",
    about = "Print the dependencies listed in a column of a CSV file, one per line",
    version,
    long_about = "Reads a comma-separated dependency table with a header row and prints every \
                  non-empty ';'-separated entry of COLUMN, row by row, one per line."
)]
pub struct Cli {
    /// Path to the dependency CSV file.
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Header name of the column holding `;`-separated dependency names,
    /// e.g. "build dependencies".
    #[arg(value_name = "COLUMN")]
    column: String,

    /// Enable debug logging on stderr.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Execute the CLI with the configuration derived from its flags.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config)
    }

    /// Build a [`CliConfig`] from the parsed CLI arguments.
    ///
    /// `--verbose` selects `debug`, `--quiet` selects `error`; with neither,
    /// the choice is left to `RUST_LOG`.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
        }
    }

    /// Execute the CLI with a specific configuration.
    ///
    /// A closed standard output (the consumer stopped reading) ends the run
    /// successfully; every other failure is returned for display, wrapped
    /// with the column and file that were being listed.
    pub fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match lister::list_dependencies(&self.file, &self.column) {
            Ok(count) => {
                debug!(count, "Listed dependencies");
                Ok(())
            }
            Err(e) if e.is_broken_pipe() => {
                debug!("Output closed before all dependencies were written");
                Ok(())
            }
            Err(e) => Err(e).with_context(|| {
                format!("Failed to list column '{}' of {}", self.column, self.file.display())
            }),
        }
    }
}
