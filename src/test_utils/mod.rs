//! Test utilities for deplist
//!
//! Helpers shared by the unit tests inside the crate and the `unit` and
//! `integration` test targets (through the `test-utils` feature):
//!
//! - [`init_test_logging`] - route `tracing` output to the test writer
//! - [`CsvFixture`] - a dependency table written to a temporary directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Once;

use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// The example table used throughout the tests.
///
/// Listing its `build dependencies` column yields `libfoo`, `libbar` and
/// `libbaz`.
pub const SAMPLE_DEPS_CSV: &str = "name,build dependencies\n\
                                   pkg-a,\"libfoo;libbar\"\n\
                                   pkg-b,\"libbaz;;\"\n\
                                   pkg-c,\"\"\n";

/// Initialize logging for tests.
///
/// Respects `RUST_LOG` if set, or uses the provided level. Without either,
/// logging stays off. Safe to call from every test.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// A CSV file in its own temporary directory, removed on drop.
pub struct CsvFixture {
    _dir: TempDir,
    path: PathBuf,
}

impl CsvFixture {
    /// Write `contents` to `deps.csv` in a fresh temporary directory.
    pub fn new(contents: impl AsRef<[u8]>) -> io::Result<Self> {
        Self::named("deps.csv", contents)
    }

    /// Write `contents` to `file_name` in a fresh temporary directory.
    pub fn named(file_name: &str, contents: impl AsRef<[u8]>) -> io::Result<Self> {
        let dir = TempDir::new()?;
        let path = dir.path().join(file_name);
        fs::write(&path, contents)?;
        Ok(Self {
            _dir: dir,
            path,
        })
    }

    /// The [`SAMPLE_DEPS_CSV`] table.
    pub fn sample() -> io::Result<Self> {
        Self::new(SAMPLE_DEPS_CSV)
    }

    /// Path of the CSV file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A path next to the fixture that does not exist.
    pub fn missing_path(&self) -> PathBuf {
        self.path.with_file_name("does-not-exist.csv")
    }
}
