//! Dependency listing from CSV package tables.
//!
//! A dependency table is a comma-separated file with a header row. One of its
//! columns holds, per package, a `;`-separated list of dependency names:
//!
//! ```text
//! name,build dependencies
//! pkg-a,"libfoo;libbar"
//! pkg-b,"libbaz;;"
//! pkg-c,""
//! ```
//!
//! Listing the `build dependencies` column yields `libfoo`, `libbar` and
//! `libbaz`, in that order. Rows are visited in file order and tokens in split
//! order; empty tokens are dropped and nothing is deduplicated or trimmed.
//!
//! # Errors
//!
//! - [`DeplistError::FileAccess`] if the file cannot be opened, before any
//!   dependency is produced
//! - [`DeplistError::MissingColumn`] on the first data row when the header
//!   does not define the column
//! - [`DeplistError::Format`] when the CSV reader rejects a row, or when a
//!   quoted field is still open at the end of the input
//!
//! A table with no data rows lists nothing and succeeds, whatever its header.
//!
//! # Example
//!
//! ```rust,no_run
//! use deplist_cli::lister::DependencyLister;
//!
//! # fn main() -> Result<(), deplist_cli::core::DeplistError> {
//! let lister = DependencyLister::new("build dependencies");
//! for dependency in lister.open("docker-files/deps.csv")? {
//!     println!("{}", dependency?);
//! }
//! # Ok(())
//! # }
//! ```

mod quotes;
mod reader;

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::constants::{DEFAULT_COLUMN, DEPENDENCY_SEPARATOR};
use crate::core::DeplistError;

pub use reader::Dependencies;

/// Split one field value into its non-empty dependency names.
///
/// ```rust
/// use deplist_cli::lister::split_dependencies;
///
/// let names: Vec<&str> = split_dependencies("libbaz;;").collect();
/// assert_eq!(names, ["libbaz"]);
/// ```
pub fn split_dependencies(value: &str) -> impl Iterator<Item = &str> {
    value.split(DEPENDENCY_SEPARATOR).filter(|token| !token.is_empty())
}

/// Lists the dependency names stored in one column of a dependency table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyLister {
    column: String,
}

impl Default for DependencyLister {
    /// A lister for the [`DEFAULT_COLUMN`].
    fn default() -> Self {
        Self::new(DEFAULT_COLUMN)
    }
}

impl DependencyLister {
    /// Create a lister for `column`. The name must match a header exactly.
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }

    /// The column this lister reads.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Open the table at `path` and return its dependencies as a lazy
    /// iterator.
    ///
    /// # Errors
    ///
    /// Returns [`DeplistError::FileAccess`] if `path` cannot be opened for
    /// reading or is a directory.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<Dependencies<File>, DeplistError> {
        let path = path.as_ref();
        let source_name = path.display().to_string();
        debug!(path = %source_name, column = %self.column, "Opening dependency table");

        let file = File::open(path).map_err(|e| DeplistError::file_access(&source_name, &e))?;
        let metadata = file.metadata().map_err(|e| DeplistError::file_access(&source_name, &e))?;
        if metadata.is_dir() {
            return Err(DeplistError::file_access(
                &source_name,
                &io::Error::new(io::ErrorKind::IsADirectory, "is a directory"),
            ));
        }

        Ok(Dependencies::new(file, source_name, self.column.clone()))
    }

    /// Read dependencies from an already open source. `source_name` is used
    /// in error messages.
    pub fn from_reader<R: Read>(&self, reader: R, source_name: impl Into<String>) -> Dependencies<R> {
        Dependencies::new(reader, source_name.into(), self.column.clone())
    }

    /// Stream the dependencies of the table at `path` to `out`, one per line.
    ///
    /// Returns the number of dependencies written. Lines written before an
    /// error are not taken back.
    pub fn write_to<W: Write>(&self, path: impl AsRef<Path>, out: &mut W) -> Result<u64, DeplistError> {
        self.open(path)?.write_to(out)
    }
}

/// Print the dependencies stored in `column` of the table at `path` to
/// standard output, one per line.
///
/// Returns the number of dependencies printed.
pub fn list_dependencies(path: impl AsRef<Path>, column: &str) -> Result<u64, DeplistError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    DependencyLister::new(column).write_to(path, &mut out)
}
