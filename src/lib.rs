//! deplist - print the dependency names stored in a column of a CSV table.
//!
//! Container builds often keep their package lists in a spreadsheet-style
//! table: one row per package, one column per kind of dependency, with the
//! names in a column separated by `;`. deplist turns one such column into a
//! flat list, one name per line, ready for `xargs` or an install command.
//!
//! # Modules
//!
//! - [`lister`] - reading the table and splitting the column
//! - [`core`] - error types and user-facing error reporting
//! - [`cli`] - command-line parsing and logging setup
//! - [`constants`] - the fixed format constants
//!
//! # Example
//!
//! ```rust,no_run
//! use deplist_cli::lister::list_dependencies;
//!
//! # fn main() -> Result<(), deplist_cli::core::DeplistError> {
//! let printed = list_dependencies("deps.csv", "build dependencies")?;
//! eprintln!("{printed} dependencies");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod constants;
pub mod core;
pub mod lister;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
