//! Format constants shared by the lister and the CLI.
//!
//! The dependency tables consumed by deplist are plain comma-separated files
//! with double-quote quoting. These values are fixed; nothing in the CLI
//! exposes them as options.

/// Column read when a caller does not name one explicitly.
///
/// The command-line entry point always passes a column, so this only applies
/// to library callers using [`DependencyLister::default`].
///
/// [`DependencyLister::default`]: crate::lister::DependencyLister
pub const DEFAULT_COLUMN: &str = "build dependencies";

/// Separator between dependency names inside a single field.
pub const DEPENDENCY_SEPARATOR: char = ';';

/// Field delimiter of the dependency table.
pub const FIELD_DELIMITER: u8 = b',';

/// Quote character of the dependency table.
pub const QUOTE_CHAR: u8 = b'"';
