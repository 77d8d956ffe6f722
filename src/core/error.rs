//! Error handling for deplist
//!
//! This module provides the error types and user-facing error reporting for
//! deplist. The error system follows two principles:
//! 1. **Strongly-typed errors** so library callers can match on the failure
//! 2. **User-friendly messages** with an actionable suggestion for CLI users
//!
//! # Architecture
//!
//! - [`DeplistError`] - one variant per way a run can fail
//! - [`ErrorContext`] - wrapper that adds details and a suggestion for display
//!
//! # Error Categories
//!
//! - **File access**: [`DeplistError::FileAccess`] when the dependency file
//!   cannot be opened
//! - **Missing column**: [`DeplistError::MissingColumn`] when a row has no
//!   value for the requested column
//! - **Format**: [`DeplistError::Format`] when the CSV reader rejects the input
//! - **Output**: [`DeplistError::Output`] when standard output cannot be written
//!
//! Use [`user_friendly_error`] to turn any [`anyhow::Error`] into an
//! [`ErrorContext`] ready for display.
//!
//! # Examples
//!
//! ```rust,no_run
//! use deplist_cli::core::{DeplistError, user_friendly_error};
//!
//! let error = DeplistError::MissingColumn {
//!     source_name: "deps.csv".to_string(),
//!     column: "build dependencies".to_string(),
//!     line: 2,
//!     headers: vec!["name".to_string(), "runtime dependencies".to_string()],
//! };
//!
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // colored error, details and suggestion on stderr
//! ```

use colored::Colorize;
use std::fmt;
use std::io;
use thiserror::Error;

/// Errors produced while listing dependencies.
///
/// Variants carry plain strings rather than the underlying error values so the
/// type stays [`Clone`]; the original message is kept in `reason`.
#[derive(Error, Debug, Clone)]
pub enum DeplistError {
    /// The dependency file could not be opened for reading.
    #[error("Cannot open dependency file '{path}': {reason}")]
    FileAccess {
        /// Path as given by the caller
        path: String,
        /// Message from the operating system
        reason: String,
        /// Kind of the underlying I/O failure
        kind: io::ErrorKind,
    },

    /// A data row has no value for the requested column.
    #[error("Column '{column}' not found in {source_name} (line {line})")]
    MissingColumn {
        /// File path or reader name the row came from
        source_name: String,
        /// Column that was requested
        column: String,
        /// 1-based line of the offending row
        line: u64,
        /// Header names the file does define
        headers: Vec<String>,
    },

    /// The CSV reader rejected the input.
    #[error("Malformed CSV in {source_name}{}: {reason}", line_suffix(.line))]
    Format {
        /// File path or reader name
        source_name: String,
        /// 1-based line where the reader stopped, when known
        line: Option<u64>,
        /// Message from the CSV reader
        reason: String,
    },

    /// Writing a dependency to the output failed.
    #[error("Failed to write dependency list: {reason}")]
    Output {
        /// Message from the operating system
        reason: String,
        /// Kind of the underlying I/O failure
        kind: io::ErrorKind,
    },

    /// A failure from outside deplist, shown by its root cause
    #[error("{message}")]
    Other {
        message: String,
    },
}

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|line| format!(" at line {line}")).unwrap_or_default()
}

impl DeplistError {
    /// Build a [`DeplistError::FileAccess`] from an I/O error raised while
    /// opening `path`.
    pub fn file_access(path: impl Into<String>, error: &io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            reason: error.to_string(),
            kind: error.kind(),
        }
    }

    /// Build a [`DeplistError::Format`] from a CSV reader error.
    pub fn format(source_name: impl Into<String>, error: &csv::Error) -> Self {
        Self::Format {
            source_name: source_name.into(),
            line: error.position().map(csv::Position::line),
            reason: error.to_string(),
        }
    }

    /// Build a [`DeplistError::Output`] from a failed write.
    pub fn output(error: &io::Error) -> Self {
        Self::Output {
            reason: error.to_string(),
            kind: error.kind(),
        }
    }

    /// Whether this error means the reader of our output went away.
    ///
    /// A closed pipe (`deplist deps.csv col | head -1`) is not a failure of
    /// the run.
    #[must_use]
    pub fn is_broken_pipe(&self) -> bool {
        matches!(
            self,
            Self::Output {
                kind: io::ErrorKind::BrokenPipe,
                ..
            }
        )
    }
}

/// Error context wrapper that adds details and a suggestion to a
/// [`DeplistError`] for display in the terminal.
///
/// When the error was wrapped with `anyhow` context on its way up, that
/// context is kept in `operation` and shown first, with the error as its
/// cause.
///
/// # Examples
///
/// ```rust,no_run
/// use deplist_cli::core::{DeplistError, ErrorContext};
///
/// let context = ErrorContext::new(DeplistError::Other {
///     message: "something failed".to_string(),
/// })
/// .with_suggestion("Re-run with --verbose for more information");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: DeplistError,
    /// What was being attempted when the error occurred
    pub operation: Option<String>,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: DeplistError) -> Self {
        Self {
            error,
            operation: None,
            suggestion: None,
            details: None,
        }
    }

    /// Record the operation that failed.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Add a suggestion for resolving the error. Shown in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error. Shown in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message (and failed operation): red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        match &self.operation {
            Some(operation) => {
                eprintln!("{}: {}", "error".red().bold(), operation);
                eprintln!("{}: {}", "caused by".red(), self.error);
            }
            None => eprintln!("{}: {}", "error".red().bold(), self.error),
        }

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operation) = &self.operation {
            write!(f, "{operation}\nCaused by: ")?;
        }
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with a suggestion.
///
/// A [`DeplistError`] anywhere in the chain gets its tailored details and
/// suggestion, and the context messages wrapped around it become the
/// `operation`. Any other error is shown as its root cause, with the
/// messages around it as the operation.
///
/// # Examples
///
/// ```rust,no_run
/// use anyhow::Context;
/// use deplist_cli::core::user_friendly_error;
/// use deplist_cli::lister::list_dependencies;
///
/// if let Err(e) = list_dependencies("deps.csv", "build dependencies")
///     .context("Failed to list build dependencies")
/// {
///     user_friendly_error(e).display();
/// }
/// ```
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let ctx = match error.downcast_ref::<DeplistError>() {
        Some(deplist_error) => create_error_context(deplist_error.clone()),
        None => ErrorContext::new(DeplistError::Other {
            message: error.root_cause().to_string(),
        }),
    };

    let cause = ctx.error.to_string();
    let operation: Vec<String> = error
        .chain()
        .map(ToString::to_string)
        .take_while(|message| *message != cause)
        .collect();

    if operation.is_empty() { ctx } else { ctx.with_operation(operation.join(": ")) }
}

fn create_error_context(error: DeplistError) -> ErrorContext {
    match &error {
        DeplistError::FileAccess {
            path,
            kind,
            ..
        } => {
            let suggestion = match kind {
                io::ErrorKind::NotFound => {
                    format!("Check that '{path}' exists and the path is spelled correctly")
                }
                io::ErrorKind::PermissionDenied => match cfg!(windows) {
                    true => "Check the file permissions in File Explorer".to_string(),
                    false => format!("Check the file permissions with 'ls -la {path}'"),
                },
                io::ErrorKind::IsADirectory => {
                    format!("'{path}' is a directory; pass the path of the CSV file inside it")
                }
                _ => format!("Make sure '{path}' is a readable file"),
            };
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("The dependency file must exist and be readable before any dependency is listed")
        }

        DeplistError::MissingColumn {
            column,
            headers,
            ..
        } => {
            let details = if headers.is_empty() {
                "The file has no header row".to_string()
            } else {
                format!("Available columns: {}", quoted_list(headers))
            };
            let suggestion = match closest_header(column, headers) {
                Some(header) => format!("Did you mean '{header}'? Column names are case-sensitive"),
                None => "Pass one of the column names from the file's header row".to_string(),
            };
            ErrorContext::new(error).with_details(details).with_suggestion(suggestion)
        }

        DeplistError::Format {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check that every row has as many fields as the header and that quotes are balanced")
            .with_details("Dependency files are comma-separated with double-quoted fields and a header row"),

        DeplistError::Output {
            ..
        } => ErrorContext::new(error)
            .with_details("Dependencies already written before the failure were not rolled back"),

        DeplistError::Other {
            ..
        } => ErrorContext::new(error),
    }
}

fn quoted_list(items: &[String]) -> String {
    items.iter().map(|item| format!("'{item}'")).collect::<Vec<_>>().join(", ")
}

/// Header matching `column` ignoring case and surrounding whitespace.
fn closest_header<'a>(column: &str, headers: &'a [String]) -> Option<&'a str> {
    let wanted = column.trim().to_lowercase();
    headers.iter().map(String::as_str).find(|header| header.trim().to_lowercase() == wanted)
}
