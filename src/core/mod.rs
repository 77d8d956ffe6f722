//! Core types shared across deplist.
//!
//! Currently this is the error system: [`DeplistError`] for typed failures and
//! [`ErrorContext`] / [`user_friendly_error`] for presenting them on the
//! command line.

pub mod error;

pub use error::{DeplistError, ErrorContext, user_friendly_error};
