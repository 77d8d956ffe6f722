//! Unit test suite for the deplist library API.
//!
//! ```bash
//! cargo test --test unit
//! ```

mod lister_tests;
