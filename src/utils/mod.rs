//! Shared utilities for the admin CLI.
//!
//! - [`errors`]: application error types
//! - [`password`]: password hashing and verification

pub mod errors;
pub mod password;
