//! Configuration modules for the admin CLI.
//!
//! Configuration is loaded from environment variables (a `.env` file is
//! honored at startup). See each submodule for specific variable names
//! and their defaults.
//!
//! # Modules
//!
//! - [`database`]: database endpoint selection and connection setup

pub mod database;

pub use database::{DatabaseConfig, Target};
