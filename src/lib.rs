//! # Swadiq Admin
//!
//! An administrative provisioning CLI for the Swadiq Schools database.
//!
//! The tool talks directly to the application's PostgreSQL instance to
//! bootstrap the role tables and manage admin accounts, without going
//! through the web application itself. It covers four operations:
//!
//! - **Setup**: create the `roles` and `user_roles` tables if they are
//!   missing and seed the fixed role set (`admin`, `head_teacher`,
//!   `class_teacher`, `subject_teacher`).
//! - **Create admin**: insert a new user with a bcrypt-hashed password and
//!   link it to the `admin` role in one transaction.
//! - **List users**: show all active users with their aggregated role names.
//! - **Grant admin**: attach the `admin` role to an existing user,
//!   idempotently.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── config/           # Database configuration (local/remote toggle)
//! ├── modules/          # Feature modules
//! │   └── accounts/    # Account operations (create, list, grant)
//! ├── schema.rs        # Role-table bootstrap and key strategies
//! ├── shell.rs         # Interactive menu loop
//! └── utils/           # Shared utilities (errors, password hashing)
//! ```
//!
//! Each feature module follows a consistent structure:
//!
//! - `model.rs`: Data models and database structs
//! - `service.rs`: Business logic
//!
//! ## Environment Variables
//!
//! ```bash
//! LOCAL_DB=true                  # exact string "true" targets localhost
//! DATABASE_HOST=db.example.com   # remote endpoint (the default target)
//! DATABASE_USER=swadiq
//! DATABASE_PASSWORD=...
//! DB_CONNECT_TIMEOUT_SECS=10
//! ```
//!
//! The `users` table is an external precondition owned by the wider
//! application; this tool inserts into it and reads from it but never
//! creates or migrates it.
//!
//! ## Security Considerations
//!
//! - Passwords are hashed using bcrypt with a per-call salt
//! - Database credentials come only from the environment, never from source
//! - Duplicate accounts and duplicate role grants are rejected by database
//!   constraints, not application-level checks

pub mod config;
pub mod logging;
pub mod modules;
pub mod schema;
pub mod shell;
pub mod utils;
