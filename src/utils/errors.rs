//! Application error types.
//!
//! Every account operation returns a structured [`AdminError`] instead of
//! printing its own feedback; the shell and the subcommand handlers decide
//! how to present it. All failures are recovered at the operation boundary,
//! so nothing here ever escapes the interactive loop.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminError {
    /// The endpoint is unreachable or rejected the credentials.
    #[error("could not reach the database: {0}")]
    Connectivity(#[source] sqlx::Error),

    /// Unique-constraint violation on the user email.
    #[error("a user with email {0} already exists")]
    DuplicateUser(String),

    /// The named role is not present among non-deleted roles.
    #[error("the '{0}' role does not exist yet; run setup first")]
    MissingRole(&'static str),

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AdminError {
    /// Maps a unique violation on the email column to [`AdminError::DuplicateUser`].
    pub(crate) fn user_insert(email: &str, err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return AdminError::DuplicateUser(email.to_string());
            }
        }
        AdminError::Database(err)
    }
}
