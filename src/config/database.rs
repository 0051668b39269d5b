//! Database configuration and connection setup.
//!
//! The admin tool can target either the local development database or the
//! remote production one. The `LOCAL_DB` environment variable selects the
//! target: the exact string `"true"` means local, anything else (including
//! no value at all) means remote. Remote connections get a bounded connect
//! timeout so an unreachable endpoint fails fast instead of hanging the
//! prompt.
//!
//! # Environment Variables
//!
//! - `LOCAL_DB`: target toggle (exact `"true"` selects local)
//! - `DATABASE_HOST` / `DATABASE_PORT` / `DATABASE_NAME` /
//!   `DATABASE_USER` / `DATABASE_PASSWORD`: remote endpoint parameters
//! - `LOCAL_DATABASE_HOST` etc.: local overrides, defaulting to
//!   `localhost:5432/swadiq` as the `postgres` user with no password
//! - `DB_CONNECT_TIMEOUT_SECS`: remote connect timeout (default 10)

use std::env;
use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::utils::errors::AdminError;

/// Which database endpoint the tool should talk to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Local,
    Remote,
}

impl Target {
    /// Resolves the target from the raw `LOCAL_DB` value.
    ///
    /// Only the exact string `"true"` selects the local endpoint; an
    /// absent or non-matching value falls back to remote.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("true") => Target::Local,
            _ => Target::Remote,
        }
    }

    pub fn from_env() -> Self {
        Self::from_flag(env::var("LOCAL_DB").ok().as_deref())
    }
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub target: Target,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    /// Bounded connect timeout; applied only for the remote target.
    pub connect_timeout: Option<Duration>,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self::for_target(Target::from_env())
    }

    pub fn for_target(target: Target) -> Self {
        match target {
            Target::Local => Self {
                target,
                host: env::var("LOCAL_DATABASE_HOST").unwrap_or_else(|_| "localhost".to_string()),
                port: env::var("LOCAL_DATABASE_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5432),
                database: env::var("LOCAL_DATABASE_NAME").unwrap_or_else(|_| "swadiq".to_string()),
                user: env::var("LOCAL_DATABASE_USER").unwrap_or_else(|_| "postgres".to_string()),
                password: env::var("LOCAL_DATABASE_PASSWORD").unwrap_or_else(|_| "".to_string()),
                connect_timeout: None,
            },
            Target::Remote => Self {
                target,
                host: env::var("DATABASE_HOST").unwrap_or_else(|_| "localhost".to_string()),
                port: env::var("DATABASE_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5432),
                database: env::var("DATABASE_NAME").unwrap_or_else(|_| "swadiq".to_string()),
                user: env::var("DATABASE_USER").unwrap_or_else(|_| "".to_string()),
                password: env::var("DATABASE_PASSWORD").unwrap_or_else(|_| "".to_string()),
                connect_timeout: Some(Duration::from_secs(
                    env::var("DB_CONNECT_TIMEOUT_SECS")
                        .ok()
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(10),
                )),
            },
        }
    }

    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        )
    }

    /// Opens a small connection pool against the configured endpoint.
    ///
    /// The pool hands out connections as scoped resources: every acquire
    /// is returned on all exit paths, committed or not.
    pub async fn connect(&self) -> Result<PgPool, AdminError> {
        let mut options = PgPoolOptions::new().max_connections(5);

        if let Some(timeout) = self.connect_timeout {
            options = options.acquire_timeout(timeout);
        }

        options
            .connect(&self.url())
            .await
            .map_err(AdminError::Connectivity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_true_selects_local() {
        assert_eq!(Target::from_flag(Some("true")), Target::Local);
    }

    #[test]
    fn test_flag_absent_selects_remote() {
        assert_eq!(Target::from_flag(None), Target::Remote);
    }

    #[test]
    fn test_flag_non_matching_selects_remote() {
        assert_eq!(Target::from_flag(Some("false")), Target::Remote);
        assert_eq!(Target::from_flag(Some("1")), Target::Remote);
        assert_eq!(Target::from_flag(Some("TRUE")), Target::Remote);
        assert_eq!(Target::from_flag(Some("")), Target::Remote);
    }

    #[test]
    fn test_url_format() {
        let config = DatabaseConfig {
            target: Target::Local,
            host: "localhost".to_string(),
            port: 5432,
            database: "swadiq".to_string(),
            user: "postgres".to_string(),
            password: "".to_string(),
            connect_timeout: None,
        };

        assert_eq!(config.url(), "postgres://postgres:@localhost:5432/swadiq");
    }
}
