//! Role-table bootstrap.
//!
//! The wider application owns the `users` table; this module owns `roles`
//! and `user_roles` and creates them on demand. Primary keys come in two
//! flavors depending on what the server supports: UUIDs generated by the
//! `uuid-ossp` extension, or plain serial integers where the extension is
//! not installable. The strategy is picked up front by a capability probe
//! rather than discovered by catching a DDL failure, but a failing UUID
//! setup still falls back to serial keys exactly once.
//!
//! [`ensure_schema`] is idempotent: running it repeatedly never duplicates
//! tables or seed rows and never fails merely because they already exist.

use sqlx::PgPool;
use thiserror::Error;
use tracing::{instrument, warn};

/// Role names seeded at setup time. `admin` is the one the account
/// operations depend on; the teacher roles exist for the wider application.
pub const SEED_ROLES: [&str; 4] = ["admin", "head_teacher", "class_teacher", "subject_teacher"];

const CREATE_ROLES_UUID: &str = r#"
    CREATE TABLE IF NOT EXISTS roles (
        id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
        name VARCHAR(100) UNIQUE NOT NULL,
        is_active BOOLEAN DEFAULT true,
        created_at TIMESTAMP WITH TIME ZONE DEFAULT NOW(),
        updated_at TIMESTAMP WITH TIME ZONE DEFAULT NOW(),
        deleted_at TIMESTAMP WITH TIME ZONE
    )
"#;

const CREATE_USER_ROLES_UUID: &str = r#"
    CREATE TABLE IF NOT EXISTS user_roles (
        id UUID PRIMARY KEY DEFAULT uuid_generate_v4(),
        user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        role_id UUID NOT NULL REFERENCES roles(id) ON DELETE CASCADE,
        created_at TIMESTAMP WITH TIME ZONE DEFAULT NOW(),
        deleted_at TIMESTAMP WITH TIME ZONE,
        UNIQUE (user_id, role_id)
    )
"#;

// The serial variant keeps the full column set of the UUID variant and
// differs only in key type; the shared list query reads roles.deleted_at,
// so dropping it here would break listing under the fallback schema.
const CREATE_ROLES_SERIAL: &str = r#"
    CREATE TABLE IF NOT EXISTS roles (
        id SERIAL PRIMARY KEY,
        name VARCHAR(100) UNIQUE NOT NULL,
        is_active BOOLEAN DEFAULT true,
        created_at TIMESTAMP WITH TIME ZONE DEFAULT NOW(),
        updated_at TIMESTAMP WITH TIME ZONE DEFAULT NOW(),
        deleted_at TIMESTAMP WITH TIME ZONE
    )
"#;

const CREATE_USER_ROLES_SERIAL: &str = r#"
    CREATE TABLE IF NOT EXISTS user_roles (
        id SERIAL PRIMARY KEY,
        user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        role_id INTEGER NOT NULL REFERENCES roles(id) ON DELETE CASCADE,
        created_at TIMESTAMP WITH TIME ZONE DEFAULT NOW(),
        deleted_at TIMESTAMP WITH TIME ZONE,
        UNIQUE (user_id, role_id)
    )
"#;

/// How the role tables generate their primary keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaStrategy {
    /// `uuid-ossp` generated identifiers (preferred).
    UuidKeys,
    /// Auto-incrementing integers, for servers without the extension.
    SerialKeys,
}

#[derive(Debug, Error)]
#[error("schema setup failed: {source}")]
pub struct SchemaError {
    #[from]
    pub source: sqlx::Error,
}

impl SchemaStrategy {
    /// Picks the preferred key strategy by asking the server whether the
    /// `uuid-ossp` extension is installable.
    #[instrument(skip(db))]
    pub async fn detect(db: &PgPool) -> Result<Self, sqlx::Error> {
        let (available,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM pg_available_extensions WHERE name = 'uuid-ossp')",
        )
        .fetch_one(db)
        .await?;

        Ok(if available {
            Self::UuidKeys
        } else {
            Self::SerialKeys
        })
    }

    /// Creates the role tables for this strategy and seeds the fixed role
    /// names, all in one transaction. Safe to run against tables created
    /// by either strategy.
    #[instrument(skip(db))]
    pub async fn apply(self, db: &PgPool) -> Result<(), sqlx::Error> {
        let mut tx = db.begin().await?;

        match self {
            Self::UuidKeys => {
                sqlx::query(r#"CREATE EXTENSION IF NOT EXISTS "uuid-ossp""#)
                    .execute(&mut *tx)
                    .await?;
                sqlx::query(CREATE_ROLES_UUID).execute(&mut *tx).await?;
                sqlx::query(CREATE_USER_ROLES_UUID).execute(&mut *tx).await?;
            }
            Self::SerialKeys => {
                sqlx::query(CREATE_ROLES_SERIAL).execute(&mut *tx).await?;
                sqlx::query(CREATE_USER_ROLES_SERIAL)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        for name in SEED_ROLES {
            sqlx::query("INSERT INTO roles (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
                .bind(name)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await
    }
}

/// Makes sure the role tables exist and are seeded, returning the strategy
/// that ended up applied.
///
/// A failure of the UUID path is retried once with serial keys; a failure
/// of the serial path is terminal for this call. Callers treat that as
/// non-fatal for the process.
#[instrument(skip(db))]
pub async fn ensure_schema(db: &PgPool) -> Result<SchemaStrategy, SchemaError> {
    let preferred = match SchemaStrategy::detect(db).await {
        Ok(strategy) => strategy,
        Err(e) => {
            warn!(error = %e, "capability probe failed, assuming serial keys");
            SchemaStrategy::SerialKeys
        }
    };

    match preferred.apply(db).await {
        Ok(()) => return Ok(preferred),
        Err(e) if preferred == SchemaStrategy::UuidKeys => {
            warn!(error = %e, "uuid key setup failed, retrying with serial keys");
        }
        Err(e) => return Err(SchemaError::from(e)),
    }

    SchemaStrategy::SerialKeys.apply(db).await?;
    Ok(SchemaStrategy::SerialKeys)
}
