use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AdminError;
use crate::utils::password::hash_password;

use super::model::{ADMIN_ROLE, NO_ROLES, NewAdmin, UserSummary};

/// Creates an admin account: hashes the password, inserts the user row and
/// links it to the `admin` role, all in one transaction.
///
/// An already-used email surfaces as [`AdminError::DuplicateUser`]; a
/// missing `admin` role (setup never ran) as [`AdminError::MissingRole`].
/// Either way the transaction is rolled back and no partial rows remain.
#[instrument(skip(db, admin), fields(email = %admin.email))]
pub async fn create_admin(db: &PgPool, admin: &NewAdmin) -> Result<Uuid, AdminError> {
    let hashed = hash_password(&admin.password)?;

    let mut tx = db.begin().await?;

    let (user_id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO users (email, password, first_name, last_name, is_active)
         VALUES ($1, $2, $3, $4, true)
         RETURNING id",
    )
    .bind(&admin.email)
    .bind(&hashed)
    .bind(&admin.first_name)
    .bind(&admin.last_name)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| AdminError::user_insert(&admin.email, e))?;

    // Resolving the role id inside the insert keeps this working under
    // both key strategies (roles.id is a UUID or an integer).
    let linked = sqlx::query(
        "INSERT INTO user_roles (user_id, role_id)
         SELECT $1, id FROM roles WHERE name = $2 AND deleted_at IS NULL",
    )
    .bind(user_id)
    .bind(ADMIN_ROLE)
    .execute(&mut *tx)
    .await?;

    if linked.rows_affected() == 0 {
        return Err(AdminError::MissingRole(ADMIN_ROLE));
    }

    tx.commit().await?;

    Ok(user_id)
}

/// Lists all non-deleted users with their aggregated role names, ordered
/// by email ascending.
#[instrument(skip(db))]
pub async fn list_users(db: &PgPool) -> Result<Vec<UserSummary>, AdminError> {
    let users = sqlx::query_as::<_, UserSummary>(
        "SELECT u.id, u.email, u.first_name, u.last_name,
                COALESCE(string_agg(r.name, ', '), $1) AS roles
         FROM users u
         LEFT JOIN user_roles ur ON u.id = ur.user_id AND ur.deleted_at IS NULL
         LEFT JOIN roles r ON ur.role_id = r.id AND r.deleted_at IS NULL
         WHERE u.deleted_at IS NULL
         GROUP BY u.id, u.email, u.first_name, u.last_name
         ORDER BY u.email",
    )
    .bind(NO_ROLES)
    .fetch_all(db)
    .await?;

    Ok(users)
}

/// Grants the `admin` role to an existing user. Idempotent: returns `true`
/// when a new link was created, `false` when the user already had it.
#[instrument(skip(db))]
pub async fn grant_admin(db: &PgPool, user_id: Uuid) -> Result<bool, AdminError> {
    let mut tx = db.begin().await?;

    let (role_exists,): (bool,) = sqlx::query_as(
        "SELECT EXISTS (SELECT 1 FROM roles WHERE name = $1 AND deleted_at IS NULL)",
    )
    .bind(ADMIN_ROLE)
    .fetch_one(&mut *tx)
    .await?;

    if !role_exists {
        return Err(AdminError::MissingRole(ADMIN_ROLE));
    }

    let inserted = sqlx::query(
        "INSERT INTO user_roles (user_id, role_id)
         SELECT $1, id FROM roles WHERE name = $2 AND deleted_at IS NULL
         ON CONFLICT (user_id, role_id) DO NOTHING",
    )
    .bind(user_id)
    .bind(ADMIN_ROLE)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(inserted.rows_affected() > 0)
}

/// Round-trips a trivial query and reports the server version string.
#[instrument(skip(db))]
pub async fn check_connection(db: &PgPool) -> Result<String, AdminError> {
    let (version,): (String,) = sqlx::query_as("SELECT version()")
        .fetch_one(db)
        .await
        .map_err(AdminError::Connectivity)?;

    Ok(version)
}
