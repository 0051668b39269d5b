use sqlx::PgPool;
use uuid::Uuid;

/// Minimal copy of the application-owned `users` table. The admin tool
/// treats it as a precondition and never creates it itself, so tests have
/// to provide it before calling any account operation.
pub async fn create_users_table(pool: &PgPool) {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            email VARCHAR(255) UNIQUE NOT NULL,
            password VARCHAR(255) NOT NULL,
            first_name VARCHAR(100) NOT NULL,
            last_name VARCHAR(100) NOT NULL,
            is_active BOOLEAN DEFAULT true,
            deleted_at TIMESTAMP WITH TIME ZONE
        )
        "#,
    )
    .execute(pool)
    .await
    .unwrap();
}

/// Insert a user directly, bypassing the account operations, with no role
/// links. Used to exercise listing and granting against pre-existing rows.
#[allow(dead_code)]
pub async fn create_plain_user(pool: &PgPool, email: &str) -> Uuid {
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (email, password, first_name, last_name, is_active)
        VALUES ($1, $2, $3, $4, true)
        RETURNING id
        "#,
    )
    .bind(email)
    .bind("not-a-real-hash")
    .bind("Test")
    .bind("User")
    .fetch_one(pool)
    .await
    .unwrap();

    id
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}
