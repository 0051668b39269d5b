mod common;

use common::{create_plain_user, create_users_table, generate_unique_email};
use sqlx::PgPool;
use swadiq_admin::modules::accounts::model::{NO_ROLES, NewAdmin};
use swadiq_admin::modules::accounts::service::{
    check_connection, create_admin, grant_admin, list_users,
};
use swadiq_admin::schema::ensure_schema;
use swadiq_admin::utils::errors::AdminError;
use swadiq_admin::utils::password::verify_password;

async fn setup(pool: &PgPool) {
    create_users_table(pool).await;
    ensure_schema(pool).await.unwrap();
}

fn new_admin(email: &str) -> NewAdmin {
    NewAdmin {
        email: email.to_string(),
        password: "testpass123".to_string(),
        first_name: "Test".to_string(),
        last_name: "Admin".to_string(),
    }
}

async fn count_users(pool: &PgPool, email: &str) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(email)
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

#[sqlx::test]
async fn test_create_admin_then_list(pool: PgPool) {
    setup(&pool).await;
    let email = generate_unique_email();

    create_admin(&pool, &new_admin(&email)).await.unwrap();

    let users = list_users(&pool).await.unwrap();
    let matching: Vec<_> = users.iter().filter(|u| u.email == email).collect();

    assert_eq!(matching.len(), 1);
    assert!(matching[0].roles.contains("admin"));
    assert_eq!(matching[0].first_name, "Test");
}

#[sqlx::test]
async fn test_create_admin_duplicate_email(pool: PgPool) {
    setup(&pool).await;
    let email = generate_unique_email();

    create_admin(&pool, &new_admin(&email)).await.unwrap();
    let second = create_admin(&pool, &new_admin(&email)).await;

    assert!(matches!(second, Err(AdminError::DuplicateUser(ref e)) if *e == email));
    assert_eq!(count_users(&pool, &email).await, 1);
}

#[sqlx::test]
async fn test_create_admin_stores_hashed_password(pool: PgPool) {
    setup(&pool).await;
    let email = generate_unique_email();

    create_admin(&pool, &new_admin(&email)).await.unwrap();

    let (stored,): (String,) = sqlx::query_as("SELECT password FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_ne!(stored, "testpass123");
    assert!(verify_password("testpass123", &stored).unwrap());
}

#[sqlx::test]
async fn test_create_admin_rolls_back_without_admin_role(pool: PgPool) {
    setup(&pool).await;
    let email = generate_unique_email();

    // Soft-delete the admin role so the link step cannot succeed.
    sqlx::query("UPDATE roles SET deleted_at = NOW() WHERE name = 'admin'")
        .execute(&pool)
        .await
        .unwrap();

    let result = create_admin(&pool, &new_admin(&email)).await;

    assert!(matches!(result, Err(AdminError::MissingRole("admin"))));
    // The user insert must have been rolled back with the rest.
    assert_eq!(count_users(&pool, &email).await, 0);
}

#[sqlx::test]
async fn test_grant_admin_is_idempotent(pool: PgPool) {
    setup(&pool).await;
    let user_id = create_plain_user(&pool, &generate_unique_email()).await;

    assert!(grant_admin(&pool, user_id).await.unwrap());
    assert!(!grant_admin(&pool, user_id).await.unwrap());

    let (links,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM user_roles WHERE user_id = $1 AND deleted_at IS NULL",
    )
    .bind(user_id)
    .fetch_one(&pool)
    .await
    .unwrap();

    assert_eq!(links, 1);
}

#[sqlx::test]
async fn test_grant_admin_requires_seeded_role(pool: PgPool) {
    create_users_table(&pool).await;
    ensure_schema(&pool).await.unwrap();
    let user_id = create_plain_user(&pool, &generate_unique_email()).await;

    sqlx::query("UPDATE roles SET deleted_at = NOW() WHERE name = 'admin'")
        .execute(&pool)
        .await
        .unwrap();

    let result = grant_admin(&pool, user_id).await;

    assert!(matches!(result, Err(AdminError::MissingRole("admin"))));
}

#[sqlx::test]
async fn test_list_users_no_roles_sentinel(pool: PgPool) {
    setup(&pool).await;
    let email = generate_unique_email();
    create_plain_user(&pool, &email).await;

    let users = list_users(&pool).await.unwrap();
    let user = users.iter().find(|u| u.email == email).unwrap();

    assert_eq!(user.roles, NO_ROLES);
}

#[sqlx::test]
async fn test_list_users_ordered_by_email(pool: PgPool) {
    setup(&pool).await;
    create_plain_user(&pool, "b@test.com").await;
    create_plain_user(&pool, "a@test.com").await;
    create_plain_user(&pool, "c@test.com").await;

    let users = list_users(&pool).await.unwrap();
    let emails: Vec<&str> = users.iter().map(|u| u.email.as_str()).collect();

    assert_eq!(emails, vec!["a@test.com", "b@test.com", "c@test.com"]);
}

#[sqlx::test]
async fn test_list_users_skips_soft_deleted(pool: PgPool) {
    setup(&pool).await;
    let email = generate_unique_email();
    let user_id = create_plain_user(&pool, &email).await;

    sqlx::query("UPDATE users SET deleted_at = NOW() WHERE id = $1")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

    let users = list_users(&pool).await.unwrap();

    assert!(users.iter().all(|u| u.email != email));
}

#[sqlx::test]
async fn test_check_connection_reports_version(pool: PgPool) {
    let version = check_connection(&pool).await.unwrap();

    assert!(version.contains("PostgreSQL"));
}
