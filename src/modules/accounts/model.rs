//! Account domain models.

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Role granted to accounts created or promoted by this tool.
pub const ADMIN_ROLE: &str = "admin";

/// Sentinel shown for users with no role links.
pub const NO_ROLES: &str = "No roles";

/// Input for [`create_admin`](super::service::create_admin). The password
/// arrives in the clear and is hashed inside the operation.
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// One row of the user listing: an active user with the comma-joined names
/// of their non-deleted roles, or [`NO_ROLES`].
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: String,
}
