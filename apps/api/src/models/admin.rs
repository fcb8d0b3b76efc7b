use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Stored admin account. Never serialized: responses use [`AdminProfile`].
#[derive(Debug, Clone, FromRow)]
pub struct AdminAccount {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of an admin account.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct AdminProfile {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl From<AdminAccount> for AdminProfile {
    fn from(account: AdminAccount) -> Self {
        AdminProfile {
            id: account.id,
            email: account.email,
            name: account.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminProfile,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}
