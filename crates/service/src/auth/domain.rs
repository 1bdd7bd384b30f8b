use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub username: String,
    /// Kept out of the recorded request parameters.
    #[serde(skip_serializing)]
    pub password: String,
}

/// Admin account (business view)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: Uuid,
    pub username: String,
    pub enabled: bool,
    pub created_at: DateTime<FixedOffset>,
}

/// An account together with its stored password hash.
#[derive(Debug, Clone)]
pub struct UserWithCredentials {
    pub user: AdminUser,
    pub password_hash: String,
}

impl From<models::admin_user::Model> for UserWithCredentials {
    fn from(m: models::admin_user::Model) -> Self {
        Self {
            user: AdminUser { id: m.id, username: m.username, enabled: m.enabled, created_at: m.created_at },
            password_hash: m.password_hash,
        }
    }
}

/// Login result (session)
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub user: AdminUser,
    pub token: String,
}

/// JWT claims; `sub` is the username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}
