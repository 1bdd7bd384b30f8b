use async_trait::async_trait;

use super::domain::UserWithCredentials;
use super::errors::AuthError;

/// Repository abstraction for admin accounts.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserWithCredentials>, AuthError>;
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<UserWithCredentials, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use crate::auth::domain::AdminUser;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<String, UserWithCredentials>>, // key: username
    }

    impl MockAuthRepository {
        pub fn set_enabled(&self, username: &str, enabled: bool) {
            if let Ok(mut users) = self.users.lock() {
                if let Some(u) = users.get_mut(username) {
                    u.user.enabled = enabled;
                }
            }
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_by_username(&self, username: &str) -> Result<Option<UserWithCredentials>, AuthError> {
            let users = self.users.lock().map_err(|_| AuthError::Repository("mock lock poisoned".into()))?;
            Ok(users.get(username).cloned())
        }

        async fn create_user(&self, username: &str, password_hash: &str) -> Result<UserWithCredentials, AuthError> {
            models::admin_user::validate_username(username)?;
            let mut users = self.users.lock().map_err(|_| AuthError::Repository("mock lock poisoned".into()))?;
            if users.contains_key(username) {
                return Err(AuthError::Conflict);
            }
            let created = UserWithCredentials {
                user: AdminUser {
                    id: Uuid::new_v4(),
                    username: username.to_string(),
                    enabled: true,
                    created_at: chrono::Utc::now().into(),
                },
                password_hash: password_hash.to_string(),
            };
            users.insert(username.to_string(), created.clone());
            Ok(created)
        }
    }
}
