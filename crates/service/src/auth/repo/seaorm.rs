use sea_orm::DatabaseConnection;

use crate::auth::domain::UserWithCredentials;
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserWithCredentials>, AuthError> {
        Ok(models::admin_user::find_by_username(&self.db, username).await?.map(UserWithCredentials::from))
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> Result<UserWithCredentials, AuthError> {
        if models::admin_user::find_by_username(&self.db, username).await?.is_some() {
            return Err(AuthError::Conflict);
        }
        Ok(models::admin_user::create(&self.db, username, password_hash).await?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use sea_orm::EntityTrait;

    #[tokio::test]
    async fn create_then_find_by_username() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let repo = SeaOrmAuthRepository { db };

        let username = format!("admin-{}", uuid::Uuid::new_v4().simple());
        let created = repo.create_user(&username, "$argon2id$stub").await?;
        assert!(matches!(repo.create_user(&username, "$argon2id$stub").await, Err(AuthError::Conflict)));

        let found = repo.find_by_username(&username).await?.expect("user stored");
        assert_eq!(found.user.id, created.user.id);
        assert_eq!(found.password_hash, "$argon2id$stub");

        models::admin_user::Entity::delete_by_id(created.user.id).exec(&repo.db).await?;
        Ok(())
    }
}
