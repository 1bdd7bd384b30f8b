use sea_orm::DatabaseConnection;

use models::email_config;

use crate::email::domain::EmailConfig;
use crate::email::repository::EmailConfigRepository;
use crate::errors::ServiceError;

pub struct SeaOrmEmailConfigRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl EmailConfigRepository for SeaOrmEmailConfigRepository {
    async fn find(&self) -> Result<Option<EmailConfig>, ServiceError> {
        Ok(email_config::find(&self.db).await?.map(EmailConfig::from))
    }

    async fn save(&self, c: &EmailConfig) -> Result<EmailConfig, ServiceError> {
        let saved = email_config::replace(&self.db, &c.host, &c.port, &c.user, &c.pass, &c.from_user).await?;
        Ok(saved.into())
    }
}
