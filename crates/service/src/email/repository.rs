use async_trait::async_trait;

use super::domain::EmailConfig;
use crate::errors::ServiceError;

/// Storage for the singleton email configuration.
#[async_trait]
pub trait EmailConfigRepository: Send + Sync {
    async fn find(&self) -> Result<Option<EmailConfig>, ServiceError>;
    /// Replace the stored configuration wholesale.
    async fn save(&self, config: &EmailConfig) -> Result<EmailConfig, ServiceError>;
}

/// Simple in-memory mock repository for tests
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockEmailConfigRepository {
        current: Mutex<Option<EmailConfig>>,
    }

    impl MockEmailConfigRepository {
        pub fn with(config: EmailConfig) -> Self {
            Self { current: Mutex::new(Some(config)) }
        }
    }

    #[async_trait]
    impl EmailConfigRepository for MockEmailConfigRepository {
        async fn find(&self) -> Result<Option<EmailConfig>, ServiceError> {
            let current = self.current.lock().map_err(|_| ServiceError::Db("mock lock poisoned".into()))?;
            Ok(current.clone())
        }

        async fn save(&self, config: &EmailConfig) -> Result<EmailConfig, ServiceError> {
            config.validate()?;
            let mut current = self.current.lock().map_err(|_| ServiceError::Db("mock lock poisoned".into()))?;
            *current = Some(config.clone());
            Ok(config.clone())
        }
    }
}
