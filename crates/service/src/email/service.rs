use std::sync::Arc;

use lettre::message::Mailbox;
use lettre::Address;

use super::domain::{EmailConfig, EmailVo};
use super::repository::EmailConfigRepository;
use super::transport::{MailTransport, OutgoingMail, SmtpSettings};
use crate::errors::ServiceError;

#[derive(Clone)]
pub struct EmailService {
    repo: Arc<dyn EmailConfigRepository>,
    transport: Arc<dyn MailTransport>,
}

impl EmailService {
    pub fn new(repo: Arc<dyn EmailConfigRepository>, transport: Arc<dyn MailTransport>) -> Self {
        Self { repo, transport }
    }

    /// The stored configuration, or an empty one when nothing is stored yet.
    pub async fn find(&self) -> Result<EmailConfig, ServiceError> {
        Ok(self.repo.find().await?.unwrap_or_default())
    }

    /// Replace the configuration. An empty password keeps the stored one.
    pub async fn update(&self, mut new: EmailConfig, old: &EmailConfig) -> Result<EmailConfig, ServiceError> {
        if new.pass.is_empty() {
            new.pass = old.pass.clone();
        }
        new.validate()?;
        self.repo.save(&new).await
    }

    pub async fn send(&self, vo: &EmailVo, config: &EmailConfig) -> Result<(), ServiceError> {
        if !config.is_configured() {
            return Err(ServiceError::BadRequest("email is not configured".into()));
        }
        let port = config.validate()?;
        if vo.tos.is_empty() {
            return Err(ServiceError::Validation("at least one recipient required".into()));
        }
        if vo.subject.trim().is_empty() {
            return Err(ServiceError::Validation("subject required".into()));
        }
        if vo.content.trim().is_empty() {
            return Err(ServiceError::Validation("content required".into()));
        }

        let to = vo
            .tos
            .iter()
            .map(|t| parse_address(t).map(|a| Mailbox::new(None, a)))
            .collect::<Result<Vec<_>, _>>()?;
        let from = Mailbox::new(Some(config.user.clone()), parse_address(&config.from_user)?);

        let settings = SmtpSettings {
            host: config.host.trim().to_string(),
            port,
            username: config.user.clone(),
            password: config.pass.clone(),
        };
        let mail = OutgoingMail { from, to, subject: vo.subject.clone(), html: vo.content.clone() };
        self.transport.send(&settings, mail).await?;
        tracing::info!(host = %settings.host, recipients = vo.tos.len(), "email sent");
        Ok(())
    }
}

fn parse_address(raw: &str) -> Result<Address, ServiceError> {
    raw.trim()
        .parse::<Address>()
        .map_err(|_| ServiceError::Validation(format!("invalid email address: {raw}")))
}
