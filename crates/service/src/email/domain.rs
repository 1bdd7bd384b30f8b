use serde::{Deserialize, Serialize};

use models::email_config;

use crate::errors::ServiceError;

/// SMTP settings used for every outgoing message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailConfig {
    pub host: String,
    pub port: String,
    /// SMTP login.
    pub user: String,
    /// Never echoed back to clients.
    #[serde(skip_serializing)]
    pub pass: String,
    /// Sender address.
    pub from_user: String,
}

impl EmailConfig {
    pub fn is_configured(&self) -> bool {
        !self.host.trim().is_empty() && !self.user.trim().is_empty()
    }

    pub fn validate(&self) -> Result<u16, ServiceError> {
        email_config::validate_host(&self.host)?;
        let port = email_config::validate_port(&self.port)?;
        if self.user.trim().is_empty() {
            return Err(ServiceError::Validation("user required".into()));
        }
        email_config::validate_from_user(&self.from_user)?;
        Ok(port)
    }
}

impl From<email_config::Model> for EmailConfig {
    fn from(m: email_config::Model) -> Self {
        Self { host: m.host, port: m.port, user: m.user, pass: m.pass, from_user: m.from_user }
    }
}

/// A message to send with the stored configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailVo {
    pub tos: Vec<String>,
    pub subject: String,
    /// HTML body.
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EmailConfig {
        EmailConfig {
            host: "smtp.example.com".into(),
            port: "465".into(),
            user: "mailer".into(),
            pass: "secret".into(),
            from_user: "noreply@example.com".into(),
        }
    }

    #[test]
    fn password_is_never_serialized() {
        let json = serde_json::to_value(config()).unwrap();
        assert_eq!(json["fromUser"], "noreply@example.com");
        assert!(json.get("pass").is_none());
    }

    #[test]
    fn missing_fields_deserialize_to_empty() {
        let cfg: EmailConfig = serde_json::from_str(r#"{"host":"smtp.example.com"}"#).unwrap();
        assert_eq!(cfg.host, "smtp.example.com");
        assert!(cfg.pass.is_empty());
        assert!(!cfg.is_configured());
    }

    #[test]
    fn validate_checks_every_field() {
        assert_eq!(config().validate().unwrap(), 465);

        let bad_port = EmailConfig { port: "smtp".into(), ..config() };
        assert!(matches!(bad_port.validate(), Err(ServiceError::Model(_))));

        let no_user = EmailConfig { user: " ".into(), ..config() };
        assert!(matches!(no_user.validate(), Err(ServiceError::Validation(_))));

        let bad_from = EmailConfig { from_user: "noreply".into(), ..config() };
        assert!(bad_from.validate().is_err());
    }
}
