use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::errors::ServiceError;

const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings resolved from the stored configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug)]
pub struct OutgoingMail {
    pub from: Mailbox,
    pub to: Vec<Mailbox>,
    pub subject: String,
    pub html: String,
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, settings: &SmtpSettings, mail: OutgoingMail) -> Result<(), ServiceError>;
}

/// Delivers through SMTP; the connection is built per message because the
/// settings can change between sends.
#[derive(Clone, Default)]
pub struct SmtpMailTransport;

impl SmtpMailTransport {
    fn transport(settings: &SmtpSettings) -> Result<AsyncSmtpTransport<Tokio1Executor>, ServiceError> {
        let builder = match settings.port {
            465 => AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
                .map_err(|e| ServiceError::Mail(e.to_string()))?,
            587 => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
                .map_err(|e| ServiceError::Mail(e.to_string()))?,
            _ => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host),
        };
        Ok(builder
            .port(settings.port)
            .credentials(Credentials::new(settings.username.clone(), settings.password.clone()))
            .timeout(Some(SMTP_TIMEOUT))
            .build())
    }
}

pub fn build_message(mail: OutgoingMail) -> Result<Message, ServiceError> {
    let mut builder = Message::builder().from(mail.from).subject(mail.subject);
    for to in mail.to {
        builder = builder.to(to);
    }
    builder
        .header(ContentType::TEXT_HTML)
        .body(mail.html)
        .map_err(|e| ServiceError::Mail(e.to_string()))
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, settings: &SmtpSettings, mail: OutgoingMail) -> Result<(), ServiceError> {
        let message = build_message(mail)?;
        let response = Self::transport(settings)?
            .send(message)
            .await
            .map_err(|e| ServiceError::Mail(e.to_string()))?;
        tracing::debug!(host = %settings.host, code = %response.code(), "smtp accepted message");
        Ok(())
    }
}

/// Records messages instead of delivering them
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct RecordingTransport {
        sent: Mutex<Vec<(SmtpSettings, OutgoingMail)>>,
        reject: AtomicBool,
    }

    impl RecordingTransport {
        /// Make every subsequent send fail like an unreachable server.
        pub fn reject(&self, reject: bool) {
            self.reject.store(reject, Ordering::SeqCst);
        }

        pub fn sent(&self) -> Vec<(SmtpSettings, OutgoingMail)> {
            self.sent.lock().map(|s| s.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn send(&self, settings: &SmtpSettings, mail: OutgoingMail) -> Result<(), ServiceError> {
            if self.reject.load(Ordering::SeqCst) {
                return Err(ServiceError::Mail(format!("connection refused by {}", settings.host)));
            }
            let mut sent = self.sent.lock().map_err(|_| ServiceError::Mail("mock lock poisoned".into()))?;
            sent.push((settings.clone(), mail));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_html_with_every_recipient() {
        let mail = OutgoingMail {
            from: "Mailer <noreply@example.com>".parse().unwrap(),
            to: vec!["a@example.com".parse().unwrap(), "b@example.com".parse().unwrap()],
            subject: "Hello".into(),
            html: "<p>hi</p>".into(),
        };
        let raw = String::from_utf8(build_message(mail).unwrap().formatted()).unwrap();
        assert!(raw.contains("From: Mailer <noreply@example.com>"), "{raw}");
        assert!(raw.contains("a@example.com"));
        assert!(raw.contains("b@example.com"));
        assert!(raw.contains("Content-Type: text/html"));
        assert!(raw.contains("<p>hi</p>"));
    }

    #[tokio::test]
    async fn transport_builds_for_each_port_family() {
        for port in [465, 587, 25] {
            let settings = SmtpSettings {
                host: "smtp.example.com".into(),
                port,
                username: "mailer".into(),
                password: "secret".into(),
            };
            assert!(SmtpMailTransport::transport(&settings).is_ok(), "port {port}");
        }
    }
}
