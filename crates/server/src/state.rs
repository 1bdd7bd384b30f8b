use std::sync::Arc;

use sea_orm::DatabaseConnection;

use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::{AuthConfig, AuthService};
use service::content::repo::seaorm::SeaOrmContentRepository;
use service::content::ContentService;
use service::email::repo::seaorm::SeaOrmEmailConfigRepository;
use service::email::transport::SmtpMailTransport;
use service::email::EmailService;
use service::logging::repo::seaorm::SeaOrmLogRepository;
use service::logging::{LogInterceptor, LogQueryService};

/// Shared handler state; every service sits behind an `Arc`'d trait object
/// so tests can swap in the in-memory repositories.
#[derive(Clone)]
pub struct ServerState {
    pub interceptor: LogInterceptor,
    pub auth: AuthService,
    pub email: EmailService,
    pub content: ContentService,
    pub logs: Arc<LogQueryService>,
}

impl ServerState {
    pub fn from_db(db: DatabaseConnection, auth: AuthConfig) -> Self {
        let log_repo = Arc::new(SeaOrmLogRepository { db: db.clone() });
        Self {
            interceptor: LogInterceptor::new(log_repo.clone()),
            auth: AuthService::new(Arc::new(SeaOrmAuthRepository { db: db.clone() }), auth),
            email: EmailService::new(
                Arc::new(SeaOrmEmailConfigRepository { db: db.clone() }),
                Arc::new(SmtpMailTransport),
            ),
            content: ContentService::new(Arc::new(SeaOrmContentRepository { db })),
            logs: Arc::new(LogQueryService::new(log_repo)),
        }
    }
}
