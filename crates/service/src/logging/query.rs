use std::sync::Arc;

use serde::Serialize;

use common::pagination::{Page, Pagination};
use models::log::LogType;

use super::domain::{LogFilter, LogRecord};
use super::repository::LogRepository;
use crate::errors::ServiceError;

/// Trace of one failed operation.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub exception: String,
}

/// Read side of the operation and login logs.
pub struct LogQueryService {
    repo: Arc<dyn LogRepository>,
}

impl LogQueryService {
    pub fn new(repo: Arc<dyn LogRepository>) -> Self { Self { repo } }

    pub async fn list_info(&self, description: Option<String>, page: Pagination) -> Result<Page<LogRecord>, ServiceError> {
        let filter = LogFilter { description, ..LogFilter::of_type(LogType::Info) };
        self.repo.list_logs(&filter, page).await
    }

    pub async fn list_errors(&self, description: Option<String>, page: Pagination) -> Result<Page<LogRecord>, ServiceError> {
        let filter = LogFilter { description, ..LogFilter::of_type(LogType::Error) };
        self.repo.list_logs(&filter, page).await
    }

    pub async fn list_login_logs(&self, description: Option<String>, page: Pagination) -> Result<Page<LogRecord>, ServiceError> {
        let filter = LogFilter { log_type: None, description };
        self.repo.list_login_logs(&filter, page).await
    }

    /// The stored trace of an ERROR record; INFO records have none.
    pub async fn error_detail(&self, id: i64) -> Result<ErrorDetail, ServiceError> {
        let record = self.repo.find_log(id).await?.ok_or_else(|| ServiceError::not_found("log"))?;
        match record.exception_detail {
            Some(exception) if record.log_type == LogType::Error.as_str() => Ok(ErrorDetail { exception }),
            _ => Err(ServiceError::not_found("error log")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::domain::NewLogRecord;
    use crate::logging::repository::mock::MockLogRepository;

    fn rec(log_type: LogType, description: &str, detail: Option<&str>) -> NewLogRecord {
        NewLogRecord {
            log_type,
            time: 1,
            description: Some(description.into()),
            method: None,
            params: None,
            request_ip: None,
            username: None,
            exception_detail: detail.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn lists_split_by_level_newest_first() {
        let repo = Arc::new(MockLogRepository::default());
        repo.save_log(rec(LogType::Info, "configure email", None)).await.unwrap();
        repo.save_log(rec(LogType::Error, "send email", Some("trace"))).await.unwrap();
        repo.save_log(rec(LogType::Info, "send email", None)).await.unwrap();
        let svc = LogQueryService::new(repo);

        let info = svc.list_info(None, Pagination::default()).await.unwrap();
        assert_eq!(info.total_elements, 2);
        assert_eq!(info.content[0].description.as_deref(), Some("send email"));

        let errors = svc.list_errors(Some("send".into()), Pagination::default()).await.unwrap();
        assert_eq!(errors.total_elements, 1);
    }

    #[tokio::test]
    async fn error_detail_only_for_error_records() {
        let repo = Arc::new(MockLogRepository::default());
        let info = repo.save_log(rec(LogType::Info, "ok", None)).await.unwrap();
        let err = repo.save_log(rec(LogType::Error, "bad", Some("trace text"))).await.unwrap();
        let svc = LogQueryService::new(repo);

        assert_eq!(svc.error_detail(err.id).await.unwrap().exception, "trace text");
        assert!(matches!(svc.error_detail(info.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.error_detail(999).await, Err(ServiceError::NotFound(_))));
    }
}
