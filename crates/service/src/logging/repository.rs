use async_trait::async_trait;

use common::pagination::{Page, Pagination};

use super::domain::{LogFilter, LogRecord, NewLogRecord};
use crate::errors::ServiceError;

/// Persistence for operation and login records.
#[async_trait]
pub trait LogRepository: Send + Sync {
    async fn save_log(&self, record: NewLogRecord) -> Result<LogRecord, ServiceError>;
    async fn save_login_log(&self, record: NewLogRecord) -> Result<LogRecord, ServiceError>;

    /// Newest first.
    async fn list_logs(&self, filter: &LogFilter, page: Pagination) -> Result<Page<LogRecord>, ServiceError>;
    /// Newest first.
    async fn list_login_logs(&self, filter: &LogFilter, page: Pagination) -> Result<Page<LogRecord>, ServiceError>;
    async fn find_log(&self, id: i64) -> Result<Option<LogRecord>, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use models::log;
    use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockLogRepository {
        logs: Mutex<Vec<LogRecord>>,
        login_logs: Mutex<Vec<LogRecord>>,
        next_id: AtomicI64,
        fail_writes: AtomicBool,
    }

    impl MockLogRepository {
        /// Make every subsequent save fail with a database error.
        pub fn fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }

        pub fn logs(&self) -> Vec<LogRecord> {
            self.logs.lock().map(|l| l.clone()).unwrap_or_default()
        }

        pub fn login_logs(&self) -> Vec<LogRecord> {
            self.login_logs.lock().map(|l| l.clone()).unwrap_or_default()
        }

        fn store(&self, table: &Mutex<Vec<LogRecord>>, rec: NewLogRecord) -> Result<LogRecord, ServiceError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(ServiceError::Db("mock write failure".into()));
            }
            check_width("description", &rec.description, log::DESCRIPTION_MAX_CHARS)?;
            check_width("method", &rec.method, log::METHOD_MAX_CHARS)?;
            check_width("request_ip", &rec.request_ip, log::REQUEST_IP_MAX_CHARS)?;
            check_width("username", &rec.username, log::USERNAME_MAX_CHARS)?;
            let record = LogRecord {
                id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
                description: rec.description,
                log_type: rec.log_type.as_str().to_string(),
                method: rec.method,
                params: rec.params,
                request_ip: rec.request_ip,
                username: rec.username,
                time: rec.time,
                exception_detail: rec.exception_detail,
                create_time: chrono::Utc::now().into(),
            };
            let mut rows = table.lock().map_err(|_| ServiceError::Db("mock lock poisoned".into()))?;
            rows.push(record.clone());
            Ok(record)
        }

        fn page(table: &Mutex<Vec<LogRecord>>, filter: &LogFilter, page: Pagination) -> Result<Page<LogRecord>, ServiceError> {
            let rows = table.lock().map_err(|_| ServiceError::Db("mock lock poisoned".into()))?;
            let matching: Vec<LogRecord> = rows.iter().rev().filter(|r| filter.matches(r)).cloned().collect();
            Ok(Page::from_slice(&matching, page))
        }
    }

    /// Same rejection the varchar columns give on insert.
    fn check_width(column: &str, value: &Option<String>, max_chars: usize) -> Result<(), ServiceError> {
        match value {
            Some(v) if v.chars().count() > max_chars => Err(ServiceError::Db(format!(
                "value too long for type character varying({max_chars}) in column {column}"
            ))),
            _ => Ok(()),
        }
    }

    #[async_trait]
    impl LogRepository for MockLogRepository {
        async fn save_log(&self, record: NewLogRecord) -> Result<LogRecord, ServiceError> {
            self.store(&self.logs, record)
        }

        async fn save_login_log(&self, record: NewLogRecord) -> Result<LogRecord, ServiceError> {
            self.store(&self.login_logs, record)
        }

        async fn list_logs(&self, filter: &LogFilter, page: Pagination) -> Result<Page<LogRecord>, ServiceError> {
            Self::page(&self.logs, filter, page)
        }

        async fn list_login_logs(&self, filter: &LogFilter, page: Pagination) -> Result<Page<LogRecord>, ServiceError> {
            Self::page(&self.login_logs, filter, page)
        }

        async fn find_log(&self, id: i64) -> Result<Option<LogRecord>, ServiceError> {
            let rows = self.logs.lock().map_err(|_| ServiceError::Db("mock lock poisoned".into()))?;
            Ok(rows.iter().find(|r| r.id == id).cloned())
        }
    }
}
