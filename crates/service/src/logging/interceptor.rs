//! Logging interceptor wrapped around service calls.
//!
//! Every wrapped call produces exactly one record in the general `log`
//! table (or in `login_log` for authentication calls): INFO with the
//! elapsed time on success, ERROR with the elapsed time and the captured
//! error trace on failure. Failures are re-signalled to the caller as
//! [`ServiceError::BadRequest`] carrying the original message.
//!
//! Timing state lives on the stack of each call, so concurrent calls never
//! observe each other's start time.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Serialize;
use tokio::time::Instant;
use tracing::{error, info, warn};

use models::log::LogType;

use super::domain::{JoinPoint, NewLogRecord};
use super::metrics::OperationMetrics;
use super::repository::LogRepository;
use crate::errors::ServiceError;

/// Description of the general-log entry duplicated from a failed login.
pub const LOGIN_DESCRIPTION: &str = "login";

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RecordKind {
    Operation,
    Login,
}

impl RecordKind {
    fn as_str(self) -> &'static str {
        match self {
            RecordKind::Operation => "operation",
            RecordKind::Login => "login",
        }
    }
}

/// Error text captured at the interception site.
struct Captured {
    message: String,
    trace: String,
}

fn capture<E>(err: E) -> Captured
where
    E: Into<anyhow::Error>,
{
    let type_name = std::any::type_name::<E>();
    let err: anyhow::Error = err.into();
    Captured { message: err.to_string(), trace: stack_trace(type_name, &err) }
}

/// Render an error the way a stack trace reads: the error type, its
/// message, the `Caused by` chain and, when `RUST_BACKTRACE` enables it,
/// the backtrace. Never empty.
pub fn stack_trace(type_name: &str, err: &anyhow::Error) -> String {
    format!("{type_name}: {err:?}")
}

fn elapsed_millis(started: Instant) -> i64 {
    i64::try_from(started.elapsed().as_millis()).unwrap_or(i64::MAX)
}

#[derive(Clone)]
pub struct LogInterceptor {
    repo: Arc<dyn LogRepository>,
    metrics: OperationMetrics,
}

impl LogInterceptor {
    pub fn new(repo: Arc<dyn LogRepository>) -> Self {
        Self { repo, metrics: OperationMetrics::global() }
    }

    pub fn with_metrics(mut self, metrics: OperationMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Run `op` and record its outcome in the general log.
    pub async fn around<T, E, Fut>(&self, join_point: JoinPoint, op: Fut) -> Result<T, ServiceError>
    where
        Fut: Future<Output = Result<T, E>>,
        E: Into<anyhow::Error>,
    {
        let started = Instant::now();
        let outcome = op.await;
        let time = elapsed_millis(started);
        let level = if outcome.is_ok() { LogType::Info } else { LogType::Error };
        self.metrics.observe(RecordKind::Operation.as_str(), level, time);

        match outcome {
            Ok(value) => {
                info!(method = %join_point.method, time_ms = time, "operation completed");
                let record = NewLogRecord::from_join_point(&join_point, LogType::Info, time);
                self.persist(RecordKind::Operation, record).await;
                Ok(value)
            }
            Err(e) => {
                let captured = capture(e);
                warn!(method = %join_point.method, time_ms = time, err = %captured.message, "operation failed");
                let mut record = NewLogRecord::from_join_point(&join_point, LogType::Error, time);
                record.exception_detail = Some(captured.trace);
                self.persist(RecordKind::Operation, record).await;
                Err(ServiceError::BadRequest(captured.message))
            }
        }
    }

    /// Run an authentication call and record it in the login log. A failed
    /// attempt is also written to the general log under [`LOGIN_DESCRIPTION`].
    pub async fn around_login<T, E, Fut>(&self, join_point: JoinPoint, op: Fut) -> Result<T, ServiceError>
    where
        Fut: Future<Output = Result<T, E>>,
        E: Into<anyhow::Error>,
    {
        let started = Instant::now();
        let outcome = op.await;
        let time = elapsed_millis(started);
        let level = if outcome.is_ok() { LogType::Info } else { LogType::Error };
        self.metrics.observe(RecordKind::Login.as_str(), level, time);

        match outcome {
            Ok(value) => {
                info!(method = %join_point.method, time_ms = time, "login succeeded");
                let record = NewLogRecord::from_join_point(&join_point, LogType::Info, time);
                self.persist(RecordKind::Login, record).await;
                Ok(value)
            }
            Err(e) => {
                let captured = capture(e);
                warn!(method = %join_point.method, time_ms = time, err = %captured.message, "login failed");
                let login_record = NewLogRecord::from_join_point(&join_point, LogType::Error, time);
                self.persist(RecordKind::Login, login_record).await;

                let mut general = NewLogRecord::from_join_point(&join_point, LogType::Error, time);
                general.description = Some(LOGIN_DESCRIPTION.to_string());
                general.exception_detail = Some(captured.trace);
                self.persist(RecordKind::Operation, general).await;
                Err(ServiceError::BadRequest(captured.message))
            }
        }
    }

    /// Decorator form of [`around`](Self::around): returns an operation that
    /// logs every invocation of `op`, recording its argument as the params.
    pub fn wrap<A, T, E, F, Fut>(
        &self,
        template: JoinPoint,
        op: F,
    ) -> impl Fn(A) -> BoxFuture<'static, Result<T, ServiceError>> + Clone + Send + Sync
    where
        A: Serialize + Send + 'static,
        F: Fn(A) -> Fut + Clone + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Into<anyhow::Error> + Send + 'static,
    {
        let interceptor = self.clone();
        move |arg: A| -> BoxFuture<'static, Result<T, ServiceError>> {
            let interceptor = interceptor.clone();
            let join_point = template.clone().with_params(&arg);
            let fut = op(arg);
            Box::pin(async move { interceptor.around(join_point, fut).await })
        }
    }

    async fn persist(&self, kind: RecordKind, record: NewLogRecord) {
        let method = record.method.clone().unwrap_or_default();
        let result = match kind {
            RecordKind::Operation => self.repo.save_log(record).await,
            RecordKind::Login => self.repo.save_login_log(record).await,
        };
        if let Err(e) = result {
            error!(kind = kind.as_str(), %method, err = %e, "failed to persist log record");
        }
    }
}
