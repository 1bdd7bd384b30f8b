//! Operation and login logging.
//!
//! `interceptor` wraps service calls and persists one record per call
//! through a `LogRepository`; `query` reads the records back for the
//! admin endpoints.

pub mod domain;
pub mod interceptor;
pub mod metrics;
pub mod query;
pub mod repo;
pub mod repository;

pub use domain::{JoinPoint, LogFilter, LogRecord, NewLogRecord};
pub use interceptor::LogInterceptor;
pub use models::log::LogType;
pub use query::LogQueryService;
