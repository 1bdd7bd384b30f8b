use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use models::log::{self, LogType};

/// The intercepted invocation: what is being called and on whose behalf.
#[derive(Debug, Clone, Default)]
pub struct JoinPoint {
    /// Operation identifier, e.g. `email::send`.
    pub method: String,
    /// Human readable description stored with the record.
    pub description: Option<String>,
    /// JSON rendering of the call arguments.
    pub params: Option<String>,
    pub username: Option<String>,
    pub request_ip: Option<String>,
}

impl JoinPoint {
    pub fn new(method: impl Into<String>) -> Self {
        Self { method: method.into(), ..Self::default() }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Arguments that fail to serialize are recorded as absent.
    pub fn with_params<P: Serialize + ?Sized>(mut self, params: &P) -> Self {
        self.params = serde_json::to_string(params).ok();
        self
    }

    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username;
        self
    }

    pub fn with_request_ip(mut self, request_ip: Option<String>) -> Self {
        self.request_ip = request_ip;
        self
    }
}

/// A record about to be persisted; never mutated after insert.
#[derive(Debug, Clone)]
pub struct NewLogRecord {
    pub log_type: LogType,
    /// elapsed milliseconds
    pub time: i64,
    pub description: Option<String>,
    pub method: Option<String>,
    pub params: Option<String>,
    pub request_ip: Option<String>,
    pub username: Option<String>,
    pub exception_detail: Option<String>,
}

impl NewLogRecord {
    /// Caller-supplied fields are cut to their column widths so an
    /// oversized value cannot make the insert fail.
    pub fn from_join_point(join_point: &JoinPoint, log_type: LogType, time: i64) -> Self {
        Self {
            log_type,
            time,
            description: clip(join_point.description.as_deref(), log::DESCRIPTION_MAX_CHARS),
            method: clip(Some(&join_point.method), log::METHOD_MAX_CHARS),
            params: join_point.params.clone(),
            request_ip: clip(join_point.request_ip.as_deref(), log::REQUEST_IP_MAX_CHARS),
            username: clip(join_point.username.as_deref(), log::USERNAME_MAX_CHARS),
            exception_detail: None,
        }
    }
}

fn clip(value: Option<&str>, max_chars: usize) -> Option<String> {
    value.map(|v| match v.char_indices().nth(max_chars) {
        Some((end, _)) => v[..end].to_string(),
        None => v.to_string(),
    })
}

/// A persisted record from either the `log` or the `login_log` table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub id: i64,
    pub description: Option<String>,
    pub log_type: String,
    pub method: Option<String>,
    pub params: Option<String>,
    pub request_ip: Option<String>,
    pub username: Option<String>,
    pub time: i64,
    /// Served separately by id, kept out of list responses.
    #[serde(skip_serializing)]
    pub exception_detail: Option<String>,
    pub create_time: DateTime<FixedOffset>,
}

impl From<models::log::Model> for LogRecord {
    fn from(m: models::log::Model) -> Self {
        Self {
            id: m.id,
            description: m.description,
            log_type: m.log_type,
            method: m.method,
            params: m.params,
            request_ip: m.request_ip,
            username: m.username,
            time: m.time,
            exception_detail: m.exception_detail,
            create_time: m.create_time,
        }
    }
}

impl From<models::login_log::Model> for LogRecord {
    fn from(m: models::login_log::Model) -> Self {
        Self {
            id: m.id,
            description: m.description,
            log_type: m.log_type,
            method: m.method,
            params: m.params,
            request_ip: m.request_ip,
            username: m.username,
            time: m.time,
            exception_detail: m.exception_detail,
            create_time: m.create_time,
        }
    }
}

/// Listing filter; `description` is a substring match.
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    pub log_type: Option<LogType>,
    pub description: Option<String>,
}

impl LogFilter {
    pub fn of_type(log_type: LogType) -> Self {
        Self { log_type: Some(log_type), description: None }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }

    pub fn matches(&self, record: &LogRecord) -> bool {
        if let Some(t) = self.log_type {
            if record.log_type != t.as_str() {
                return false;
            }
        }
        match self.description() {
            Some(d) => record.description.as_deref().is_some_and(|rd| rd.contains(d)),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(log_type: LogType, description: Option<&str>) -> LogRecord {
        LogRecord {
            id: 1,
            description: description.map(str::to_string),
            log_type: log_type.as_str().to_string(),
            method: None,
            params: None,
            request_ip: None,
            username: None,
            time: 0,
            exception_detail: None,
            create_time: Utc::now().into(),
        }
    }

    #[test]
    fn join_point_builder_copies_into_record() {
        let jp = JoinPoint::new("email::send")
            .describe("send email")
            .with_params(&serde_json::json!({"subject": "hi"}))
            .with_username(Some("admin".into()))
            .with_request_ip(Some("10.0.0.1".into()));
        let rec = NewLogRecord::from_join_point(&jp, LogType::Info, 7);
        assert_eq!(rec.method.as_deref(), Some("email::send"));
        assert_eq!(rec.description.as_deref(), Some("send email"));
        assert_eq!(rec.params.as_deref(), Some(r#"{"subject":"hi"}"#));
        assert_eq!(rec.username.as_deref(), Some("admin"));
        assert_eq!(rec.request_ip.as_deref(), Some("10.0.0.1"));
        assert_eq!(rec.time, 7);
        assert!(rec.exception_detail.is_none());
    }

    #[test]
    fn oversized_fields_are_cut_to_column_width() {
        let jp = JoinPoint::new("auth::login")
            .describe("d".repeat(300))
            .with_username(Some("é".repeat(200)))
            .with_request_ip(Some(vec!["203.0.113.7"; 20].join(", ")));
        let rec = NewLogRecord::from_join_point(&jp, LogType::Error, 0);
        assert_eq!(rec.description.as_deref().map(|d| d.chars().count()), Some(log::DESCRIPTION_MAX_CHARS));
        assert_eq!(rec.username, Some("é".repeat(log::USERNAME_MAX_CHARS)));
        let ip = rec.request_ip.unwrap_or_default();
        assert_eq!(ip.chars().count(), log::REQUEST_IP_MAX_CHARS);
        assert!(ip.starts_with("203.0.113.7, "));
        assert_eq!(rec.method.as_deref(), Some("auth::login"));
    }

    #[test]
    fn filter_by_type_and_description() {
        let f = LogFilter { log_type: Some(LogType::Error), description: Some("mail".into()) };
        assert!(f.matches(&record(LogType::Error, Some("send email"))));
        assert!(!f.matches(&record(LogType::Info, Some("send email"))));
        assert!(!f.matches(&record(LogType::Error, None)));
        assert!(LogFilter { log_type: None, description: Some(String::new()) }.matches(&record(LogType::Info, None)));
    }

    #[test]
    fn list_rendering_hides_exception_detail() {
        let mut r = record(LogType::Error, Some("x"));
        r.exception_detail = Some("trace".into());
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("exceptionDetail").is_none());
        assert_eq!(json["logType"], "ERROR");
    }
}
