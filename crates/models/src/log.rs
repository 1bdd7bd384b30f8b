use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Column widths (characters) shared by `log` and `login_log`.
pub const DESCRIPTION_MAX_CHARS: usize = 255;
pub const METHOD_MAX_CHARS: usize = 255;
pub const REQUEST_IP_MAX_CHARS: usize = 64;
pub const USERNAME_MAX_CHARS: usize = 128;

/// Severity of a persisted operation record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogType {
    Info,
    Error,
}

impl LogType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::Info => "INFO",
            LogType::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for LogType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub description: Option<String>,
    pub log_type: String,
    pub method: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub params: Option<String>,
    pub request_ip: Option<String>,
    pub username: Option<String>,
    /// elapsed milliseconds
    pub time: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub exception_detail: Option<String>,
    pub create_time: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
