//! Authentication attempts; columns mirror [`crate::log`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "login_log")]
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
    pub time: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub exception_detail: Option<String>,
    pub create_time: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
