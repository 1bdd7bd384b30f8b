use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

/// The configuration table only ever holds this row.
pub const SINGLETON_ID: i32 = 1;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "email_config")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub host: String,
    pub port: String,
    pub user: String,
    pub pass: String,
    pub from_user: String,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_host(host: &str) -> Result<(), errors::ModelError> {
    if host.trim().is_empty() {
        return Err(errors::ModelError::Validation("host required".into()));
    }
    Ok(())
}

pub fn validate_port(port: &str) -> Result<u16, errors::ModelError> {
    match port.trim().parse::<u16>() {
        Ok(p) if p > 0 => Ok(p),
        _ => Err(errors::ModelError::Validation("port must be within 1..=65535".into())),
    }
}

pub fn validate_from_user(from_user: &str) -> Result<(), errors::ModelError> {
    let (local, domain) = from_user
        .split_once('@')
        .ok_or_else(|| errors::ModelError::Validation("from_user must be an email address".into()))?;
    if local.is_empty() || domain.is_empty() {
        return Err(errors::ModelError::Validation("from_user must be an email address".into()));
    }
    Ok(())
}

pub async fn find(db: &DatabaseConnection) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find_by_id(SINGLETON_ID).one(db).await?)
}

/// Replace the singleton row wholesale, inserting it on first use.
pub async fn replace(
    db: &DatabaseConnection,
    host: &str,
    port: &str,
    user: &str,
    pass: &str,
    from_user: &str,
) -> Result<Model, errors::ModelError> {
    validate_host(host)?;
    validate_port(port)?;
    if user.trim().is_empty() {
        return Err(errors::ModelError::Validation("user required".into()));
    }
    validate_from_user(from_user)?;

    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(SINGLETON_ID),
        host: Set(host.trim().to_string()),
        port: Set(port.trim().to_string()),
        user: Set(user.to_string()),
        pass: Set(pass.to_string()),
        from_user: Set(from_user.to_string()),
        updated_at: Set(now),
    };
    if find(db).await?.is_some() {
        Ok(am.update(db).await?)
    } else {
        Ok(am.insert(db).await?)
    }
}
