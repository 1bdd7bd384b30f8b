use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

/// Metadata of one object stored in the file-storage bucket.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "qiniu_content")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub bucket: String,
    pub name: String,
    /// human readable, e.g. "12.5 KB"
    pub size: String,
    /// "public" or "private" bucket visibility
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub type_: String,
    pub key: String,
    pub url: String,
    pub suffix: String,
    pub update_time: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Fields needed to register an object's metadata.
#[derive(Clone, Debug, Deserialize)]
pub struct NewContent {
    pub bucket: String,
    pub key: String,
    pub size: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub url: String,
}

impl NewContent {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        if self.bucket.trim().is_empty() {
            return Err(errors::ModelError::Validation("bucket required".into()));
        }
        if self.key.trim().is_empty() {
            return Err(errors::ModelError::Validation("key required".into()));
        }
        if !(self.type_ == "public" || self.type_ == "private") {
            return Err(errors::ModelError::Validation("type must be public or private".into()));
        }
        Ok(())
    }

    /// Display name: the key without its extension.
    pub fn name(&self) -> String {
        match self.key.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem.to_string(),
            _ => self.key.clone(),
        }
    }

    pub fn suffix(&self) -> String {
        match self.key.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ext.to_string(),
            _ => String::new(),
        }
    }
}

pub async fn create(db: &DatabaseConnection, input: &NewContent) -> Result<Model, errors::ModelError> {
    input.validate()?;
    let am = ActiveModel {
        bucket: Set(input.bucket.clone()),
        name: Set(input.name()),
        size: Set(input.size.clone()),
        type_: Set(input.type_.clone()),
        key: Set(input.key.clone()),
        url: Set(input.url.clone()),
        suffix: Set(input.suffix()),
        update_time: Set(Utc::now().into()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
