//! Create `qiniu_content` table.
//!
//! Metadata of objects kept in the file storage bucket; `key` is searchable.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(QiniuContent::Table)
                    .if_not_exists()
                    .col(big_integer(QiniuContent::Id).primary_key().auto_increment())
                    .col(string_len(QiniuContent::Bucket, 255).not_null())
                    .col(string_len(QiniuContent::Name, 255).not_null())
                    .col(string_len(QiniuContent::Size, 64).not_null())
                    .col(string_len(QiniuContent::Type, 16).not_null())
                    .col(string_len(QiniuContent::Key, 512).not_null())
                    .col(string_len(QiniuContent::Url, 1024).not_null())
                    .col(string_len(QiniuContent::Suffix, 32).not_null())
                    .col(timestamp_with_time_zone(QiniuContent::UpdateTime).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(QiniuContent::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum QiniuContent { Table, Id, Bucket, Name, Size, Type, Key, Url, Suffix, UpdateTime }
