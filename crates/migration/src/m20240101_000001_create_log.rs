//! Create `log` table.
//!
//! One row per intercepted operation, INFO on success and ERROR on failure.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Log::Table)
                    .if_not_exists()
                    .col(big_integer(Log::Id).primary_key().auto_increment())
                    .col(ColumnDef::new(Log::Description).string_len(255).null())
                    .col(string_len(Log::LogType, 16).not_null())
                    .col(ColumnDef::new(Log::Method).string_len(255).null())
                    .col(ColumnDef::new(Log::Params).text().null())
                    .col(ColumnDef::new(Log::RequestIp).string_len(64).null())
                    .col(ColumnDef::new(Log::Username).string_len(128).null())
                    .col(big_integer(Log::Time).not_null())
                    .col(ColumnDef::new(Log::ExceptionDetail).text().null())
                    .col(timestamp_with_time_zone(Log::CreateTime).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Log::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Log { Table, Id, Description, LogType, Method, Params, RequestIp, Username, Time, ExceptionDetail, CreateTime }
