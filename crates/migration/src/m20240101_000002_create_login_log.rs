//! Create `login_log` table.
//!
//! Same shape as `log`, scoped to authentication attempts.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LoginLog::Table)
                    .if_not_exists()
                    .col(big_integer(LoginLog::Id).primary_key().auto_increment())
                    .col(ColumnDef::new(LoginLog::Description).string_len(255).null())
                    .col(string_len(LoginLog::LogType, 16).not_null())
                    .col(ColumnDef::new(LoginLog::Method).string_len(255).null())
                    .col(ColumnDef::new(LoginLog::Params).text().null())
                    .col(ColumnDef::new(LoginLog::RequestIp).string_len(64).null())
                    .col(ColumnDef::new(LoginLog::Username).string_len(128).null())
                    .col(big_integer(LoginLog::Time).not_null())
                    .col(ColumnDef::new(LoginLog::ExceptionDetail).text().null())
                    .col(timestamp_with_time_zone(LoginLog::CreateTime).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(LoginLog::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum LoginLog { Table, Id, Description, LogType, Method, Params, RequestIp, Username, Time, ExceptionDetail, CreateTime }
