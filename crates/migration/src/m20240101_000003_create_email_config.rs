//! Create `email_config` table.
//!
//! Holds a single row (id = 1) replaced wholesale on every update.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmailConfig::Table)
                    .if_not_exists()
                    .col(integer(EmailConfig::Id).primary_key())
                    .col(string_len(EmailConfig::Host, 255).not_null())
                    .col(string_len(EmailConfig::Port, 8).not_null())
                    .col(string_len(EmailConfig::User, 255).not_null())
                    .col(string_len(EmailConfig::Pass, 255).not_null())
                    .col(string_len(EmailConfig::FromUser, 255).not_null())
                    .col(timestamp_with_time_zone(EmailConfig::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(EmailConfig::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum EmailConfig { Table, Id, Host, Port, User, Pass, FromUser, UpdatedAt }
