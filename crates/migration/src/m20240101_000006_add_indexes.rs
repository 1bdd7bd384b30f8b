use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Log: listing filters on level and sorts by time
        manager
            .create_index(
                Index::create()
                    .name("idx_log_type_time")
                    .table(Log::Table)
                    .col(Log::LogType)
                    .col(Log::CreateTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_login_log_time")
                    .table(LoginLog::Table)
                    .col(LoginLog::CreateTime)
                    .to_owned(),
            )
            .await?;

        // QiniuContent: one object per bucket key
        manager
            .create_index(
                Index::create()
                    .name("uniq_qiniu_content_bucket_key")
                    .table(QiniuContent::Table)
                    .col(QiniuContent::Bucket)
                    .col(QiniuContent::Key)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_qiniu_content_bucket_key").table(QiniuContent::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_login_log_time").table(LoginLog::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_log_type_time").table(Log::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Log { Table, LogType, CreateTime }

#[derive(DeriveIden)]
enum LoginLog { Table, CreateTime }

#[derive(DeriveIden)]
enum QiniuContent { Table, Bucket, Key }
