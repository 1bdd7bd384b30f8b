//! Migrator registering table migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_log;
mod m20240101_000002_create_login_log;
mod m20240101_000003_create_email_config;
mod m20240101_000004_create_qiniu_content;
mod m20240101_000005_create_admin_user;
mod m20240101_000006_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_log::Migration),
            Box::new(m20240101_000002_create_login_log::Migration),
            Box::new(m20240101_000003_create_email_config::Migration),
            Box::new(m20240101_000004_create_qiniu_content::Migration),
            Box::new(m20240101_000005_create_admin_user::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000006_add_indexes::Migration),
        ]
    }
}
