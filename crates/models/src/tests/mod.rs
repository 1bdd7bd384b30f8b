/// Pure validation rules, no database needed
mod validation_tests {
    use crate::{admin_user, email_config, qiniu_content::NewContent};

    fn content(key: &str, type_: &str) -> NewContent {
        NewContent {
            bucket: "assets".into(),
            key: key.into(),
            size: "1 KB".into(),
            type_: type_.into(),
            url: format!("https://cdn.example.com/{key}"),
        }
    }

    #[test]
    fn email_port_must_be_numeric_and_non_zero() {
        assert_eq!(email_config::validate_port("465").unwrap(), 465);
        assert_eq!(email_config::validate_port(" 25 ").unwrap(), 25);
        assert!(email_config::validate_port("0").is_err());
        assert!(email_config::validate_port("smtp").is_err());
        assert!(email_config::validate_port("70000").is_err());
    }

    #[test]
    fn email_from_user_must_look_like_an_address() {
        assert!(email_config::validate_from_user("noreply@example.com").is_ok());
        assert!(email_config::validate_from_user("noreply").is_err());
        assert!(email_config::validate_from_user("@example.com").is_err());
        assert!(email_config::validate_host("  ").is_err());
    }

    #[test]
    fn content_name_and_suffix_split_on_last_dot() {
        let c = content("reports/2019.q2.pdf", "public");
        assert_eq!(c.name(), "reports/2019.q2");
        assert_eq!(c.suffix(), "pdf");

        let hidden = content(".env", "private");
        assert_eq!(hidden.name(), ".env");
        assert_eq!(hidden.suffix(), "");
    }

    #[test]
    fn content_type_is_public_or_private() {
        assert!(content("a.png", "public").validate().is_ok());
        assert!(content("a.png", "shared").validate().is_err());
        assert!(content(" ", "public").validate().is_err());
    }

    #[test]
    fn username_rules() {
        assert!(admin_user::validate_username("admin").is_ok());
        assert!(admin_user::validate_username("a").is_err());
        assert!(admin_user::validate_username("ad min").is_err());
    }
}

#[tokio::test]
async fn empty_database_url_is_rejected() {
    let cfg = crate::db::DatabaseConfig::default();
    let err = crate::db::connect_with_config(&cfg).await.unwrap_err();
    assert!(err.to_string().contains("database.url is empty"));
}

/// CRUD against a live Postgres; skipped when none is reachable
mod db_tests {
    use anyhow::Result;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{DatabaseConnection, EntityTrait};
    use uuid::Uuid;

    use crate::{admin_user, db::connect_with_config, email_config, qiniu_content};

    async fn db_or_skip() -> Option<DatabaseConnection> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return None;
        }
        let mut cfg = configs::load_default().map(|c| c.database).unwrap_or_default();
        cfg.normalize_from_env();
        if cfg.url.trim().is_empty() {
            eprintln!("skip: no database url configured");
            return None;
        }
        let db = match connect_with_config(&cfg).await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {}", e);
                return None;
            }
        };
        if let Err(e) = Migrator::up(&db, None).await {
            eprintln!("skip: migrate up failed: {}", e);
            return None;
        }
        Some(db)
    }

    #[tokio::test]
    async fn email_config_replace_keeps_single_row() -> Result<()> {
        let Some(db) = db_or_skip().await else { return Ok(()) };

        email_config::replace(&db, "smtp.example.com", "465", "mailer", "p1", "noreply@example.com").await?;
        let second = email_config::replace(&db, "smtp2.example.com", "587", "mailer2", "p2", "ops@example.com").await?;
        assert_eq!(second.id, email_config::SINGLETON_ID);

        let rows = email_config::Entity::find().all(&db).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].host, "smtp2.example.com");
        Ok(())
    }

    #[tokio::test]
    async fn qiniu_content_create_and_delete() -> Result<()> {
        let Some(db) = db_or_skip().await else { return Ok(()) };

        let input = qiniu_content::NewContent {
            bucket: "models-test".into(),
            key: format!("{}.txt", Uuid::new_v4()),
            size: "3 B".into(),
            type_: "public".into(),
            url: "https://cdn.example.com/x.txt".into(),
        };
        let created = qiniu_content::create(&db, &input).await?;
        assert_eq!(created.suffix, "txt");

        let found = qiniu_content::Entity::find_by_id(created.id).one(&db).await?;
        assert!(found.is_some());

        qiniu_content::Entity::delete_by_id(created.id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn admin_user_unique_username() -> Result<()> {
        let Some(db) = db_or_skip().await else { return Ok(()) };

        let name = format!("user_{}", Uuid::new_v4().simple());
        let u = admin_user::create(&db, &name, "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA").await?;
        assert!(u.enabled);
        assert!(admin_user::create(&db, &name, "$argon2id$other").await.is_err());

        let found = admin_user::find_by_username(&db, &name).await?;
        assert_eq!(found.map(|f| f.id), Some(u.id));

        admin_user::Entity::delete_by_id(u.id).exec(&db).await?;
        Ok(())
    }
}
