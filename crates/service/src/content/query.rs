//! Filter for the file-storage content listing.
//!
//! The filter object becomes a `sea_orm::Condition` (a conjunction of zero
//! or more predicates) for the database, and the same predicate is
//! available in memory through [`ContentQuery::matches`].

use models::qiniu_content;
use sea_orm::Condition;
use serde::Deserialize;

use crate::like;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ContentQuery {
    /// Substring of the object key; absent or empty means no filtering.
    pub key: Option<String>,
}

impl ContentQuery {
    pub fn by_key(key: impl Into<String>) -> Self {
        Self { key: Some(key.into()) }
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref().filter(|k| !k.is_empty())
    }

    pub fn condition(&self) -> Condition {
        let mut cond = Condition::all();
        if let Some(key) = self.key() {
            cond = cond.add(like::contains((qiniu_content::Entity, qiniu_content::Column::Key), key));
        }
        cond
    }

    pub fn matches(&self, record: &qiniu_content::Model) -> bool {
        self.key().map_or(true, |key| record.key.contains(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    fn record(key: &str) -> qiniu_content::Model {
        qiniu_content::Model {
            id: 1,
            bucket: "assets".into(),
            name: key.into(),
            size: "1 KB".into(),
            type_: "public".into(),
            key: key.into(),
            url: format!("https://cdn.example.com/{key}"),
            suffix: String::new(),
            update_time: Utc::now().into(),
        }
    }

    fn sql(query: &ContentQuery) -> String {
        qiniu_content::Entity::find()
            .filter(query.condition())
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn absent_or_empty_key_matches_everything() {
        let keys = ["", "a", "avatar.png", "docs/report.pdf"];
        for q in [ContentQuery::default(), ContentQuery::by_key("")] {
            assert!(q.condition().is_empty());
            assert!(keys.iter().all(|k| q.matches(&record(k))));
        }
    }

    #[test]
    fn key_matches_exactly_the_records_containing_it() {
        let q = ContentQuery::by_key("port");
        let keys = ["report.pdf", "portrait.png", "sport", "PORT.txt", "po rt", "logo.png"];
        let hits: Vec<&str> = keys.iter().copied().filter(|k| q.matches(&record(k))).collect();
        assert_eq!(hits, vec!["report.pdf", "portrait.png", "sport"]);
    }

    #[test]
    fn key_becomes_a_single_like_predicate() {
        let q = ContentQuery::by_key("avatar");
        assert_eq!(q.condition().len(), 1);
        let sql = sql(&q);
        assert!(sql.contains("LIKE"), "{sql}");
        assert!(sql.contains("%avatar%"), "{sql}");
        assert!(sql.contains("ESCAPE"), "{sql}");
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        let sql = sql(&ContentQuery::by_key("50%_off"));
        assert!(sql.contains("ESCAPE"), "{sql}");
        assert!(!sql.contains("'%50%_off%'"), "{sql}");

        let q = ContentQuery::by_key("50%");
        assert!(q.matches(&record("sale-50%.png")));
        assert!(!q.matches(&record("sale-500.png")));
    }
}
