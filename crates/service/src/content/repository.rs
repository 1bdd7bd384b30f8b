use async_trait::async_trait;

use common::pagination::{Page, Pagination};
use models::qiniu_content;

use super::query::ContentQuery;
use crate::errors::ServiceError;

#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Records matching `query`, newest first.
    async fn find_page(
        &self,
        query: &ContentQuery,
        page: Pagination,
    ) -> Result<Page<qiniu_content::Model>, ServiceError>;
}

/// Simple in-memory mock repository for tests
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockContentRepository {
        rows: Mutex<Vec<qiniu_content::Model>>,
        next_id: AtomicI64,
    }

    impl MockContentRepository {
        pub fn insert(&self, input: &qiniu_content::NewContent) -> Result<qiniu_content::Model, ServiceError> {
            input.validate()?;
            let model = qiniu_content::Model {
                id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
                bucket: input.bucket.clone(),
                name: input.name(),
                size: input.size.clone(),
                type_: input.type_.clone(),
                key: input.key.clone(),
                url: input.url.clone(),
                suffix: input.suffix(),
                update_time: Utc::now().into(),
            };
            let mut rows = self.rows.lock().map_err(|_| ServiceError::Db("mock lock poisoned".into()))?;
            rows.push(model.clone());
            Ok(model)
        }
    }

    #[async_trait]
    impl ContentRepository for MockContentRepository {
        async fn find_page(
            &self,
            query: &ContentQuery,
            page: Pagination,
        ) -> Result<Page<qiniu_content::Model>, ServiceError> {
            let rows = self.rows.lock().map_err(|_| ServiceError::Db("mock lock poisoned".into()))?;
            let matching: Vec<_> = rows.iter().rev().filter(|r| query.matches(r)).cloned().collect();
            Ok(Page::from_slice(&matching, page))
        }
    }
}
