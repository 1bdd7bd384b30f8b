use std::sync::Arc;

use common::pagination::{Page, Pagination};
use models::qiniu_content;

use super::repository::ContentRepository;
use super::query::ContentQuery;
use crate::errors::ServiceError;

/// Read access to file-storage object metadata.
#[derive(Clone)]
pub struct ContentService {
    repo: Arc<dyn ContentRepository>,
}

impl ContentService {
    pub fn new(repo: Arc<dyn ContentRepository>) -> Self { Self { repo } }

    pub async fn list(
        &self,
        query: &ContentQuery,
        page: Pagination,
    ) -> Result<Page<qiniu_content::Model>, ServiceError> {
        self.repo.find_page(query, page).await
    }
}
