use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

use common::pagination::{Page, Pagination};
use models::qiniu_content;

use crate::content::repository::ContentRepository;
use crate::content::query::ContentQuery;
use crate::errors::ServiceError;

pub struct SeaOrmContentRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl ContentRepository for SeaOrmContentRepository {
    async fn find_page(
        &self,
        query: &ContentQuery,
        opts: Pagination,
    ) -> Result<Page<qiniu_content::Model>, ServiceError> {
        let (page_idx, per_page) = opts.normalize();
        let paginator = qiniu_content::Entity::find()
            .filter(query.condition())
            .order_by_desc(qiniu_content::Column::Id)
            .paginate(&self.db, per_page);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page_idx).await?;
        Ok(Page::new(rows, total))
    }
}
