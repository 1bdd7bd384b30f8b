use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use common::pagination::{Page, Pagination};
use models::{log, login_log};

use crate::errors::ServiceError;
use crate::like;
use crate::logging::domain::{LogFilter, LogRecord, NewLogRecord};
use crate::logging::repository::LogRepository;

pub struct SeaOrmLogRepository {
    pub db: DatabaseConnection,
}

fn log_condition(filter: &LogFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(t) = filter.log_type {
        cond = cond.add(log::Column::LogType.eq(t.as_str()));
    }
    if let Some(d) = filter.description() {
        cond = cond.add(like::contains((log::Entity, log::Column::Description), d));
    }
    cond
}

fn login_log_condition(filter: &LogFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(t) = filter.log_type {
        cond = cond.add(login_log::Column::LogType.eq(t.as_str()));
    }
    if let Some(d) = filter.description() {
        cond = cond.add(like::contains((login_log::Entity, login_log::Column::Description), d));
    }
    cond
}

#[async_trait::async_trait]
impl LogRepository for SeaOrmLogRepository {
    async fn save_log(&self, r: NewLogRecord) -> Result<LogRecord, ServiceError> {
        let am = log::ActiveModel {
            description: Set(r.description),
            log_type: Set(r.log_type.as_str().to_string()),
            method: Set(r.method),
            params: Set(r.params),
            request_ip: Set(r.request_ip),
            username: Set(r.username),
            time: Set(r.time),
            exception_detail: Set(r.exception_detail),
            create_time: Set(Utc::now().into()),
            ..Default::default()
        };
        Ok(am.insert(&self.db).await?.into())
    }

    async fn save_login_log(&self, r: NewLogRecord) -> Result<LogRecord, ServiceError> {
        let am = login_log::ActiveModel {
            description: Set(r.description),
            log_type: Set(r.log_type.as_str().to_string()),
            method: Set(r.method),
            params: Set(r.params),
            request_ip: Set(r.request_ip),
            username: Set(r.username),
            time: Set(r.time),
            exception_detail: Set(r.exception_detail),
            create_time: Set(Utc::now().into()),
            ..Default::default()
        };
        Ok(am.insert(&self.db).await?.into())
    }

    async fn list_logs(&self, filter: &LogFilter, opts: Pagination) -> Result<Page<LogRecord>, ServiceError> {
        let (page_idx, per_page) = opts.normalize();
        let paginator = log::Entity::find()
            .filter(log_condition(filter))
            .order_by_desc(log::Column::Id)
            .paginate(&self.db, per_page);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page_idx).await?;
        Ok(Page::new(rows.into_iter().map(LogRecord::from).collect(), total))
    }

    async fn list_login_logs(&self, filter: &LogFilter, opts: Pagination) -> Result<Page<LogRecord>, ServiceError> {
        let (page_idx, per_page) = opts.normalize();
        let paginator = login_log::Entity::find()
            .filter(login_log_condition(filter))
            .order_by_desc(login_log::Column::Id)
            .paginate(&self.db, per_page);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page_idx).await?;
        Ok(Page::new(rows.into_iter().map(LogRecord::from).collect(), total))
    }

    async fn find_log(&self, id: i64) -> Result<Option<LogRecord>, ServiceError> {
        Ok(log::Entity::find_by_id(id).one(&self.db).await?.map(LogRecord::from))
    }
}
