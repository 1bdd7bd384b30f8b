use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use common::pagination::{Page, Pagination};
use service::logging::query::ErrorDetail;
use service::logging::LogRecord;

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LogListParams {
    /// Substring of the description
    pub description: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl LogListParams {
    fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.size)
    }
}

#[utoipa::path(get, path = "/api/logs", tag = "logs", params(LogListParams), responses((status = 200, description = "INFO records, newest first")))]
pub async fn list_info(
    State(state): State<ServerState>,
    Query(q): Query<LogListParams>,
) -> Result<Json<Page<LogRecord>>, JsonApiError> {
    let page = q.pagination();
    Ok(Json(state.logs.list_info(q.description, page).await?))
}

#[utoipa::path(get, path = "/api/logs/error", tag = "logs", params(LogListParams), responses((status = 200, description = "ERROR records, newest first")))]
pub async fn list_errors(
    State(state): State<ServerState>,
    Query(q): Query<LogListParams>,
) -> Result<Json<Page<LogRecord>>, JsonApiError> {
    let page = q.pagination();
    Ok(Json(state.logs.list_errors(q.description, page).await?))
}

#[utoipa::path(
    get, path = "/api/logs/error/{id}", tag = "logs",
    params(("id" = i64, Path, description = "Log record id")),
    responses(
        (status = 200, description = "Stored trace"),
        (status = 404, description = "No such ERROR record")
    )
)]
pub async fn error_detail(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<ErrorDetail>, JsonApiError> {
    Ok(Json(state.logs.error_detail(id).await?))
}

#[utoipa::path(get, path = "/api/loginLogs", tag = "logs", params(LogListParams), responses((status = 200, description = "Login records, newest first")))]
pub async fn list_login_logs(
    State(state): State<ServerState>,
    Query(q): Query<LogListParams>,
) -> Result<Json<Page<LogRecord>>, JsonApiError> {
    let page = q.pagination();
    Ok(Json(state.logs.list_login_logs(q.description, page).await?))
}
