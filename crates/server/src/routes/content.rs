use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use common::pagination::{Page, Pagination};
use models::qiniu_content;
use service::content::ContentQuery;

use crate::errors::JsonApiError;
use crate::routes::auth::Caller;
use crate::state::ServerState;

#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ContentListParams {
    /// Substring of the object key
    pub key: Option<String>,
    /// 1-based page index
    pub page: Option<u32>,
    pub size: Option<u32>,
}

#[utoipa::path(
    get, path = "/api/qiniuContent", tag = "storage",
    params(ContentListParams),
    responses(
        (status = 200, description = "Page of stored objects"),
        (status = 400, description = "Query failed")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    caller: Caller,
    Query(params): Query<ContentListParams>,
) -> Result<Json<Page<qiniu_content::Model>>, JsonApiError> {
    let content = state.content.clone();
    let query_storage = state.interceptor.wrap(
        caller.join_point("content::list", "query file storage"),
        move |p: ContentListParams| {
            let content = content.clone();
            async move {
                let query = ContentQuery { key: p.key };
                content.list(&query, Pagination::new(p.page, p.size)).await
            }
        },
    );
    Ok(Json(query_storage(params).await?))
}
