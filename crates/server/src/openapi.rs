use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

/// Password is write-only.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmailConfigDoc {
    pub host: String,
    pub port: String,
    pub user: String,
    pub pass: Option<String>,
    pub from_user: String,
}

#[derive(ToSchema)]
pub struct EmailVoDoc {
    pub tos: Vec<String>,
    pub subject: String,
    /// HTML body
    pub content: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::email::get_config,
        crate::routes::email::update_config,
        crate::routes::email::send,
        crate::routes::content::list,
        crate::routes::logs::list_info,
        crate::routes::logs::list_errors,
        crate::routes::logs::error_detail,
        crate::routes::logs::list_login_logs,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            crate::routes::auth::LoginOutput,
            EmailConfigDoc,
            EmailVoDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "email"),
        (name = "storage"),
        (name = "logs")
    )
)]
pub struct ApiDoc;
