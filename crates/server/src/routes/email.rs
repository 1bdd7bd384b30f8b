use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use service::email::{EmailConfig, EmailVo};
use service::errors::ServiceError;

use crate::errors::JsonApiError;
use crate::routes::auth::Caller;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/api/email", tag = "email",
    responses((status = 200, description = "Current configuration, password omitted", body = crate::openapi::EmailConfigDoc))
)]
pub async fn get_config(State(state): State<ServerState>) -> Result<Json<EmailConfig>, JsonApiError> {
    Ok(Json(state.email.find().await?))
}

#[utoipa::path(
    put, path = "/api/email", tag = "email",
    request_body = crate::openapi::EmailConfigDoc,
    responses(
        (status = 200, description = "Configuration replaced"),
        (status = 400, description = "Bad Request")
    )
)]
pub async fn update_config(
    State(state): State<ServerState>,
    caller: Caller,
    Json(input): Json<EmailConfig>,
) -> Result<StatusCode, JsonApiError> {
    let jp = caller.join_point("email::update", "configure email").with_params(&input);
    let email = state.email.clone();
    state
        .interceptor
        .around(jp, async move {
            let old = email.find().await?;
            email.update(input, &old).await
        })
        .await?;
    info!(user = ?caller.username, "email configuration replaced");
    Ok(StatusCode::OK)
}

#[utoipa::path(
    post, path = "/api/email", tag = "email",
    request_body = crate::openapi::EmailVoDoc,
    responses(
        (status = 200, description = "Sent"),
        (status = 400, description = "Not configured, invalid message or delivery failure")
    )
)]
pub async fn send(
    State(state): State<ServerState>,
    caller: Caller,
    Json(vo): Json<EmailVo>,
) -> Result<StatusCode, JsonApiError> {
    let jp = caller.join_point("email::send", "send email").with_params(&vo);
    let email = state.email.clone();
    state
        .interceptor
        .around(jp, async move {
            let config = email.find().await?;
            email.send(&vo, &config).await?;
            Ok::<_, ServiceError>(())
        })
        .await?;
    Ok(StatusCode::OK)
}
