use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
    Json,
};
use serde::Serialize;

use service::auth::domain::LoginInput;
use service::logging::JoinPoint;

use crate::errors::JsonApiError;
use crate::state::ServerState;

/// Username of the verified token, inserted by [`require_bearer_token`].
#[derive(Clone, Debug)]
pub struct AuthUser(pub String);

/// Who is calling and from where; feeds the join point of logged operations.
#[derive(Clone, Debug, Default)]
pub struct Caller {
    pub username: Option<String>,
    pub ip: Option<String>,
}

impl Caller {
    pub fn join_point(&self, method: &str, description: &str) -> JoinPoint {
        JoinPoint::new(method)
            .describe(description)
            .with_username(self.username.clone())
            .with_request_ip(self.ip.clone())
    }
}

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let username = parts.extensions.get::<AuthUser>().map(|u| u.0.clone());
        let peer = parts.extensions.get::<ConnectInfo<SocketAddr>>().map(|c| c.0);
        Ok(Caller { username, ip: client_ip(&parts.headers, peer) })
    }
}

/// First hop of `X-Forwarded-For`, then `X-Real-IP`, then the socket peer.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("unknown"))
    };
    if let Some(forwarded) = header_value("x-forwarded-for") {
        if let Some(first) = forwarded.split(',').map(str::trim).find(|s| !s.is_empty()) {
            return Some(first.to_string());
        }
    }
    if let Some(real) = header_value("x-real-ip") {
        return Some(real.to_string());
    }
    peer.map(|p| p.ip().to_string())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginOutput {
    pub username: String,
    pub token: String,
}

#[utoipa::path(
    post, path = "/auth/login", tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged In", body = LoginOutput),
        (status = 400, description = "Bad Credentials")
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    caller: Caller,
    Json(input): Json<LoginInput>,
) -> Result<Json<LoginOutput>, JsonApiError> {
    let jp = JoinPoint::new("auth::login")
        .describe("user login")
        .with_params(&input)
        .with_username(Some(input.username.clone()))
        .with_request_ip(caller.ip);
    let session = state.interceptor.around_login(jp, state.auth.login(input)).await?;
    Ok(Json(LoginOutput { username: session.user.username, token: session.token }))
}

/// Guards `/api/*`: a missing token is a 400, an invalid or expired one a 401.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();
    let authz = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let Some(authz) = authz else {
        tracing::warn!(path = %path, "missing Authorization header");
        return Err(JsonApiError::bad_request("missing bearer token"));
    };
    let Some(token) = authz.strip_prefix("Bearer ") else {
        tracing::warn!(path = %path, "invalid Authorization format (expect Bearer)");
        return Err(JsonApiError::unauthorized("invalid authorization scheme"));
    };

    match state.auth.verify_token(token.trim()) {
        Ok(claims) => {
            req.extensions_mut().insert(AuthUser(claims.sub));
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(path = %path, err = %e, "token validation failed");
            Err(JsonApiError::unauthorized("invalid or expired token"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn client_ip_prefers_forwarded_headers() {
        let peer: SocketAddr = "10.0.0.9:51000".parse().unwrap();
        let mut headers = HeaderMap::new();
        assert_eq!(client_ip(&headers, Some(peer)).as_deref(), Some("10.0.0.9"));
        assert_eq!(client_ip(&headers, None), None);

        headers.insert("x-real-ip", HeaderValue::from_static("192.168.1.5"));
        assert_eq!(client_ip(&headers, Some(peer)).as_deref(), Some("192.168.1.5"));

        headers.insert("x-forwarded-for", HeaderValue::from_static(" 203.0.113.7 , 10.0.0.1"));
        assert_eq!(client_ip(&headers, Some(peer)).as_deref(), Some("203.0.113.7"));

        headers.insert("x-forwarded-for", HeaderValue::from_static("unknown"));
        assert_eq!(client_ip(&headers, Some(peer)).as_deref(), Some("192.168.1.5"));
    }
}
