//! Authentication handlers.

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use base64::prelude::{Engine, BASE64_STANDARD};
use std::sync::Arc;
use validator::Validate;

use crate::web::dto::{RegisterRequest, TokenResponse, UserResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::{bearer_token, AuthUser};

/// Decode an HTTP Basic Authorization header into an email/password pair.
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = BASE64_STANDARD.decode(encoded).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (email, password) = decoded.split_once(':')?;
    Some((email.to_string(), password.to_string()))
}

/// POST /users - register a new user.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    req.validate().map_err(ApiError::from_validation_errors)?;

    let user = crate::auth::register(state.db.pool(), &req.email, &req.password).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /connect - exchange Basic credentials for a session token.
pub async fn connect(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, ApiError> {
    let (email, password) = basic_credentials(&headers)
        .ok_or_else(|| ApiError::unauthorized("Missing authorization"))?;

    let user = state.gate.authenticate(&email, &password).await?;
    let token = state.sessions.issue(user.id).await?;

    Ok(Json(TokenResponse { token }))
}

/// GET /disconnect - revoke the presented session token.
pub async fn disconnect(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token =
        bearer_token(&headers).ok_or_else(|| ApiError::unauthorized("Missing authorization"))?;

    // A dead token gets the same 401 as any other failed identification
    state.gate.identify(&token).await?;
    state.sessions.revoke(&token).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /users/me - current user.
pub async fn me(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}
