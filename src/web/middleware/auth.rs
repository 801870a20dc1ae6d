//! Session token authentication middleware.
//!
//! Transport parsing lives here: the extractors pull the bearer token out of
//! the Authorization header and hand the already-decoded token to the auth
//! gate.

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::AuthGate;
use crate::db::User;
use crate::web::error::ApiError;
use crate::DepotError;

/// Extract the bearer token from an Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}

/// Extractor for authenticated users.
///
/// Resolves the bearer token through the session cache; requests without a
/// live session are rejected with 401 before the handler runs.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let token = bearer_token(&parts.headers)
                .ok_or_else(|| ApiError::unauthorized("Missing authorization"))?;

            let gate = parts
                .extensions
                .get::<Arc<AuthGate>>()
                .ok_or_else(|| ApiError::internal("auth gate not configured"))?;

            let user = gate.identify(&token).await.map_err(ApiError::from)?;

            Ok(AuthUser(user))
        })
    }
}

/// Optional authentication extractor.
///
/// A missing or dead token yields an anonymous viewer instead of failing;
/// transient cache failures still propagate.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<User>);

impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let Some(token) = bearer_token(&parts.headers) else {
                return Ok(OptionalAuthUser(None));
            };

            let Some(gate) = parts.extensions.get::<Arc<AuthGate>>() else {
                return Ok(OptionalAuthUser(None));
            };

            match gate.identify(&token).await {
                Ok(user) => Ok(OptionalAuthUser(Some(user))),
                Err(DepotError::Unauthorized) => Ok(OptionalAuthUser(None)),
                Err(e) => Err(ApiError::from(e)),
            }
        })
    }
}

/// Middleware injecting the auth gate into request extensions for the
/// extractors above.
pub async fn inject_auth_gate(
    gate: Arc<AuthGate>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(gate);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_present() {
        let headers = headers_with_auth("Bearer abc-123");
        assert_eq!(bearer_token(&headers), Some("abc-123".to_string()));
    }

    #[test]
    fn test_bearer_token_missing_header() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let headers = headers_with_auth("Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(&headers), None);
    }
}
