use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::errors::AppError;
use crate::state::AppState;

pub const MISSING_TOKEN: &str = "Access denied. No token provided.";

/// Proof that the request carried a valid admin bearer token.
/// Taking this as a handler argument protects the route; it runs before any body
/// extractor, so unauthenticated requests never reach the store.
#[derive(Debug, Clone)]
pub struct AuthAdmin {
    pub id: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized(MISSING_TOKEN.to_string()))?;
        let id = state.tokens.verify(token)?;
        Ok(AuthAdmin { id })
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim_start().split_once(' ')?;
    let token = token.trim();
    // the scheme name is case-insensitive
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
