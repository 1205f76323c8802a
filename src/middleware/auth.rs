use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::{self, TokenError, TokenKind};
use crate::config;
use crate::error::ApiError;

/// Authenticated identity extracted from a verified access token.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub subject: String,
}

/// Bearer-token guard for protected routes. Verifies signature and expiry,
/// refuses refresh tokens, and injects [`AuthUser`] for downstream handlers.
///
/// All rejection paths answer with the same generic 401 plus a
/// `WWW-Authenticate: Bearer` challenge; the actual cause is only logged.
pub async fn require_auth(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&headers).map_err(reject)?;

    let security = &config::config().security;
    let claims = auth::verify_token(&token, security)
        .map_err(|e| reject(e.to_string()))?;

    if claims.kind != TokenKind::Access {
        return Err(reject(TokenError::WrongKind.to_string()));
    }
    if claims.sub.trim().is_empty() {
        return Err(reject(TokenError::MissingSubject.to_string()));
    }

    request.extensions_mut().insert(AuthUser {
        subject: claims.sub,
    });

    Ok(next.run(request).await)
}

fn reject(cause: impl AsRef<str>) -> Response {
    tracing::warn!("rejected bearer credential: {}", cause.as_ref());
    ApiError::Unauthorized.into_response()
}

/// Extract the bearer credential from the Authorization header.
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or_else(|| "missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "invalid Authorization header encoding".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("empty bearer token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
