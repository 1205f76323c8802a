use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::auth::{self, TokenKind};
use crate::config;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/users/:user_id", get(get_user_audience))
}

/// Resolve a user via the identity provider and return its audience claim.
/// An "authenticated" audience additionally gets a fresh access/refresh
/// token pair. This route is deliberately public: it is how clients obtain
/// their first token.
async fn get_user_audience(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let user = state.identity.fetch_user(&user_id).await?;

    let aud = user
        .aud
        .ok_or_else(|| ApiError::not_found("audience claim not present for user"))?;

    if aud == "authenticated" {
        let security = &config::config().security;
        let access_token = auth::issue_token(TokenKind::Access, &user_id, security)
            .map_err(token_failure)?;
        let refresh_token = auth::issue_token(TokenKind::Refresh, &user_id, security)
            .map_err(token_failure)?;

        tracing::info!(%user_id, "authenticated user, returning token pair");
        return Ok(Json(json!({
            "aud": aud,
            "access_token": access_token,
            "refresh_token": refresh_token,
        })));
    }

    Ok(Json(json!({ "aud": aud })))
}

fn token_failure(err: auth::TokenError) -> ApiError {
    tracing::error!("token issuance failed: {}", err);
    ApiError::data_access("failed to issue authorization tokens")
}
