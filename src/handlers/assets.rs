use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::handlers::parse_user_id;
use crate::models::{Asset, AssetFields, NewAsset};
use crate::state::AppState;
use crate::store::Gateway;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/assets", post(create_asset))
        .route(
            "/api/assets/:id",
            get(get_asset).put(update_asset).delete(delete_asset),
        )
        .route("/api/assets/user/:user_id", get(get_user_assets))
}

async fn create_asset(
    State(state): State<AppState>,
    Json(payload): Json<NewAsset>,
) -> Result<Json<Asset>, ApiError> {
    payload.fields.validate()?;
    let asset = Gateway::<Asset>::new(state.store).create(&payload).await?;
    Ok(Json(asset))
}

async fn get_asset(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Asset>, ApiError> {
    let asset = Gateway::<Asset>::new(state.store).get_by_id(id).await?;
    Ok(Json(asset))
}

async fn get_user_assets(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Asset>>, ApiError> {
    let user_id = parse_user_id(&user_id)?;
    let assets = Gateway::<Asset>::new(state.store)
        .get_all_for_user(user_id)
        .await?;
    Ok(Json(assets))
}

async fn update_asset(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(fields): Json<AssetFields>,
) -> Result<Json<Asset>, ApiError> {
    fields.validate()?;
    let asset = Gateway::<Asset>::new(state.store).update(id, &fields).await?;
    Ok(Json(asset))
}

async fn delete_asset(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    Gateway::<Asset>::new(state.store).delete(id).await?;
    Ok(Json(json!({ "message": "Asset deleted successfully" })))
}
