use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::handlers::parse_user_id;
use crate::models::{Liability, LiabilityFields, NewLiability};
use crate::state::AppState;
use crate::store::Gateway;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/liabilities", post(create_liability))
        .route(
            "/api/liabilities/:id",
            get(get_liability).put(update_liability).delete(delete_liability),
        )
        .route("/api/liabilities/user/:user_id", get(get_user_liabilities))
}

async fn create_liability(
    State(state): State<AppState>,
    Json(payload): Json<NewLiability>,
) -> Result<Json<Liability>, ApiError> {
    payload.fields.validate()?;
    let liability = Gateway::<Liability>::new(state.store).create(&payload).await?;
    Ok(Json(liability))
}

async fn get_liability(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Liability>, ApiError> {
    let liability = Gateway::<Liability>::new(state.store).get_by_id(id).await?;
    Ok(Json(liability))
}

async fn get_user_liabilities(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Liability>>, ApiError> {
    let user_id = parse_user_id(&user_id)?;
    let liabilities = Gateway::<Liability>::new(state.store)
        .get_all_for_user(user_id)
        .await?;
    Ok(Json(liabilities))
}

async fn update_liability(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(fields): Json<LiabilityFields>,
) -> Result<Json<Liability>, ApiError> {
    fields.validate()?;
    let liability = Gateway::<Liability>::new(state.store).update(id, &fields).await?;
    Ok(Json(liability))
}

async fn delete_liability(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    Gateway::<Liability>::new(state.store).delete(id).await?;
    Ok(Json(json!({ "message": "Liability deleted successfully" })))
}
