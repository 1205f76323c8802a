use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::handlers::parse_user_id;
use crate::models::{Investment, InvestmentFields, NewInvestment};
use crate::state::AppState;
use crate::store::Gateway;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/investments", post(create_investment))
        .route(
            "/api/investments/:id",
            get(get_investment)
                .put(update_investment)
                .delete(delete_investment),
        )
        .route("/api/investments/user/:user_id", get(get_user_investments))
}

async fn create_investment(
    State(state): State<AppState>,
    Json(payload): Json<NewInvestment>,
) -> Result<Json<Investment>, ApiError> {
    payload.fields.validate()?;
    let investment = Gateway::<Investment>::new(state.store).create(&payload).await?;
    Ok(Json(investment))
}

async fn get_investment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Investment>, ApiError> {
    let investment = Gateway::<Investment>::new(state.store).get_by_id(id).await?;
    Ok(Json(investment))
}

async fn get_user_investments(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Investment>>, ApiError> {
    let user_id = parse_user_id(&user_id)?;
    let investments = Gateway::<Investment>::new(state.store)
        .get_all_for_user(user_id)
        .await?;
    Ok(Json(investments))
}

async fn update_investment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(fields): Json<InvestmentFields>,
) -> Result<Json<Investment>, ApiError> {
    fields.validate()?;
    let investment = Gateway::<Investment>::new(state.store).update(id, &fields).await?;
    Ok(Json(investment))
}

async fn delete_investment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    Gateway::<Investment>::new(state.store).delete(id).await?;
    Ok(Json(json!({ "message": "Investment deleted successfully" })))
}
