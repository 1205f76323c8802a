use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::handlers::parse_user_id;
use crate::models::{NewTransaction, Transaction, TransactionFields};
use crate::state::AppState;
use crate::store::Gateway;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/transactions", post(create_transaction))
        .route(
            "/api/transactions/:id",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
        .route(
            "/api/transactions/user/:user_id",
            get(get_user_transactions),
        )
}

async fn create_transaction(
    State(state): State<AppState>,
    Json(payload): Json<NewTransaction>,
) -> Result<Json<Transaction>, ApiError> {
    payload.fields.validate()?;
    let transaction = Gateway::<Transaction>::new(state.store).create(&payload).await?;
    Ok(Json(transaction))
}

async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Transaction>, ApiError> {
    let transaction = Gateway::<Transaction>::new(state.store).get_by_id(id).await?;
    Ok(Json(transaction))
}

async fn get_user_transactions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let user_id = parse_user_id(&user_id)?;
    let transactions = Gateway::<Transaction>::new(state.store)
        .get_all_for_user(user_id)
        .await?;
    Ok(Json(transactions))
}

async fn update_transaction(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(fields): Json<TransactionFields>,
) -> Result<Json<Transaction>, ApiError> {
    fields.validate()?;
    let transaction = Gateway::<Transaction>::new(state.store).update(id, &fields).await?;
    Ok(Json(transaction))
}

async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    Gateway::<Transaction>::new(state.store).delete(id).await?;
    Ok(Json(json!({ "message": "Transaction deleted successfully" })))
}
