use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::error::ApiError;
use crate::handlers::parse_user_id;
use crate::services::dashboard::{self, DashboardData};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/dashboard/:user_id", get(get_dashboard))
}

async fn get_dashboard(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<DashboardData>, ApiError> {
    let user_id = parse_user_id(&user_id)?;

    let report = dashboard::build_dashboard(state.store, user_id).await?;
    if report.skipped_dates > 0 {
        tracing::warn!(
            %user_id,
            skipped = report.skipped_dates,
            "transactions without a usable date were left out of the monthly trend"
        );
    }

    Ok(Json(report.data))
}
