pub mod auth;
pub mod config;
pub mod dates;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod store;

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::SecurityConfig;
use crate::state::AppState;

/// Assemble the full application router. Protected routes sit behind the
/// bearer-token gate; the users route and the liveness probe stay public.
pub fn app(state: AppState) -> Router {
    let protected = Router::new()
        .merge(handlers::assets::routes())
        .merge(handlers::liabilities::routes())
        .merge(handlers::transactions::routes())
        .merge(handlers::investments::routes())
        .merge(handlers::dashboard::routes())
        .route_layer(axum::middleware::from_fn(middleware::require_auth));

    let config = config::config();
    let mut router = Router::new()
        .route("/", get(root))
        .merge(handlers::users::routes())
        .merge(protected)
        .layer(cors_layer(&config.security));

    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    // Credentials rule out wildcards, so origins/methods/headers are explicit
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn root() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "FinTrack API is running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
