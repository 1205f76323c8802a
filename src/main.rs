use std::sync::Arc;

use anyhow::Context;

use fintrack_api_rust::services::identity::SupabaseIdentity;
use fintrack_api_rust::state::AppState;
use fintrack_api_rust::store::PostgrestStore;
use fintrack_api_rust::{app, config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up SUPABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting FinTrack API in {:?} mode", config.environment);

    let store = PostgrestStore::new(&config.store).context("building store client")?;
    let identity = SupabaseIdentity::new(&config.store).context("building identity client")?;
    let state = AppState {
        store: Arc::new(store),
        identity: Arc::new(identity),
    };

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("FinTrack API listening on http://{}", bind_addr);
    axum::serve(listener, app(state)).await.context("server")?;

    Ok(())
}
