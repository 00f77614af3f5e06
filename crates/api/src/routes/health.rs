use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Number of articles currently in the store.
    pub articles: usize,
}

/// GET /health -- service status and store size.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let articles = state.store.read().await.len();

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        articles,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
