// src/api.rs
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::state::{DailyImageController, LoadState};

#[derive(Clone)]
pub struct AppState {
    pub controller: DailyImageController,
}

/// Observer surface over the controller: the current tri-state value plus a
/// manual refresh trigger. Adds no retrieval semantics of its own.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/daily", get(daily))
        .route("/refresh", post(refresh))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn daily(State(state): State<AppState>) -> Json<LoadState> {
    Json(state.controller.state())
}

/// Runs a fresh load cycle and answers with the state it produced.
async fn refresh(State(state): State<AppState>) -> Json<LoadState> {
    state.controller.refresh().await;
    Json(state.controller.state())
}
