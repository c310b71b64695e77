pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::recommend::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/recommend", post(handlers::handle_recommend))
        .route("/recommend/sweep", post(handlers::handle_sweep))
        .route("/debug/jobs", get(handlers::handle_debug_jobs))
        .with_state(state)
}
