pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::rpc::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/api/v1/agent", post(handlers::handle_agent))
        .with_state(state)
}
