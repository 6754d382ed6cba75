pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assistant::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/",
            get(handlers::handle_index).post(handlers::handle_submit),
        )
        .route(
            "/api/v1/assistant/messages",
            post(handlers::handle_message),
        )
        .with_state(state)
}
