use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/tutor", post(crate::api::handlers::tutor::tutor))
        .route("/api/execute", post(crate::api::handlers::execute::execute))
        .route("/api/agents", get(crate::api::handlers::agents::list_agents))
        .route("/health", get(crate::api::handlers::agents::health))
}
