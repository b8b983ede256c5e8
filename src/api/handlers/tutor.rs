use crate::{
    agents::{AgentDispatcher, FallbackResponder, RequestCoordinator},
    types::{InboundMessage, Result, RoutedResult, TutorRequest},
    AppState,
};
use axum::{extract::State, Json};
use std::time::Duration;

/// Route a learner message to the appropriate tutoring agent
#[utoipa::path(
    post,
    path = "/api/tutor",
    request_body = TutorRequest,
    responses(
        (status = 200, description = "Routed response with struggle detection", body = RoutedResult),
        (status = 400, description = "Missing or empty message"),
        (status = 500, description = "Unexpected coordinator fault")
    ),
    tag = "tutor"
)]
pub async fn tutor(
    State(state): State<AppState>,
    Json(payload): Json<TutorRequest>,
) -> Result<Json<RoutedResult>> {
    // The pipeline is built fresh per request from the process-wide
    // read-only handles; nothing is shared across requests.
    let dispatcher = AgentDispatcher::new(
        state.registry.clone(),
        state.http.clone(),
        Duration::from_millis(state.config.dispatch.timeout_ms),
    );
    let fallback = FallbackResponder::new(state.fallback_model.clone());
    let coordinator = RequestCoordinator::new(dispatcher, fallback);

    let result = coordinator.handle(InboundMessage::from(payload)).await?;
    Ok(Json(result))
}
