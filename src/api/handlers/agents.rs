use crate::{types::AgentId, AppState};
use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

/// List the registered tutoring agents
#[utoipa::path(
    get,
    path = "/api/agents",
    responses((status = 200, description = "Registered agents", body = [AgentInfo])),
    tag = "agents"
)]
pub async fn list_agents(State(state): State<AppState>) -> Json<Vec<AgentInfo>> {
    let agents = AgentId::ALL
        .iter()
        .map(|agent| AgentInfo {
            agent: *agent,
            name: display_name(*agent),
            description: description(*agent),
            address: state.registry.descriptor(*agent).address.clone(),
        })
        .collect();
    Json(agents)
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service health")),
    tag = "health"
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "learnflow-gateway",
    }))
}

#[derive(Serialize, ToSchema)]
pub struct AgentInfo {
    pub agent: AgentId,
    pub name: &'static str,
    pub description: &'static str,
    pub address: String,
}

fn display_name(agent: AgentId) -> &'static str {
    match agent {
        AgentId::Triage => "Triage Agent",
        AgentId::Concepts => "Concepts Agent",
        AgentId::Debug => "Debug Agent",
        AgentId::Exercise => "Exercise Agent",
        AgentId::Progress => "Progress Agent",
        AgentId::CodeReview => "Code Review Agent",
    }
}

fn description(agent: AgentId) -> &'static str {
    match agent {
        AgentId::Triage => "Routes general questions and delegates to specialists",
        AgentId::Concepts => "Explains programming concepts with examples",
        AgentId::Debug => "Diagnoses error messages and broken code",
        AgentId::Exercise => "Generates practice exercises and quizzes",
        AgentId::Progress => "Reports learning progress and mastery",
        AgentId::CodeReview => "Reviews code for quality and style",
    }
}
