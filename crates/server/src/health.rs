use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

#[derive(Clone, Debug)]
pub struct HealthState {
    pub generator_name: String,
    pub llm_enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub collaborator: HealthCheck,
    pub checked_at: String,
}

pub fn router(state: HealthState) -> Router {
    Router::new().route("/health", get(health)).with_state(state)
}

/// Readiness only reflects configuration: the collaborator is never called
/// from here, and a disabled collaborator still leaves the ROI fallback up.
pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let collaborator = if state.llm_enabled {
        HealthCheck {
            status: "configured",
            detail: format!("text generation via {}", state.generator_name),
        }
    } else {
        HealthCheck {
            status: "disabled",
            detail: "roi estimates use the deterministic model; chat is unavailable".to_string(),
        }
    };

    let payload = HealthResponse {
        status: "ready",
        service: HealthCheck {
            status: "ready",
            detail: "stellar-server runtime initialized".to_string(),
        },
        collaborator,
        checked_at: Utc::now().to_rfc3339(),
    };

    (StatusCode::OK, Json(payload))
}
