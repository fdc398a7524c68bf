use crate::models::HealthResponse;
use crate::startup::AppState;
use axum::{extract::State, Json};

/// `GET /api/health`. Reports whether the poetry book is loaded; always 200.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: state.service_name.to_string(),
        version: env!("CARGO_PKG_VERSION"),
        poetry_loaded: state.gateway.content().is_ready(),
    })
}
