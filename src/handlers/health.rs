//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    /// "provider" when chat is proxied, "local" for keyword replies
    assistant: &'static str,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Server is running",
        version: env!("CARGO_PKG_VERSION"),
        assistant: if state.assistant.has_provider() { "provider" } else { "local" },
        timestamp: chrono::Utc::now().timestamp(),
    })
}
