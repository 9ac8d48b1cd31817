//! Assistant handlers

use axum::{extract::{rejection::JsonRejection, State}, Json};
use validator::Validate;

use crate::{AppState, AppResult};
use crate::models::{ChatRequest, ChatResponse, ScanRequest, ScanResponse};
use crate::safety::threat_scan;

/// Chat with the assistant
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let response = state.assistant.respond(&req).await?;
    Ok(Json(response))
}

/// Scan text for threat keywords only
pub async fn scan(
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> AppResult<Json<ScanResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    Ok(Json(ScanResponse { scan: threat_scan::scan(&req.text) }))
}
