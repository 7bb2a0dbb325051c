// ============================================================================
// Rollcall API - Session Handlers
// File: crates/rollcall-api/src/handlers/session.rs
// ============================================================================
//! Teacher-facing handlers: session start and OTP rotation.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Start-session request payload
#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    pub subject: String,
    pub section: String,
    pub course: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionResponse {
    pub session_id: Uuid,
}

/// Generate-otp request payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOtpRequest {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct GenerateOtpResponse {
    pub otp: String,
}

/// POST /api/start-session
pub async fn start_session(
    State(state): State<AppState>,
    Json(payload): Json<StartSessionRequest>,
) -> Result<Json<StartSessionResponse>, ApiError> {
    info!(
        "Starting session: subject={} section={} course={}",
        payload.subject, payload.section, payload.course
    );
    let session_id = state
        .service
        .create_session(&payload.subject, &payload.section, &payload.course)
        .await?;

    Ok(Json(StartSessionResponse { session_id }))
}

/// POST /api/generate-otp
pub async fn generate_otp(
    State(state): State<AppState>,
    Json(payload): Json<GenerateOtpRequest>,
) -> Result<Json<GenerateOtpResponse>, ApiError> {
    info!("Generating OTP for session: {}", payload.session_id);
    let otp = state.service.generate_otp(&payload.session_id).await?;
    Ok(Json(GenerateOtpResponse { otp }))
}
