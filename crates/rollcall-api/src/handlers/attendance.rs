// ============================================================================
// Rollcall API - Attendance Handlers
// File: crates/rollcall-api/src/handlers/attendance.rs
// ============================================================================
//! Student submission, attendance listing, and CSV download.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rollcall_core::domain::AttendanceEntry;

use crate::error::ApiError;
use crate::state::AppState;

/// Mark-attendance request payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    pub name: String,
    pub roll_no: String,
    pub otp: String,
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Wire shape of one attendance entry (`rollno` matches the stored column).
#[derive(Debug, Serialize)]
pub struct AttendanceEntryDto {
    pub name: String,
    pub rollno: String,
    pub timestamp: DateTime<Utc>,
}

impl From<AttendanceEntry> for AttendanceEntryDto {
    fn from(entry: AttendanceEntry) -> Self {
        Self {
            name: entry.name,
            rollno: entry.roll_no,
            timestamp: entry.timestamp,
        }
    }
}

/// POST /api/mark-attendance
pub async fn mark_attendance(
    State(state): State<AppState>,
    Json(payload): Json<MarkAttendanceRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .service
        .mark_attendance(
            &payload.name,
            &payload.roll_no,
            &payload.otp,
            &payload.session_id,
        )
        .await?;

    Ok(Json(MessageResponse {
        message: "Attendance marked!".to_string(),
    }))
}

/// GET /api/session/:id/attendance
pub async fn list_attendance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<AttendanceEntryDto>>, ApiError> {
    let entries = state.service.list_attendance(&id).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// GET /api/session/:id/attendance/download
pub async fn download_attendance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let document = state.service.export_attendance(&id).await?;

    let disposition = format!("attachment; filename=attendance-{}.csv", id);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document,
    )
        .into_response())
}
