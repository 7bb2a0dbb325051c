//! Session-keyed state cache.
//!
//! A best-effort mirror of server state for the presentation layer,
//! reconciled by explicit fetch calls. Each refresh replaces the cached
//! records for that session wholesale; staleness is expected and tolerated.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;
use uuid::Uuid;

use rollcall_shared::constants::OTP_ROTATION_INTERVAL_SECS;

use crate::api::AttendanceApi;
use crate::error::ClientError;
use crate::types::RemoteAttendanceRecord;

/// Local mirror of one session. `display_expires_at` is the 20-second
/// rotation cadence shown to the teacher; the server's 500-second freshness
/// window is a separate, authoritative policy.
#[derive(Debug, Clone)]
pub struct CachedSession {
    pub id: Uuid,
    pub subject: String,
    pub section: String,
    pub course: String,
    pub otp: Option<String>,
    pub otp_generated_at: Option<DateTime<Utc>>,
    pub display_expires_at: Option<DateTime<Utc>>,
    pub attendance_link: String,
    pub is_active: bool,
}

pub struct StateCache<A: AttendanceApi> {
    api: A,
    /// Base URL students open; the submission link is derived from it.
    link_base: String,
    rotation_interval_secs: i64,
    sessions: HashMap<Uuid, CachedSession>,
    records: HashMap<Uuid, Vec<RemoteAttendanceRecord>>,
}

impl<A: AttendanceApi> StateCache<A> {
    pub fn new(api: A, link_base: impl Into<String>) -> Self {
        Self {
            api,
            link_base: link_base.into(),
            rotation_interval_secs: OTP_ROTATION_INTERVAL_SECS,
            sessions: HashMap::new(),
            records: HashMap::new(),
        }
    }

    /// Override the display cadence. Server-side freshness is a separate
    /// policy and is not affected.
    pub fn with_rotation_interval(mut self, secs: i64) -> Self {
        self.rotation_interval_secs = secs;
        self
    }

    /// Start a session server-side and mirror it locally. The mirror has no
    /// OTP until the first rotation.
    pub async fn create_session(
        &mut self,
        subject: &str,
        section: &str,
        course: &str,
    ) -> Result<&CachedSession, ClientError> {
        let id = self.api.create_session(subject, section, course).await?;

        let session = CachedSession {
            id,
            subject: subject.to_string(),
            section: section.to_string(),
            course: course.to_string(),
            otp: None,
            otp_generated_at: None,
            display_expires_at: None,
            attendance_link: format!("{}/mark-attendance?sessionid={}", self.link_base, id),
            is_active: true,
        };

        debug!("Session mirrored locally: {}", id);
        Ok(self.sessions.entry(id).or_insert(session))
    }

    /// Rotate the OTP server-side and update the mirror with the new code
    /// and its display expiry.
    pub async fn generate_otp(&mut self, session_id: &Uuid) -> Result<String, ClientError> {
        let otp = self.api.generate_otp(session_id).await?;
        let now = Utc::now();

        if let Some(session) = self.sessions.get_mut(session_id) {
            session.otp = Some(otp.clone());
            session.otp_generated_at = Some(now);
            session.display_expires_at =
                Some(now + Duration::seconds(self.rotation_interval_secs));
        }

        Ok(otp)
    }

    /// Pass a student submission through to the server. Nothing is cached;
    /// the server decides, and its message comes back verbatim.
    pub async fn mark_attendance(
        &self,
        name: &str,
        roll_no: &str,
        otp: &str,
        session_id: &Uuid,
    ) -> Result<String, ClientError> {
        self.api.mark_attendance(name, roll_no, otp, session_id).await
    }

    /// Re-fetch one session's attendance and replace the cached copy
    /// wholesale. Records of other sessions are untouched.
    pub async fn refresh_attendance(
        &mut self,
        session_id: &Uuid,
    ) -> Result<&[RemoteAttendanceRecord], ClientError> {
        let fetched = self.api.fetch_attendance(session_id).await?;
        debug!(
            "Reconciled {} attendance records for session {}",
            fetched.len(),
            session_id
        );

        self.records.insert(*session_id, fetched);
        Ok(self.session_records(session_id))
    }

    /// Cached records for a session; empty when never fetched.
    pub fn session_records(&self, session_id: &Uuid) -> &[RemoteAttendanceRecord] {
        self.records
            .get(session_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn session(&self, session_id: &Uuid) -> Option<&CachedSession> {
        self.sessions.get(session_id)
    }

    /// Local bookkeeping only; the server keeps no active flag.
    pub fn end_session(&mut self, session_id: &Uuid) {
        if let Some(session) = self.sessions.get_mut(session_id) {
            session.is_active = false;
        }
    }

    pub fn active_session(&self) -> Option<&CachedSession> {
        self.sessions.values().find(|s| s.is_active)
    }
}
