// ============================================================================
// Rollcall Core - Attendance Service
// File: crates/rollcall-core/src/services/attendance_service.rs
// ============================================================================
//! Attendance service: session creation, OTP rotation, and the OTP-gated
//! submission path.

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{AttendanceEntry, AttendanceRecord, Session};
use crate::error::DomainError;
use crate::repositories::{AttendanceRepository, SessionRepository};
use crate::services::export;

use rollcall_shared::constants::{OTP_MAX, OTP_MIN};

/// Business rules for attendance sessions. Stateless per call; durable state
/// lives behind the repository ports.
pub struct AttendanceService<S: SessionRepository, A: AttendanceRepository> {
    session_repo: Arc<S>,
    attendance_repo: Arc<A>,
    otp_freshness_window_secs: i64,
}

impl<S: SessionRepository, A: AttendanceRepository> AttendanceService<S, A> {
    pub fn new(
        session_repo: Arc<S>,
        attendance_repo: Arc<A>,
        otp_freshness_window_secs: i64,
    ) -> Self {
        Self {
            session_repo,
            attendance_repo,
            otp_freshness_window_secs,
        }
    }

    /// Start a new attendance session. No OTP is set until the first
    /// rotation.
    pub async fn create_session(
        &self,
        subject: &str,
        section: &str,
        course: &str,
    ) -> Result<Uuid, DomainError> {
        let session = Session::new(subject.to_string(), section.to_string(), course.to_string());
        let created = self.session_repo.create(&session).await?;

        info!("Session started: {}", created.id);
        Ok(created.id)
    }

    /// Rotate the session's OTP: a uniform 6-digit code, stamped with the
    /// current time, overwriting any prior code.
    pub async fn generate_otp(&self, session_id: &Uuid) -> Result<String, DomainError> {
        let otp = rand::rng().random_range(OTP_MIN..=OTP_MAX).to_string();
        let generated_at = Utc::now();

        // An unknown id would otherwise be a silent zero-row update.
        let updated = self
            .session_repo
            .set_otp(session_id, &otp, generated_at)
            .await?;
        if !updated {
            warn!("OTP rotation for unknown session: {}", session_id);
            return Err(DomainError::SessionNotFound);
        }

        info!("OTP rotated for session: {}", session_id);
        Ok(otp)
    }

    /// Record one student's attendance. Steps run in strict order and each
    /// may short-circuit the rest.
    pub async fn mark_attendance(
        &self,
        name: &str,
        roll_no: &str,
        otp: &str,
        session_id: &Uuid,
    ) -> Result<(), DomainError> {
        // 1. Session must exist
        let session = self
            .session_repo
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| {
                warn!("Submission against unknown session: {}", session_id);
                DomainError::SessionNotFound
            })?;

        // 2. Submitted code must match the stored one exactly
        if !session.otp_matches(otp) {
            warn!("Invalid OTP for session: {}", session_id);
            return Err(DomainError::InvalidOtp);
        }

        // 3. Code must be inside the freshness window
        let age = session
            .otp_age_secs(Utc::now())
            .ok_or(DomainError::InvalidOtp)?;
        if age > self.otp_freshness_window_secs {
            warn!("Expired OTP for session {} (age {}s)", session_id, age);
            return Err(DomainError::OtpExpired);
        }

        // 4. Fast-path duplicate check for a friendly error
        if self
            .attendance_repo
            .exists(name, roll_no, session_id)
            .await?
        {
            return Err(DomainError::AlreadyMarked);
        }

        // 5. Insert; the store's unique index is the real duplicate
        //    guarantee under concurrent identical submissions
        let record = AttendanceRecord::new(name.to_string(), roll_no.to_string(), *session_id);
        self.attendance_repo.create(&record).await?;

        info!("Attendance marked for session: {}", session_id);
        Ok(())
    }

    /// All records for a session, ascending by timestamp, reduced to
    /// name/roll number/timestamp.
    pub async fn list_attendance(
        &self,
        session_id: &Uuid,
    ) -> Result<Vec<AttendanceEntry>, DomainError> {
        let records = self.attendance_repo.list_by_session(session_id).await?;
        Ok(records.iter().map(AttendanceEntry::from).collect())
    }

    /// Render the session's attendance as a downloadable CSV document.
    pub async fn export_attendance(&self, session_id: &Uuid) -> Result<Vec<u8>, DomainError> {
        let session = self
            .session_repo
            .find_by_id(session_id)
            .await?
            .ok_or(DomainError::SessionNotFound)?;

        let records = self.attendance_repo.list_by_session(session_id).await?;
        let entries: Vec<AttendanceEntry> = records.iter().map(AttendanceEntry::from).collect();

        export::render_attendance_csv(&session, &entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::attendance_repository::MockAttendanceRepository;
    use crate::repositories::session_repository::MockSessionRepository;
    use chrono::Duration;
    use mockall::predicate::eq;
    use rollcall_shared::constants::{OTP_FRESHNESS_WINDOW_SECS, OTP_LENGTH};

    fn service(
        session_repo: MockSessionRepository,
        attendance_repo: MockAttendanceRepository,
    ) -> AttendanceService<MockSessionRepository, MockAttendanceRepository> {
        AttendanceService::new(
            Arc::new(session_repo),
            Arc::new(attendance_repo),
            OTP_FRESHNESS_WINDOW_SECS,
        )
    }

    fn session_with_otp(otp: &str, age_secs: i64) -> Session {
        let mut session = Session::new("CS101".into(), "A".into(), "Algorithms".into());
        session.otp = Some(otp.to_string());
        session.otp_generated_at = Some(Utc::now() - Duration::seconds(age_secs));
        session
    }

    #[tokio::test]
    async fn test_create_session_returns_new_id() {
        let mut session_repo = MockSessionRepository::new();
        session_repo
            .expect_create()
            .returning(|s| Ok(s.clone()));

        let svc = service(session_repo, MockAttendanceRepository::new());
        let id = svc
            .create_session("CS101", "A", "Algorithms")
            .await
            .unwrap();
        assert!(!id.is_nil());
    }

    #[tokio::test]
    async fn test_generate_otp_is_six_digits() {
        let mut session_repo = MockSessionRepository::new();
        session_repo
            .expect_set_otp()
            .returning(|_, _, _| Ok(true));

        let svc = service(session_repo, MockAttendanceRepository::new());
        let otp = svc.generate_otp(&Uuid::new_v4()).await.unwrap();

        assert_eq!(otp.len(), OTP_LENGTH);
        let value: u32 = otp.parse().unwrap();
        assert!((OTP_MIN..=OTP_MAX).contains(&value));
    }

    #[tokio::test]
    async fn test_generate_otp_unknown_session_is_not_silent() {
        let mut session_repo = MockSessionRepository::new();
        session_repo
            .expect_set_otp()
            .returning(|_, _, _| Ok(false));

        let svc = service(session_repo, MockAttendanceRepository::new());
        let err = svc.generate_otp(&Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::SessionNotFound));
    }

    #[tokio::test]
    async fn test_mark_attendance_succeeds_within_window() {
        let session = session_with_otp("123456", 10);
        let session_id = session.id;

        let mut session_repo = MockSessionRepository::new();
        session_repo
            .expect_find_by_id()
            .with(eq(session_id))
            .returning(move |_| Ok(Some(session.clone())));

        let mut attendance_repo = MockAttendanceRepository::new();
        attendance_repo
            .expect_exists()
            .with(eq("Alice"), eq("7"), eq(session_id))
            .returning(|_, _, _| Ok(false));
        attendance_repo
            .expect_create()
            .returning(|r| Ok(r.clone()));

        let svc = service(session_repo, attendance_repo);
        svc.mark_attendance("Alice", "7", "123456", &session_id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_mark_attendance_unknown_session() {
        let mut session_repo = MockSessionRepository::new();
        session_repo
            .expect_find_by_id()
            .returning(|_| Ok(None));

        let svc = service(session_repo, MockAttendanceRepository::new());
        let err = svc
            .mark_attendance("Alice", "7", "123456", &Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::SessionNotFound));
    }

    #[tokio::test]
    async fn test_mark_attendance_wrong_otp_regardless_of_age() {
        let session = session_with_otp("123456", 0);
        let session_id = session.id;

        let mut session_repo = MockSessionRepository::new();
        session_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(session.clone())));

        let svc = service(session_repo, MockAttendanceRepository::new());
        let err = svc
            .mark_attendance("Alice", "7", "654321", &session_id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidOtp));
    }

    #[tokio::test]
    async fn test_mark_attendance_without_generated_otp_is_invalid() {
        let session = Session::new("CS101".into(), "A".into(), "Algorithms".into());
        let session_id = session.id;

        let mut session_repo = MockSessionRepository::new();
        session_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(session.clone())));

        let svc = service(session_repo, MockAttendanceRepository::new());
        let err = svc
            .mark_attendance("Alice", "7", "123456", &session_id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidOtp));
    }

    #[tokio::test]
    async fn test_mark_attendance_expired_past_window() {
        let session = session_with_otp("123456", OTP_FRESHNESS_WINDOW_SECS + 1);
        let session_id = session.id;

        let mut session_repo = MockSessionRepository::new();
        session_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(session.clone())));

        let svc = service(session_repo, MockAttendanceRepository::new());
        let err = svc
            .mark_attendance("Alice", "7", "123456", &session_id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::OtpExpired));
    }

    #[tokio::test]
    async fn test_mark_attendance_succeeds_at_window_boundary() {
        let session = session_with_otp("123456", OTP_FRESHNESS_WINDOW_SECS);
        let session_id = session.id;

        let mut session_repo = MockSessionRepository::new();
        session_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(session.clone())));

        let mut attendance_repo = MockAttendanceRepository::new();
        attendance_repo
            .expect_exists()
            .returning(|_, _, _| Ok(false));
        attendance_repo
            .expect_create()
            .returning(|r| Ok(r.clone()));

        let svc = service(session_repo, attendance_repo);
        svc.mark_attendance("Alice", "7", "123456", &session_id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_mark_attendance_duplicate_yields_conflict_without_write() {
        let session = session_with_otp("123456", 10);
        let session_id = session.id;

        let mut session_repo = MockSessionRepository::new();
        session_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(session.clone())));

        let mut attendance_repo = MockAttendanceRepository::new();
        attendance_repo
            .expect_exists()
            .returning(|_, _, _| Ok(true));
        attendance_repo.expect_create().times(0);

        let svc = service(session_repo, attendance_repo);
        let err = svc
            .mark_attendance("Alice", "7", "123456", &session_id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::AlreadyMarked));
    }

    #[tokio::test]
    async fn test_mark_attendance_concurrent_duplicate_resolved_by_insert() {
        // Two identical submissions can both pass the existence check; the
        // store's unique index decides, and the loser still sees a conflict
        let session = session_with_otp("123456", 10);
        let session_id = session.id;

        let mut session_repo = MockSessionRepository::new();
        session_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(session.clone())));

        let mut attendance_repo = MockAttendanceRepository::new();
        attendance_repo
            .expect_exists()
            .returning(|_, _, _| Ok(false));
        attendance_repo
            .expect_create()
            .returning(|_| Err(DomainError::AlreadyMarked));

        let svc = service(session_repo, attendance_repo);
        let err = svc
            .mark_attendance("Alice", "7", "123456", &session_id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::AlreadyMarked));
    }

    #[tokio::test]
    async fn test_list_attendance_returns_all_entries() {
        let session_id = Uuid::new_v4();
        let records = vec![
            AttendanceRecord::new("Alice".into(), "7".into(), session_id),
            AttendanceRecord::new("Bob".into(), "8".into(), session_id),
        ];

        let mut attendance_repo = MockAttendanceRepository::new();
        attendance_repo
            .expect_list_by_session()
            .with(eq(session_id))
            .returning(move |_| Ok(records.clone()));

        let svc = service(MockSessionRepository::new(), attendance_repo);
        let entries = svc.list_attendance(&session_id).await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Alice");
        assert_eq!(entries[0].roll_no, "7");
        assert_eq!(entries[1].name, "Bob");
    }

    #[tokio::test]
    async fn test_export_unknown_session() {
        let mut session_repo = MockSessionRepository::new();
        session_repo
            .expect_find_by_id()
            .returning(|_| Ok(None));

        let svc = service(session_repo, MockAttendanceRepository::new());
        let err = svc.export_attendance(&Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::SessionNotFound));
    }
}
