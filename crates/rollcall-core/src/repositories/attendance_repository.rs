//! Attendance repository trait (port)

use crate::domain::AttendanceRecord;
use crate::error::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Exact match on (name, roll_no, session_id), case-sensitive.
    async fn exists(
        &self,
        name: &str,
        roll_no: &str,
        session_id: &Uuid,
    ) -> Result<bool, DomainError>;

    /// Insert one record. Implementations must hold a unique index on
    /// (name, roll_no, session_id) and map its violation to
    /// `DomainError::AlreadyMarked` so concurrent duplicates resolve
    /// deterministically.
    async fn create(&self, record: &AttendanceRecord) -> Result<AttendanceRecord, DomainError>;

    /// All records for a session, ascending by timestamp.
    async fn list_by_session(
        &self,
        session_id: &Uuid,
    ) -> Result<Vec<AttendanceRecord>, DomainError>;
}
