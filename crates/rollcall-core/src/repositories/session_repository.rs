//! Session repository trait (port)

use crate::domain::Session;
use crate::error::DomainError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Session>, DomainError>;
    async fn create(&self, session: &Session) -> Result<Session, DomainError>;

    /// Overwrite the session's OTP and generation timestamp. Returns false
    /// when no row matched the id, so callers can surface the miss instead
    /// of a silent no-op.
    async fn set_otp(
        &self,
        id: &Uuid,
        otp: &str,
        generated_at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;
}
