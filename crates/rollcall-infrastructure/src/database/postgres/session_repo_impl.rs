// ============================================================================
// Rollcall Infrastructure - PostgreSQL Session Repository
// File: crates/rollcall-infrastructure/src/database/postgres/session_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use rollcall_core::domain::Session;
use rollcall_core::error::DomainError;
use rollcall_core::repositories::SessionRepository;

pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct SessionRow {
    pub id: Uuid,
    pub subject: String,
    pub section: String,
    pub course: String,
    pub otp: Option<String>,
    pub otp_generated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session {
            id: row.id,
            subject: row.subject,
            section: row.section,
            course: row.course,
            otp: row.otp,
            otp_generated_at: row.otp_generated_at,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Session>, DomainError> {
        let row: Option<SessionRow> = sqlx::query_as(
            r#"
            SELECT id, subject, section, course, otp, otp_generated_at, created_at
            FROM sessions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding session by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, session: &Session) -> Result<Session, DomainError> {
        info!("Creating session for subject: {}", session.subject);

        let row: SessionRow = sqlx::query_as(
            r#"
            INSERT INTO sessions (id, subject, section, course, otp, otp_generated_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, subject, section, course, otp, otp_generated_at, created_at
            "#,
        )
        .bind(session.id)
        .bind(&session.subject)
        .bind(&session.section)
        .bind(&session.course)
        .bind(&session.otp)
        .bind(session.otp_generated_at)
        .bind(session.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating session: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        info!("Session created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn set_otp(
        &self,
        id: &Uuid,
        otp: &str,
        generated_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE sessions
            SET otp = $2, otp_generated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(otp)
        .bind(generated_at)
        .execute(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error rotating OTP: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        // Zero rows means the id matched nothing; surface that to the caller
        Ok(result.rows_affected() > 0)
    }
}
