// ============================================================================
// Rollcall Infrastructure - PostgreSQL Attendance Repository
// File: crates/rollcall-infrastructure/src/database/postgres/attendance_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Row};
use tracing::{error, info};
use uuid::Uuid;

use rollcall_core::domain::AttendanceRecord;
use rollcall_core::error::DomainError;
use rollcall_core::repositories::AttendanceRepository;

pub struct PgAttendanceRepository {
    pool: PgPool,
}

impl PgAttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct AttendanceRow {
    pub id: Uuid,
    pub name: String,
    pub rollno: String,
    pub sessionid: Uuid,
    pub timestamp: DateTime<Utc>,
}

impl From<AttendanceRow> for AttendanceRecord {
    fn from(row: AttendanceRow) -> Self {
        AttendanceRecord {
            id: row.id,
            name: row.name,
            roll_no: row.rollno,
            session_id: row.sessionid,
            timestamp: row.timestamp,
        }
    }
}

#[async_trait]
impl AttendanceRepository for PgAttendanceRepository {
    async fn exists(
        &self,
        name: &str,
        roll_no: &str,
        session_id: &Uuid,
    ) -> Result<bool, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM attendance
                WHERE name = $1 AND rollno = $2 AND sessionid = $3
            ) AS found
            "#,
        )
        .bind(name)
        .bind(roll_no)
        .bind(session_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error checking attendance existence: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.get::<bool, _>("found"))
    }

    async fn create(&self, record: &AttendanceRecord) -> Result<AttendanceRecord, DomainError> {
        let row: AttendanceRow = sqlx::query_as(
            r#"
            INSERT INTO attendance (id, name, rollno, sessionid, timestamp)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, rollno, sessionid, timestamp
            "#,
        )
        .bind(record.id)
        .bind(&record.name)
        .bind(&record.roll_no)
        .bind(record.session_id)
        .bind(record.timestamp)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating attendance record: {}", e);
            let msg = e.to_string();
            // The unique index on (name, rollno, sessionid) decides races
            // between identical concurrent submissions
            if msg.contains("unique") || msg.contains("duplicate") {
                DomainError::AlreadyMarked
            } else {
                DomainError::DatabaseError(msg)
            }
        })?;

        info!("Attendance recorded: {} for session {}", row.id, row.sessionid);
        Ok(row.into())
    }

    async fn list_by_session(
        &self,
        session_id: &Uuid,
    ) -> Result<Vec<AttendanceRecord>, DomainError> {
        let rows: Vec<AttendanceRow> = sqlx::query_as(
            r#"
            SELECT id, name, rollno, sessionid, timestamp
            FROM attendance
            WHERE sessionid = $1
            ORDER BY timestamp ASC
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing attendance: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}
