//! Attendance domain entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One student's successful submission against a session. Immutable once
/// written; the timestamp is server-assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub name: String,
    pub roll_no: String,
    pub session_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

impl AttendanceRecord {
    pub fn new(name: String, roll_no: String, session_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            roll_no,
            session_id,
            timestamp: Utc::now(),
        }
    }
}

/// Listing projection of a record (name, roll number, timestamp).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub name: String,
    pub roll_no: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&AttendanceRecord> for AttendanceEntry {
    fn from(record: &AttendanceRecord) -> Self {
        Self {
            name: record.name.clone(),
            roll_no: record.roll_no.clone(),
            timestamp: record.timestamp,
        }
    }
}
