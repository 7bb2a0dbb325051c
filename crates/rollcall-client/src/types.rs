//! Wire types shared with the HTTP facade

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One attendance entry as the server lists it.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteAttendanceRecord {
    pub name: String,
    #[serde(rename = "rollno")]
    pub roll_no: String,
    pub timestamp: DateTime<Utc>,
}
