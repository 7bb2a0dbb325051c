//! # Rollcall Core - Domain Module
//!
//! Domain entities for the attendance application.

pub mod attendance;
pub mod session;

// Re-export all entities
pub use attendance::{AttendanceEntry, AttendanceRecord};
pub use session::Session;
