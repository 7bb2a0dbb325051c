//! Domain services (business logic)

pub mod attendance_service;
pub mod export;

pub use attendance_service::AttendanceService;
