//! Repository traits (ports)

pub mod attendance_repository;
pub mod session_repository;

pub use attendance_repository::AttendanceRepository;
pub use session_repository::SessionRepository;
