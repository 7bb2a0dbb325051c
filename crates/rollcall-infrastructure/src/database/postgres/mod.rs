//! PostgreSQL repository implementations

pub mod attendance_repo_impl;
pub mod session_repo_impl;

pub use attendance_repo_impl::PgAttendanceRepository;
pub use session_repo_impl::PgSessionRepository;
