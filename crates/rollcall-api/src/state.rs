use std::sync::Arc;

use rollcall_core::services::AttendanceService;
use rollcall_infrastructure::{PgAttendanceRepository, PgSessionRepository};
use rollcall_shared::config::AppConfig;

pub type PgAttendanceService = AttendanceService<PgSessionRepository, PgAttendanceRepository>;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PgAttendanceService>,
    pub config: AppConfig,
}
