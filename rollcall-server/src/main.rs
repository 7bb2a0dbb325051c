use axum::{routing::get, routing::post, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use rollcall_api::{
    handlers::{attendance, health, session},
    state::AppState,
};
use rollcall_core::services::AttendanceService;
use rollcall_infrastructure::{
    create_pool, run_migrations, PgAttendanceRepository, PgSessionRepository,
};
use rollcall_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize telemetry
    rollcall_shared::telemetry::init_telemetry(&config.app.env);

    info!("Rollcall server starting...");

    // Connect to Database
    info!("Connecting to database...");
    let pool = create_pool(&config.database.url, config.database.max_connections).await?;
    run_migrations(&pool).await?;
    info!("Database connection established.");

    // Wire service and state
    let service = Arc::new(AttendanceService::new(
        Arc::new(PgSessionRepository::new(pool.clone())),
        Arc::new(PgAttendanceRepository::new(pool)),
        config.otp.freshness_window_secs,
    ));
    let state = AppState {
        service,
        config: config.clone(),
    };

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Teacher routes
        .route("/api/start-session", post(session::start_session))
        .route("/api/generate-otp", post(session::generate_otp))
        // Student route
        .route("/api/mark-attendance", post(attendance::mark_attendance))
        // Listing and export
        .route(
            "/api/session/{id}/attendance",
            get(attendance::list_attendance),
        )
        .route(
            "/api/session/{id}/attendance/download",
            get(attendance::download_attendance),
        )
        // Add State
        .with_state(state)
        // Browser clients submit from the attendance link
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
