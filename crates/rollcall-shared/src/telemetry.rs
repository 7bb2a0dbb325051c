//! Telemetry setup

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global subscriber with JSON output. `RUST_LOG` wins when
/// set; otherwise the default level follows the application environment.
pub fn init_telemetry(app_env: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(app_env)));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json())
        .init();
}

fn default_directive(app_env: &str) -> &'static str {
    match app_env {
        "production" => "info",
        _ => "debug",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_follows_environment() {
        assert_eq!(default_directive("production"), "info");
        assert_eq!(default_directive("development"), "debug");
        assert_eq!(default_directive("staging"), "debug");
    }
}
