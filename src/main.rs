//! Attendance Engine server binary.

use std::env;
use std::time::Duration;

use attendance_engine::api::{AppState, create_router};
use attendance_engine::config::ConfigLoader;
use chrono::Utc;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(60);

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("ATTENDANCE_LOG_JSON", false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Resolves once `signal` fires. If the signal cannot be registered the error is logged
/// and this never resolves, so the server keeps running instead of shutting down.
async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(err) = signal.await {
        error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let config_dir =
        env::var("ATTENDANCE_CONFIG_DIR").unwrap_or_else(|_| "./config/default".to_string());
    let mut config = ConfigLoader::load(&config_dir).map_err(|e| e.to_string())?;
    if let Ok(bind_addr) = env::var("ATTENDANCE_BIND") {
        config = config
            .with_bind_addr(bind_addr)
            .map_err(|e| e.to_string())?;
    }
    let bind_addr = config.service().bind_addr.clone();

    let state = AppState::new(config).map_err(|e| e.to_string())?;

    let sessions = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
        loop {
            interval.tick().await;
            let purged = sessions.sessions().purge_expired(Utc::now());
            if purged > 0 {
                debug!(purged, "Expired sessions purged");
            }
        }
    });

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("bind {bind_addr} failed: {e}"))?;
    info!(config_dir = %config_dir, "attendance-engine listening on {bind_addr}");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_on(tokio::signal::ctrl_c()))
        .await
        .map_err(|e| format!("server failed: {e}"))
}
