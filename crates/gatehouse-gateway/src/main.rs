//! gatehouse gateway binary.
//!
//! - Auth endpoints under /api/v1/auth (register, login, refresh, logout, me)
//! - Bearer-gated device snapshot at /api/v1/metrics/current
//! - Open gateway status at /api/v1/gateway/status
//! - Graceful shutdown: readiness flips to draining before the listener closes

use tokio::signal;
use tracing_subscriber::{fmt, EnvFilter};

use gatehouse_gateway::{app_state, config, router};

const CONFIG_ENV: &str = "GATEHOUSE_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "gatehouse.yaml";

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_from_file(&path).expect("config load failed");
    let listen = cfg.gateway.listen_addr().expect("gateway.listen must be a valid SocketAddr");

    let state = app_state::AppState::new(cfg).expect("state init failed");
    let app = router::build_router(state.clone());

    tracing::info!(%listen, config = %path, "gatehouse-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .expect("server failed");

    tracing::info!("gatehouse-gateway stopped");
}

/// Resolves on Ctrl+C or SIGTERM, after flagging the state as draining.
async fn shutdown_signal(state: app_state::AppState) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, draining"),
        _ = terminate => tracing::info!("received SIGTERM, draining"),
    }
    state.set_draining();
}
