use std::net::SocketAddr;
use std::sync::Arc;

use anicama_sheets::{FileWorkbook, LeadSheetRepo, MemoryWorkbook, Workbook};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use anicama_api::config::ServerConfig;
use anicama_api::router::build_app_router;
use anicama_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "anicama_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        sheet = %config.sheet_name,
        "Loaded server configuration"
    );

    // --- Workbook ---
    let workbook: Arc<dyn Workbook> = match &config.workbook_path {
        Some(path) => {
            let workbook = FileWorkbook::open(path)
                .await
                .expect("Failed to open workbook file");
            tracing::info!(path = %path.display(), "Workbook file opened");
            Arc::new(workbook)
        }
        None => {
            tracing::warn!("WORKBOOK_PATH not set, leads are kept in memory only");
            Arc::new(MemoryWorkbook::new())
        }
    };

    // --- App state ---
    let state = AppState {
        leads: Arc::new(LeadSheetRepo::new(workbook, config.sheet_name.clone())),
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
