#![doc = include_str!("../README.md")]

mod server;

use clap::Parser;
use hashvault::EncodingService;
use server::config::{CliArgs, ServerConfig};
use server::routes::{AppState, build_router};
use server::telemetry::init_telemetry;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = ServerConfig::try_from(args)?;

    init_telemetry()?;

    let shutdown = CancellationToken::new();
    let state = AppState::new(EncodingService::new(config.encode_delay), shutdown.clone());
    let app = build_router(state);

    let listener = TcpListener::bind(&config.server_addr).await?;
    tracing::info!(
        "Listening on {} with a {:?} encoding delay",
        config.server_addr,
        config.encode_delay
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    tracing::info!("Service shut down successfully");
    Ok(())
}

/// Resolves when the server should begin draining: Ctrl+C, SIGTERM, or a
/// cooperative shutdown requested over HTTP.
///
/// In-flight encoding tasks are abandoned at process exit; their clients
/// have already been answered.
async fn shutdown_signal(shutdown: CancellationToken) {
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
        () = shutdown.cancelled() => {
            tracing::info!("Received shutdown request over HTTP");
        },
    }

    tracing::info!("Shutdown signal received, terminating gracefully...");
}
