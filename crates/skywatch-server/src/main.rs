//! Skywatch Server - OpenSky proxy and dashboard host

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use skywatch_server::{api, config::Config, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables win
    let _ = dotenvy::dotenv();
    let config = Config::from_env();

    // Initialize tracing
    let filter = EnvFilter::from_default_env()
        .add_directive("skywatch_server=debug".parse()?)
        .add_directive("skywatch_opensky=debug".parse()?);
    tracing_subscriber::registry()
        .with(filter)
        .with(config.log_json.then(|| fmt::layer().json()))
        .with((!config.log_json).then(|| fmt::layer()))
        .init();

    tracing::info!("Starting Skywatch Server...");

    if !config.credentials().is_configured() {
        tracing::warn!("OPENSKY_USER / OPENSKY_SECRET not set; API requests will fail with 503");
    }

    let port = config.server_port;
    let static_dir = config.static_dir.clone();
    let state = Arc::new(AppState::new(config)?);
    let app = api::routes(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Server is running on http://localhost:{}", port);
    tracing::info!("Serving static files from {}", static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Skywatch Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", err);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
