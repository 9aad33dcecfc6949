// src/main.rs
//
// Natal chart HTTP server backed by the Swiss Ephemeris.
//
//   SWISSEPH_LIB_DIR=/usr/local/lib cargo run --features swisseph --bin natal_server
//
// Environment: HOST, PORT, SE_EPHE_PATH, SE_REQUIRE_FILES, RUST_LOG (default: natal_chart=info)

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use natal_chart::http::{create_router, AppState};
use natal_chart::{ServerConfig, SwissEph};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("natal_chart=info,tower_http=info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let config = ServerConfig::from_env()?;
    info!(?config, "starting natal chart server");

    let engine = SwissEph::new(&config.ephemeris)?;
    let app = create_router(AppState::new(Arc::new(engine)));

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
