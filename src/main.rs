//! Daily-Image Service — Binary Entrypoint
//! Boots the background fetch-with-fallback and the Axum observer surface.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use apod_daily::config::ApiConfig;
use apod_daily::{api, metrics, ApodClient, AppState, DailyImageController};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("apod_daily=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = ApiConfig::from_env();
    let handle = metrics::install(config.request_timeout.as_secs());

    let client = ApodClient::new(config.clone())?;
    let controller = DailyImageController::start(Arc::new(client));

    let router = api::create_router(AppState { controller }).merge(metrics::router(handle));

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "serving daily-image state");
    axum::serve(listener, router).await?;
    Ok(())
}
