//! HTTP server for the print pricing engine.

use std::net::SocketAddr;

use anyhow::Context;
use print_pricing::api::{AppState, create_router};
use print_pricing::config::ConfigLoader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG_PATH: &str = "./config/catalog";
const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path =
        std::env::var("PRINT_PRICING_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let port = match std::env::var("PORT") {
        Ok(value) => value
            .parse::<u16>()
            .with_context(|| format!("PORT must be a port number, got '{}'", value))?,
        Err(_) => DEFAULT_PORT,
    };

    let loader = ConfigLoader::load(&config_path)
        .with_context(|| format!("Failed to load catalog from {}", config_path))?;
    tracing::info!(
        shop = %loader.shop().name,
        version = %loader.shop().version,
        "Catalog loaded"
    );

    let app = create_router(AppState::new(loader));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Print pricing engine listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
