//! Gateway process entry point.

use anyhow::Context;
use hashgate_gateway::{AppState, GatewayConfig, router};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hashgate=debug,tower_http=debug,info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::from_env().context("loading configuration")?;
    let state = AppState::new(&config).context("building collaborator clients")?;

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "gateway listening");

    axum::serve(listener, router(state)).await.context("serving")?;

    Ok(())
}
