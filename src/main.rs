//! Shop server entry point.
//!
//! Loads [`ShopConfig`], starts the actors, serves the API until Ctrl-C and
//! then shuts the actors down in order.

use actor_shop::api::{self, AppState};
use actor_shop::lifecycle::{setup_tracing, ShopConfig, ShopSystem};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = ShopConfig::from_env().inspect_err(|e| error!(error = %e, "Invalid configuration"))?;

    let system = ShopSystem::start(config.channel_capacity, config.password_hasher);
    if let Some(seed) = &config.admin {
        system.seed_admin(seed).await?;
    }
    if !config.webhook_protected() {
        warn!("WEBHOOK_SECRET is not set; the order status webhook accepts any caller");
    }

    let app = api::router(AppState::new(&system, &config));
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router (and its client clones) is gone once serve returns.
    system.shutdown().await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
