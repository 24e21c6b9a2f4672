//! Standalone moderation service process.

use std::sync::Arc;

use dotenv::dotenv;
use modgate_core::{ModerationClient, ModerationConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let backend = Arc::new(ModerationClient::new(ModerationConfig::from_env()));
    let app = modgate_server::app(backend);

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(8787);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "moderation service listening");
    axum::serve(listener, app).await?;

    Ok(())
}
