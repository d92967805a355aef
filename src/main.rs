mod assistant;
mod auth;
mod config;
mod db;
mod scheduling;
mod server;
mod types;

use std::sync::Arc;

use tracing::info;

use crate::assistant::AssistantClient;
use crate::config::AppConfig;
use crate::db::RoomDb;
use crate::types::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = AppConfig::load().map_err(|e| anyhow::anyhow!("config: {e}"))?;

    let db = RoomDb::open(&config.db_path)?;
    info!("Database ready at {}", config.db_path);

    let assistant = AssistantClient::new(config.assistant.clone());
    let state = Arc::new(AppState { db, assistant });

    let router = server::create_router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("roomreg listening on {}", config.bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
