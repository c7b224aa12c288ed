use anyhow::{bail, Context};

use crate::app::app;
use crate::config::{config, StorageBackend};
use crate::is_production;
use crate::state::AppState;

pub async fn handle(port: Option<u16>, memory: bool) -> anyhow::Result<()> {
    let mut config = config().clone();

    if let Some(port) = port {
        config.api.port = port;
    }
    if memory {
        config.database.storage = StorageBackend::Memory;
    }

    if is_production!() && config.database.storage == StorageBackend::Memory {
        bail!("in-memory storage is not allowed in production");
    }

    tracing::info!("Starting Todo Collab API in {:?} mode", config.environment);

    let state = AppState::from_config(&config).await?;
    let router = app(state, &config);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, router).await.context("server error")
}
