use std::sync::Arc;

use anyhow::Result;
use prompt_curator_core::{
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, env_parse_with_default, env_string_with_default,
};
use prompt_curator_http::{AppState, serve};
use prompt_curator_service::PromptService;
use prompt_curator_storage::StorageBackend;

pub(crate) async fn run(port: Option<u16>, host: Option<String>, database_url: &str) -> Result<()> {
    let port = port.unwrap_or_else(|| env_parse_with_default("SERVER_PORT", DEFAULT_SERVER_PORT));
    let host = host.unwrap_or_else(|| env_string_with_default("SERVER_HOST", DEFAULT_SERVER_HOST));

    let storage = StorageBackend::connect(database_url).await?;
    tracing::info!(backend = ?storage.kind(), "storage ready");
    let state = Arc::new(AppState::new(PromptService::new(Arc::new(storage))));

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Starting RPC server on {}", listener.local_addr()?);
    serve(listener, state, shutdown_signal()).await?;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
}
