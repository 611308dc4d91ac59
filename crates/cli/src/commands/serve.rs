use anyhow::Result;
use cdm_admin_core::PageSize;
use cdm_admin_http::{AppState, create_router};
use std::path::PathBuf;
use std::sync::Arc;

use crate::open_storage;

pub(crate) async fn run(
    host: String,
    port: u16,
    seed: Option<PathBuf>,
    page_size: PageSize,
) -> Result<()> {
    let storage = open_storage(seed)?;
    let state = Arc::new(AppState::new(storage, page_size));

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!(%addr, default_page_size = %page_size, "starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "failed to listen for shutdown signal");
            }
        })
        .await?;
    tracing::info!("HTTP server stopped");
    Ok(())
}
