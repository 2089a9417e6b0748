//! Server lifecycle — bind, serve, drain on ctrl-c.

use std::sync::Arc;

use crate::api::router::build_router;
use crate::api::types::ApiContext;
use crate::state::AppState;

/// Bind `addr` and serve until the process receives ctrl-c.
///
/// In-flight requests are drained before the listener closes.
pub async fn serve(state: Arc<AppState>, addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(addr = %local_addr, "Listening");

    let app = build_router(ApiContext::new(state));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received, draining connections");
}
