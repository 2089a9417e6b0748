use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use caresage::api;
use caresage::config;
use caresage::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("CareSage starting v{}", config::APP_VERSION);

    let state = match AppState::load() {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!("Startup failed: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = api::serve(state, &config::bind_addr()).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}
