mod api;
mod background;
mod router;
mod state;

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use distcalc_core::Config;

use crate::state::AppState;

fn load_config() -> Config {
    distcalc_core::config::load_dotenv();
    Config::from_env()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested, draining connections");
}

async fn serve(config: Config) -> anyhow::Result<()> {
    config.log_summary();
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = Arc::new(AppState::new(config));
    tokio::spawn(background::report_pending(
        state.clone(),
        background::QUEUE_REPORT_INTERVAL,
    ));

    let app = router::build_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Orchestrator listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true)
        .init();

    serve(config).await
}
