//! agent-worker: pulls arithmetic tasks from the orchestrator and pushes
//! results back.
//!
//! Runs `COMPUTING_POWER` independent polling loops until Ctrl-C.

use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use distcalc_agent::{OrchestratorClient, WorkerPool};
use distcalc_core::Config;

// ── CLI ─────────────────────────────────────────────────────────────

/// Distributed calculator worker. Flags override the environment.
#[derive(Parser, Debug)]
#[command(name = "agent-worker", version, about)]
struct Cli {
    /// Number of concurrent workers.
    #[arg(long)]
    computing_power: Option<usize>,

    /// Base URL of the orchestrator.
    #[arg(long)]
    orchestrator_url: Option<String>,

    /// Backoff in milliseconds when the queue is empty or unreachable.
    #[arg(long)]
    poll_interval_ms: Option<u64>,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        if let Some(n) = self.computing_power {
            config.agent.computing_power = n.max(1);
        }
        if let Some(url) = self.orchestrator_url {
            config.agent.orchestrator_url = url;
        }
        if let Some(ms) = self.poll_interval_ms.filter(|ms| *ms > 0) {
            config.agent.poll_interval_ms = ms;
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    distcalc_core::config::load_dotenv();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let mut config = Config::from_env();
    cli.apply(&mut config);
    config.log_summary();

    let client = Arc::new(OrchestratorClient::new(&config.agent.orchestrator_url));
    let pool = WorkerPool::from_config(&config.agent, client);
    info!(
        "agent-worker polling {} with {} worker(s)",
        config.agent.orchestrator_url,
        pool.size()
    );

    pool.run_until(shutdown_signal()).await;
    Ok(())
}
