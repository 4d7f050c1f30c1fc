use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::info;

use distcalc_core::config::AgentConfig;

use crate::client::TaskSource;
use crate::worker::Worker;

/// A fixed number of workers sharing one task source.
pub struct WorkerPool {
    size: usize,
    backoff: Duration,
    source: Arc<dyn TaskSource>,
}

impl WorkerPool {
    pub fn new(size: usize, backoff: Duration, source: Arc<dyn TaskSource>) -> Self {
        Self {
            size: size.max(1),
            backoff,
            source,
        }
    }

    pub fn from_config(config: &AgentConfig, source: Arc<dyn TaskSource>) -> Self {
        Self::new(config.computing_power, config.poll_interval(), source)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Start every worker loop. Dropping the returned set aborts them.
    pub fn spawn(&self) -> JoinSet<()> {
        let mut workers = JoinSet::new();
        for id in 0..self.size {
            let worker = Worker::new(id, Arc::clone(&self.source), self.backoff);
            workers.spawn(async move { worker.run().await });
        }
        workers
    }

    /// Run the pool until `shutdown` resolves, then abort all workers.
    /// A task in flight at that moment is abandoned without a result.
    pub async fn run_until<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut workers = self.spawn();
        info!("Started {} worker(s)", self.size);

        shutdown.await;

        info!("Stopping workers...");
        workers.abort_all();
        while workers.join_next().await.is_some() {}
        info!("All workers stopped");
    }
}
