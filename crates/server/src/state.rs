use std::sync::Arc;

use distcalc_compute::Scheduler;
use distcalc_core::Config;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub scheduler: Scheduler,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            scheduler: Scheduler::new(config.operations),
            config,
        }
    }
}
