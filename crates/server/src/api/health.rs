//! Liveness and queue counters.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use distcalc_compute::SchedulerStats;

use crate::state::SharedState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub claimed_tasks: usize,
    #[serde(flatten)]
    pub scheduler: SchedulerStats,
}

pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let stats = state.scheduler.stats();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        claimed_tasks: stats.claimed_tasks(),
        scheduler: stats,
    })
}
