//! Worker-facing pull/push endpoints.

use axum::extract::State;
use axum::Json;
use tracing::{debug, warn};

use distcalc_compute::EngineError;
use distcalc_core::{AckResponse, TaskResponse, TaskResultRequest};

use crate::state::SharedState;

use super::{engine_error, ApiError};

/// Hand out the oldest queued task. An empty queue is a plain 404 that
/// workers treat as "try again later".
pub async fn claim_task(State(state): State<SharedState>) -> Result<Json<TaskResponse>, ApiError> {
    let task = state.scheduler.claim_next().map_err(engine_error)?;
    debug!(
        "Dispatching task {}: {} {} {}",
        task.id, task.arg1, task.operation, task.arg2
    );
    Ok(Json(TaskResponse { task }))
}

/// Accept a worker's result. Results for tasks that are no longer
/// outstanding are logged and dropped with a 404.
pub async fn submit_task_result(
    State(state): State<SharedState>,
    Json(req): Json<TaskResultRequest>,
) -> Result<Json<AckResponse>, ApiError> {
    let outcome = req
        .id
        .parse::<u64>()
        .map_err(|_| EngineError::UnknownTask(req.id.clone()))
        .and_then(|id| {
            state
                .scheduler
                .apply_result(id, req.result, req.is_failure())
        });

    match outcome {
        Ok(_) => Ok(Json(AckResponse {
            status: "OK".to_string(),
        })),
        Err(e) => {
            warn!("Dropping result for task {}: {}", req.id, e);
            Err(engine_error(e))
        }
    }
}
