//! Submitter endpoints: compile + register, list, and point lookup.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::warn;

use distcalc_compute::EngineError;
use distcalc_core::{
    ExpressionListResponse, ExpressionResponse, SubmitExpressionRequest, SubmitExpressionResponse,
};

use crate::state::SharedState;

use super::{api_error, engine_error, ApiError};

/// Compile an expression and queue its first tasks. Compile errors are the
/// submitter's fault and come back as 422 with the parser's message.
pub async fn calculate(
    State(state): State<SharedState>,
    Json(req): Json<SubmitExpressionRequest>,
) -> Result<(StatusCode, Json<SubmitExpressionResponse>), ApiError> {
    match state.scheduler.submit(&req.expression) {
        Ok(id) => Ok((
            StatusCode::CREATED,
            Json(SubmitExpressionResponse { id: id.to_string() }),
        )),
        Err(e) => {
            warn!("Rejected expression {:?}: {}", req.expression, e);
            Err(api_error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))
        }
    }
}

pub async fn list_expressions(State(state): State<SharedState>) -> Json<ExpressionListResponse> {
    Json(ExpressionListResponse {
        expressions: state.scheduler.list(),
    })
}

pub async fn get_expression(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<ExpressionResponse>, ApiError> {
    let parsed = id
        .parse::<u64>()
        .map_err(|_| engine_error(EngineError::UnknownExpression(id.clone())))?;
    let expression = state.scheduler.get(parsed).map_err(engine_error)?;
    Ok(Json(ExpressionResponse { expression }))
}
