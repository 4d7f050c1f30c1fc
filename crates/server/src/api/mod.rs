//! Domain-focused API endpoint modules.
//!
//! Each sub-module owns a single responsibility area.
//! The shared error shape lives here in mod.rs.

mod expressions;
mod health;
mod tasks;

use axum::http::StatusCode;
use axum::Json;

use distcalc_compute::EngineError;
use distcalc_core::ErrorResponse;

// ── Shared error shape ───────────────────────────────────────────

pub(crate) type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse { error: message.into() }))
}

/// Every engine condition is an expected "not there" from the caller's view.
pub(crate) fn engine_error(err: EngineError) -> ApiError {
    api_error(StatusCode::NOT_FOUND, err.to_string())
}

// ── Re-exports ───────────────────────────────────────────────────
// Keeps flat `api::foo` paths for route registration.

pub use expressions::{calculate, get_expression, list_expressions};
pub use health::health;
pub use tasks::{claim_task, submit_task_result};
