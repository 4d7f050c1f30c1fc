//! JSON bodies exchanged between submitters, the orchestrator and workers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::operator::Operator;

/// Marker a worker puts in [`TaskResultRequest::status`] when evaluation failed.
pub const TASK_STATUS_ERROR: &str = "error";

/// Lifecycle of a submitted expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionStatus {
    Pending,
    InProgress,
    Completed,
    Error,
}

impl ExpressionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ExpressionStatus::Pending => "pending",
            ExpressionStatus::InProgress => "in_progress",
            ExpressionStatus::Completed => "completed",
            ExpressionStatus::Error => "error",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ExpressionStatus::Completed | ExpressionStatus::Error)
    }
}

impl fmt::Display for ExpressionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Submitter side ───────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitExpressionRequest {
    pub expression: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitExpressionResponse {
    pub id: String,
}

/// Public view of an expression record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionSummary {
    pub id: String,
    pub expression: String,
    pub status: ExpressionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpressionListResponse {
    pub expressions: Vec<ExpressionSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpressionResponse {
    pub expression: ExpressionSummary,
}

// ── Worker side ──────────────────────────────────────────────

/// A claimed task as handed to a worker. Never carries tree references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPayload {
    pub id: String,
    pub arg1: f64,
    pub arg2: f64,
    pub operation: Operator,
    /// Simulated compute cost in milliseconds.
    pub operation_time: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResponse {
    pub task: TaskPayload,
}

/// Result pushed back by a worker. A non-empty `status` marks a failed evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResultRequest {
    pub id: String,
    #[serde(default)]
    pub result: f64,
    #[serde(default)]
    pub status: String,
}

impl TaskResultRequest {
    pub fn success(id: impl Into<String>, result: f64) -> Self {
        Self {
            id: id.into(),
            result,
            status: String::new(),
        }
    }

    pub fn failure(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            result: 0.0,
            status: TASK_STATUS_ERROR.to_string(),
        }
    }

    pub fn is_failure(&self) -> bool {
        !self.status.is_empty()
    }
}

// ── Shared ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub status: String,
}
