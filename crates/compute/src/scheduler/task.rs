use distcalc_core::{Operator, TaskPayload};

use crate::compiler::NodeId;

use super::types::{ExpressionId, TaskId};

/// Expected, caller-retriable engine conditions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("no task available")]
    NoTaskAvailable,
    #[error("Task {0} not found")]
    UnknownTask(String),
    #[error("Expression {0} not found")]
    UnknownExpression(String),
}

/// One binary operation extracted from a ready subtree.
///
/// Operands are snapshotted at creation; `node` points back into the owning
/// expression's tree and is never exposed to workers.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub expression_id: ExpressionId,
    pub arg1: f64,
    pub arg2: f64,
    pub operation: Operator,
    /// Simulated compute cost in milliseconds.
    pub operation_time: u64,
    pub node: NodeId,
}

impl Task {
    pub fn payload(&self) -> TaskPayload {
        TaskPayload {
            id: self.id.to_string(),
            arg1: self.arg1,
            arg2: self.arg2,
            operation: self.operation,
            operation_time: self.operation_time,
        }
    }
}
