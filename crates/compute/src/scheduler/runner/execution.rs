use distcalc_core::{ExpressionStatus, TaskPayload};
use tracing::{debug, info, warn};

use crate::scheduler::state::discover_tasks;
use crate::scheduler::task::EngineError;
use crate::scheduler::types::TaskId;

use super::Scheduler;

impl Scheduler {
    /// Hand the oldest queued task to a worker and mark its expression
    /// `in_progress`. An empty queue is the normal [`EngineError::NoTaskAvailable`].
    pub fn claim_next(&self) -> Result<TaskPayload, EngineError> {
        let mut guard = self.lock();
        let state = &mut *guard;
        let task = state.ledger.claim_next().ok_or(EngineError::NoTaskAvailable)?;
        let payload = task.payload();
        let expression_id = task.expression_id;

        if let Some(expression) = state.expressions.get_mut(&expression_id) {
            expression.mark_in_progress();
        }
        debug!(task_id = %payload.id, expression_id, "task claimed");

        Ok(payload)
    }

    /// Fold a worker's result into its expression and queue whatever became ready.
    ///
    /// A failed result marks the expression `error` for good; sibling tasks
    /// already queued stay claimable and their results are discarded on arrival.
    /// Unknown ids change nothing.
    pub fn apply_result(
        &self,
        task_id: TaskId,
        value: f64,
        failed: bool,
    ) -> Result<ExpressionStatus, EngineError> {
        let mut guard = self.lock();
        let state = &mut *guard;

        let expression_id = state
            .ledger
            .get(task_id)
            .map(|task| task.expression_id)
            .ok_or_else(|| EngineError::UnknownTask(task_id.to_string()))?;
        let expression = state
            .expressions
            .get_mut(&expression_id)
            .ok_or_else(|| EngineError::UnknownExpression(expression_id.to_string()))?;
        let Some(task) = state.ledger.take(task_id) else {
            return Err(EngineError::UnknownTask(task_id.to_string()));
        };

        if expression.is_failed() {
            debug!(task_id, expression_id, "discarding result for failed expression");
            return Ok(ExpressionStatus::Error);
        }
        if failed {
            warn!(task_id, expression_id, "task failed, expression marked as error");
            expression.mark_failed();
            return Ok(ExpressionStatus::Error);
        }

        expression.tree.resolve(task.node, value);
        let emitted = discover_tasks(expression, &mut state.ledger, &self.operation_times);
        expression.refresh_status();

        let status = expression.status();
        if status.is_terminal() {
            info!(expression_id, result = ?expression.result(), "expression {}", status);
        } else {
            debug!(task_id, expression_id, emitted, "result applied");
        }

        Ok(status)
    }
}
