use crate::scheduler::state::discover_tasks;
use crate::scheduler::task::EngineError;
use crate::scheduler::types::ExpressionId;

use super::Scheduler;

impl Scheduler {
    /// Run a discovery pass over one expression and return the number of
    /// tasks emitted. Idempotent while the tree is unchanged.
    pub fn discover(&self, id: ExpressionId) -> Result<usize, EngineError> {
        let mut guard = self.lock();
        let state = &mut *guard;
        let expression = state
            .expressions
            .get_mut(&id)
            .ok_or_else(|| EngineError::UnknownExpression(id.to_string()))?;
        if expression.is_failed() {
            return Ok(0);
        }
        Ok(discover_tasks(expression, &mut state.ledger, &self.operation_times))
    }
}
