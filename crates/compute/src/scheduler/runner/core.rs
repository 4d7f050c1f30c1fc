use std::sync::{Mutex, MutexGuard, PoisonError};

use distcalc_core::{ExpressionSummary, OperationTimes};
use tracing::info;

use crate::compiler::{compile, ParseError};
use crate::scheduler::expression::Expression;
use crate::scheduler::state::{discover_tasks, SchedulerState};
use crate::scheduler::task::EngineError;
use crate::scheduler::types::{ExpressionId, SchedulerStats};

/// The reduction engine. A synchronous, thread-safe service.
///
/// Every public operation holds the one state lock for its entire critical
/// section, tree traversal included, and never blocks on anything else while
/// holding it.
pub struct Scheduler {
    pub(super) operation_times: OperationTimes,
    pub(super) state: Mutex<SchedulerState>,
}

impl Scheduler {
    pub fn new(operation_times: OperationTimes) -> Self {
        Self {
            operation_times,
            state: Mutex::new(SchedulerState::new()),
        }
    }

    /// A panic under the lock can only happen between whole operations, so
    /// the state is still consistent and a poisoned lock is recovered.
    pub(super) fn lock(&self) -> MutexGuard<'_, SchedulerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Compile and register an expression, then queue its first tasks.
    /// Nothing is registered when compilation fails.
    pub fn submit(&self, text: &str) -> Result<ExpressionId, ParseError> {
        let tree = compile(text)?;

        let mut guard = self.lock();
        let state = &mut *guard;
        let id = state.next_expression_id();
        let mut expression = Expression::new(id, text, tree);
        let emitted = discover_tasks(&mut expression, &mut state.ledger, &self.operation_times);
        expression.refresh_status();
        info!(
            expression_id = id,
            tasks = emitted,
            status = %expression.status(),
            "registered expression {:?}",
            text
        );
        state.expressions.insert(id, expression);

        Ok(id)
    }

    /// All expressions, ordered by id.
    pub fn list(&self) -> Vec<ExpressionSummary> {
        self.lock()
            .expressions
            .values()
            .map(Expression::summary)
            .collect()
    }

    pub fn get(&self, id: ExpressionId) -> Result<ExpressionSummary, EngineError> {
        self.lock()
            .expressions
            .get(&id)
            .map(Expression::summary)
            .ok_or_else(|| EngineError::UnknownExpression(id.to_string()))
    }

    pub fn stats(&self) -> SchedulerStats {
        self.lock().stats()
    }
}
