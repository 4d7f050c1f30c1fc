use std::collections::BTreeMap;

use distcalc_core::OperationTimes;
use tracing::debug;

use super::expression::Expression;
use super::ledger::TaskLedger;
use super::task::Task;
use super::types::{ExpressionId, SchedulerStats};

/// Everything the scheduler mutates. Only ever touched under the scheduler lock,
/// so discovery + enqueue and apply + rediscovery are each indivisible.
#[derive(Debug, Default)]
pub struct SchedulerState {
    pub expressions: BTreeMap<ExpressionId, Expression>,
    pub ledger: TaskLedger,
    last_expression_id: ExpressionId,
}

impl SchedulerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_expression_id(&mut self) -> ExpressionId {
        self.last_expression_id += 1;
        self.last_expression_id
    }

    pub fn stats(&self) -> SchedulerStats {
        SchedulerStats {
            queued_tasks: self.ledger.queued(),
            outstanding_tasks: self.ledger.outstanding(),
            expressions: self.expressions.len(),
        }
    }
}

/// Emit a task for every ready node of `expression`, in post-order, and return
/// how many were emitted. Running it again on an unchanged tree emits nothing.
pub fn discover_tasks(
    expression: &mut Expression,
    ledger: &mut TaskLedger,
    times: &OperationTimes,
) -> usize {
    let ready = expression.tree.ready_nodes();

    for node in &ready {
        let task = Task {
            id: ledger.next_id(),
            expression_id: expression.id,
            arg1: node.lhs,
            arg2: node.rhs,
            operation: node.op,
            operation_time: times.millis_for(node.op),
            node: node.node,
        };
        debug!(
            expression_id = expression.id,
            task_id = task.id,
            "queued {} {} {}",
            task.arg1,
            task.operation,
            task.arg2
        );
        expression.tree.mark_scheduled(node.node);
        ledger.insert(task);
    }

    ready.len()
}
