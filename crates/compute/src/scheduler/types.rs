use serde::Serialize;

/// Identity of a submitted expression. Allocated from 1 upward.
pub type ExpressionId = u64;

/// Identity of an emitted task. Allocated from 1 upward.
pub type TaskId = u64;

/// Point-in-time counters of the scheduler aggregate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SchedulerStats {
    /// Tasks waiting in the dispatch queue.
    pub queued_tasks: usize,
    /// Tasks queued or claimed but not yet resolved.
    pub outstanding_tasks: usize,
    /// Expressions ever submitted.
    pub expressions: usize,
}

impl SchedulerStats {
    /// Tasks handed to a worker whose result has not arrived yet.
    pub fn claimed_tasks(&self) -> usize {
        self.outstanding_tasks - self.queued_tasks
    }
}
