use std::collections::{HashMap, VecDeque};

use super::task::Task;
use super::types::TaskId;

/// Outstanding tasks plus the FIFO order in which unclaimed ones are dispatched.
///
/// A task is in `tasks` from creation until its result arrives. Its id is in
/// `queue` only until a worker claims it.
#[derive(Debug, Default)]
pub struct TaskLedger {
    tasks: HashMap<TaskId, Task>,
    queue: VecDeque<TaskId>,
    last_id: TaskId,
}

impl TaskLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> TaskId {
        self.last_id += 1;
        self.last_id
    }

    /// Record a task and append it to the dispatch queue.
    pub fn insert(&mut self, task: Task) {
        self.queue.push_back(task.id);
        self.tasks.insert(task.id, task);
    }

    /// Pop the head of the dispatch queue. The task stays outstanding.
    pub fn claim_next(&mut self) -> Option<&Task> {
        let id = self.queue.pop_front()?;
        self.tasks.get(&id)
    }

    /// Remove a task for good. Also drops it from the queue if it was never claimed.
    pub fn take(&mut self, id: TaskId) -> Option<Task> {
        let task = self.tasks.remove(&id)?;
        if let Some(pos) = self.queue.iter().position(|queued| *queued == id) {
            self.queue.remove(pos);
        }
        Some(task)
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn outstanding(&self) -> usize {
        self.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use distcalc_core::Operator;

    use super::*;

    fn task(ledger: &mut TaskLedger, arg1: f64) -> Task {
        Task {
            id: ledger.next_id(),
            expression_id: 1,
            arg1,
            arg2: 1.0,
            operation: Operator::Add,
            operation_time: 0,
            node: 0,
        }
    }

    #[test]
    fn claims_in_insertion_order() {
        let mut ledger = TaskLedger::new();
        for v in [1.0, 2.0, 3.0] {
            let t = task(&mut ledger, v);
            ledger.insert(t);
        }
        assert_eq!(ledger.claim_next().map(|t| t.arg1), Some(1.0));
        assert_eq!(ledger.claim_next().map(|t| t.arg1), Some(2.0));
        assert_eq!(ledger.queued(), 1);
        assert_eq!(ledger.outstanding(), 3);
    }

    #[test]
    fn claimed_task_stays_outstanding_until_taken() {
        let mut ledger = TaskLedger::new();
        let t = task(&mut ledger, 5.0);
        let id = t.id;
        ledger.insert(t);

        assert!(ledger.claim_next().is_some());
        assert!(ledger.claim_next().is_none());
        assert!(ledger.get(id).is_some());

        assert_eq!(ledger.take(id).map(|t| t.arg1), Some(5.0));
        assert!(ledger.take(id).is_none());
        assert_eq!(ledger.outstanding(), 0);
    }

    #[test]
    fn taking_unclaimed_task_removes_it_from_queue() {
        let mut ledger = TaskLedger::new();
        let first = task(&mut ledger, 1.0);
        let second = task(&mut ledger, 2.0);
        let first_id = first.id;
        ledger.insert(first);
        ledger.insert(second);

        ledger.take(first_id);
        assert_eq!(ledger.queued(), 1);
        assert_eq!(ledger.claim_next().map(|t| t.arg1), Some(2.0));
    }

    #[test]
    fn ids_are_monotonic() {
        let mut ledger = TaskLedger::new();
        assert_eq!(ledger.next_id(), 1);
        assert_eq!(ledger.next_id(), 2);
    }
}
