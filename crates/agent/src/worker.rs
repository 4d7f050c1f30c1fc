use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use distcalc_core::{DomainError, Operator, TaskResultRequest};

use crate::client::{ReceivedTask, TaskSource};

/// Outcome of one poll-compute-push round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The orchestrator had nothing queued.
    Idle,
    /// Fetching a task failed.
    Unreachable,
    /// A result was delivered; `failed` is set when evaluation failed.
    Completed { task_id: String, failed: bool },
    /// The task was computed but the result could not be delivered.
    Undelivered { task_id: String },
}

impl Step {
    /// Whether the loop should wait before polling again.
    pub fn should_back_off(&self) -> bool {
        matches!(self, Step::Idle | Step::Unreachable)
    }
}

/// One independent polling loop.
pub struct Worker {
    id: usize,
    source: Arc<dyn TaskSource>,
    backoff: Duration,
}

impl Worker {
    pub fn new(id: usize, source: Arc<dyn TaskSource>, backoff: Duration) -> Self {
        Self { id, source, backoff }
    }

    /// Apply the task's operator. Division by zero and unknown symbols are
    /// domain errors, reported back as a failed result.
    pub fn evaluate(task: &ReceivedTask) -> Result<f64, DomainError> {
        let op: Operator = task.operation.parse()?;
        op.apply(task.arg1, task.arg2)
    }

    /// Pull one task, simulate its cost, evaluate it, and push the result.
    pub async fn step(&self) -> Step {
        let task = match self.source.fetch_task().await {
            Ok(Some(task)) => task,
            Ok(None) => return Step::Idle,
            Err(e) => {
                warn!("Worker {}: error getting task: {}", self.id, e);
                return Step::Unreachable;
            }
        };

        info!(
            "Worker {}: received task {}: {} {} {}, simulating {} ms",
            self.id, task.id, task.arg1, task.operation, task.arg2, task.operation_time
        );
        tokio::time::sleep(Duration::from_millis(task.operation_time)).await;

        let result = match Self::evaluate(&task) {
            Ok(value) => TaskResultRequest::success(&task.id, value),
            Err(e) => {
                warn!("Worker {}: error computing task {}: {}", self.id, task.id, e);
                TaskResultRequest::failure(&task.id)
            }
        };

        if let Err(e) = self.source.submit_result(&result).await {
            warn!("Worker {}: error posting result for task {}: {}", self.id, task.id, e);
            return Step::Undelivered { task_id: task.id };
        }
        debug!("Worker {}: delivered result for task {}", self.id, task.id);

        Step::Completed {
            task_id: task.id,
            failed: result.is_failure(),
        }
    }

    /// Poll forever. Backs off after an empty queue or a failed fetch; a
    /// result that could not be delivered is dropped and polling resumes at once.
    pub async fn run(&self) {
        loop {
            if self.step().await.should_back_off() {
                tokio::time::sleep(self.backoff).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::AgentError;

    /// Serves a fixed script of fetch outcomes and records every pushed result.
    #[derive(Default)]
    struct ScriptedSource {
        fetches: Mutex<VecDeque<Result<Option<ReceivedTask>, AgentError>>>,
        pushed: Mutex<Vec<TaskResultRequest>>,
        reject_pushes: bool,
    }

    impl ScriptedSource {
        fn with(fetches: Vec<Result<Option<ReceivedTask>, AgentError>>) -> Self {
            Self {
                fetches: Mutex::new(fetches.into()),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl TaskSource for ScriptedSource {
        async fn fetch_task(&self) -> Result<Option<ReceivedTask>, AgentError> {
            self.fetches.lock().unwrap().pop_front().unwrap_or(Ok(None))
        }

        async fn submit_result(&self, result: &TaskResultRequest) -> Result<(), AgentError> {
            if self.reject_pushes {
                return Err(AgentError::Status { status: 503, body: "busy".into() });
            }
            self.pushed.lock().unwrap().push(result.clone());
            Ok(())
        }
    }

    fn task(id: &str, arg1: f64, op: &str, arg2: f64) -> ReceivedTask {
        ReceivedTask {
            id: id.into(),
            arg1,
            arg2,
            operation: op.into(),
            operation_time: 0,
        }
    }

    fn worker(source: Arc<ScriptedSource>) -> Worker {
        Worker::new(0, source, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn idle_when_queue_is_empty() {
        let source = Arc::new(ScriptedSource::default());
        assert_eq!(worker(source.clone()).step().await, Step::Idle);
        assert!(source.pushed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn computes_and_pushes_result() {
        let source = Arc::new(ScriptedSource::with(vec![Ok(Some(task("1", 11.0, "+", 2.0)))]));
        let step = worker(source.clone()).step().await;

        assert_eq!(step, Step::Completed { task_id: "1".into(), failed: false });
        assert_eq!(*source.pushed.lock().unwrap(), vec![TaskResultRequest::success("1", 13.0)]);
    }

    #[tokio::test]
    async fn division_by_zero_is_reported_as_failure() {
        let source = Arc::new(ScriptedSource::with(vec![Ok(Some(task("2", 5.0, "/", 0.0)))]));
        let step = worker(source.clone()).step().await;

        assert_eq!(step, Step::Completed { task_id: "2".into(), failed: true });
        let pushed = source.pushed.lock().unwrap();
        assert_eq!(pushed[0].status, "error");
    }

    #[tokio::test]
    async fn unknown_operator_is_reported_as_failure() {
        let source = Arc::new(ScriptedSource::with(vec![Ok(Some(task("3", 2.0, "^", 3.0)))]));
        let step = worker(source.clone()).step().await;
        assert_eq!(step, Step::Completed { task_id: "3".into(), failed: true });
    }

    #[tokio::test]
    async fn fetch_error_is_unreachable() {
        let source = Arc::new(ScriptedSource::with(vec![Err(AgentError::Status {
            status: 500,
            body: String::new(),
        })]));
        let step = worker(source).step().await;
        assert_eq!(step, Step::Unreachable);
        assert!(step.should_back_off());
    }

    #[tokio::test]
    async fn rejected_push_is_undelivered() {
        let source = Arc::new(ScriptedSource {
            fetches: Mutex::new(vec![Ok(Some(task("4", 1.0, "-", 1.0)))].into()),
            reject_pushes: true,
            ..Default::default()
        });
        let step = worker(source).step().await;
        assert_eq!(step, Step::Undelivered { task_id: "4".into() });
        assert!(!step.should_back_off());
    }

    #[test]
    fn evaluate_each_operator() {
        assert_eq!(Worker::evaluate(&task("1", 6.0, "*", 7.0)), Ok(42.0));
        assert_eq!(Worker::evaluate(&task("1", 6.0, "/", 4.0)), Ok(1.5));
        assert_eq!(Worker::evaluate(&task("1", 6.0, "-", 7.0)), Ok(-1.0));
        assert_eq!(
            Worker::evaluate(&task("1", 6.0, "%", 7.0)),
            Err(DomainError::InvalidOperator)
        );
    }
}
