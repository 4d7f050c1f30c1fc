//! Runs a real worker pool against an in-process scheduler.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use distcalc_agent::{AgentError, ReceivedTask, TaskSource, WorkerPool};
use distcalc_compute::{EngineError, ExpressionId, Scheduler};
use distcalc_core::{ExpressionStatus, OperationTimes, TaskResultRequest};

/// Talks to a `Scheduler` directly instead of over HTTP.
struct SchedulerSource {
    scheduler: Arc<Scheduler>,
}

#[async_trait]
impl TaskSource for SchedulerSource {
    async fn fetch_task(&self) -> Result<Option<ReceivedTask>, AgentError> {
        match self.scheduler.claim_next() {
            Ok(task) => Ok(Some(ReceivedTask {
                id: task.id,
                arg1: task.arg1,
                arg2: task.arg2,
                operation: task.operation.symbol().to_string(),
                operation_time: task.operation_time,
            })),
            Err(EngineError::NoTaskAvailable) => Ok(None),
            Err(e) => Err(AgentError::Status { status: 404, body: e.to_string() }),
        }
    }

    async fn submit_result(&self, result: &TaskResultRequest) -> Result<(), AgentError> {
        let id = result.id.parse().map_err(|_| AgentError::Status {
            status: 404,
            body: result.id.clone(),
        })?;
        self.scheduler
            .apply_result(id, result.result, result.is_failure())
            .map(|_| ())
            .map_err(|e| AgentError::Status { status: 404, body: e.to_string() })
    }
}

async fn all_terminal(scheduler: Arc<Scheduler>, ids: Vec<ExpressionId>) {
    loop {
        let done = ids
            .iter()
            .all(|id| scheduler.get(*id).map(|e| e.status.is_terminal()).unwrap_or(false));
        if done {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

#[tokio::test]
async fn pool_reduces_expressions_to_completion() {
    let scheduler = Arc::new(Scheduler::new(OperationTimes::uniform(1)));
    let texts = ["(11+2)*7", "7+2+9", "(1+2)*(3+4)/(5-6)", "5/(2-2)", "-9"];
    let ids: Vec<_> = texts.iter().map(|t| scheduler.submit(t).unwrap()).collect();

    let source = Arc::new(SchedulerSource { scheduler: Arc::clone(&scheduler) });
    let pool = WorkerPool::new(3, Duration::from_millis(2), source);
    assert_eq!(pool.size(), 3);

    tokio::time::timeout(
        Duration::from_secs(10),
        pool.run_until(all_terminal(Arc::clone(&scheduler), ids.clone())),
    )
    .await
    .expect("pool did not finish in time");

    let outcomes: Vec<_> = ids
        .iter()
        .map(|id| {
            let e = scheduler.get(*id).unwrap();
            (e.status, e.result)
        })
        .collect();
    assert_eq!(
        outcomes,
        vec![
            (ExpressionStatus::Completed, Some(91.0)),
            (ExpressionStatus::Completed, Some(18.0)),
            (ExpressionStatus::Completed, Some(-21.0)),
            (ExpressionStatus::Error, None),
            (ExpressionStatus::Completed, Some(-9.0)),
        ]
    );
    assert_eq!(scheduler.stats().outstanding_tasks, 0);
}

#[tokio::test]
async fn zero_workers_is_clamped_to_one() {
    let scheduler = Arc::new(Scheduler::new(OperationTimes::uniform(1)));
    let source = Arc::new(SchedulerSource { scheduler });
    assert_eq!(WorkerPool::new(0, Duration::from_millis(1), source).size(), 1);
}
