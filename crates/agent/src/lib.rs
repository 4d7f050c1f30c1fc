//! Worker pool for the distributed calculator.
//!
//! Each worker is an independent polling loop: pull a task, pretend to be
//! slow for `operation_time`, evaluate, push the result. Correctness
//! (exactly-once consumption, no duplicate application) is the
//! orchestrator's job; workers keep no bookkeeping.

pub mod client;
pub mod error;
pub mod pool;
pub mod worker;

pub use client::{OrchestratorClient, ReceivedTask, TaskSource};
pub use error::AgentError;
pub use pool::WorkerPool;
pub use worker::{Step, Worker};
