//! Incremental reduction engine.
//!
//! Owns every submitted expression tree, emits one task per leaf-ready
//! subtree, and folds worker results back into the trees until each one
//! collapses to a single value. All state sits behind a single lock; see
//! [`Scheduler`] for the locking contract.

pub mod expression;
pub mod ledger;
pub mod runner;
pub mod state;
pub mod task;
pub mod types;

pub use expression::Expression;
pub use ledger::TaskLedger;
pub use runner::Scheduler;
pub use task::{EngineError, Task};
pub use types::{ExpressionId, SchedulerStats, TaskId};
