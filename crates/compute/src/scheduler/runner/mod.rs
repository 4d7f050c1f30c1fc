//! Scheduler runner -- the thread-safe facade over [`SchedulerState`].
//!
//! Split into focused submodules:
//! - `core`: Scheduler struct, constructor, submission, and registry reads
//! - `scheduling`: task discovery over an expression tree
//! - `execution`: worker-facing claim and result application
//!
//! [`SchedulerState`]: crate::scheduler::state::SchedulerState

mod core;
mod execution;
mod scheduling;

pub use self::core::Scheduler;
