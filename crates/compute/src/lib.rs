//! Expression compiler and the incremental reduction engine that farms
//! ready binary operations out to workers.

pub mod compiler;
pub mod scheduler;

pub use compiler::{compile, Ast, Node, NodeId, ParseError};
pub use scheduler::{EngineError, ExpressionId, Scheduler, SchedulerStats, TaskId};
