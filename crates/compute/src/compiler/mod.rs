//! Arithmetic expression compiler.
//!
//! Turns text such as `(11+2)*7` into an arena-backed binary [`Ast`]. The
//! compiler knows nothing about scheduling; the tree it returns is the unit
//! the [`Scheduler`](crate::scheduler::Scheduler) reduces.

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::{Ast, Node, NodeId, ReadyNode};
pub use error::ParseError;
pub use parser::{compile, MAX_NESTING};
