pub mod config;
pub mod error;
pub mod operator;
pub mod protocol;

pub use config::{Config, OperationTimes};
pub use error::*;
pub use operator::Operator;
pub use protocol::*;
