pub mod classify;
pub mod command;
pub mod compare;
pub mod dataset;
pub mod dispatch;
pub mod error;
pub mod resolver;
pub mod stats;

pub use command::Command;
pub use error::{ChatError, Result};
