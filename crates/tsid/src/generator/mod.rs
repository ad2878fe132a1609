mod builder;
mod config;
mod error;
mod factory;
mod global;
mod mutex;

pub use builder::*;
pub use config::*;
pub use error::*;
pub use factory::*;
pub use global::{global, next_tsid};
pub(crate) use mutex::*;
