#![doc = include_str!("../README.md")]

mod encoder;
mod error;
mod service;
mod stats;
mod store;
mod types;
mod worker;

pub use encoder::*;
pub use error::*;
pub use service::*;
pub use stats::*;
pub use store::*;
pub use types::*;
