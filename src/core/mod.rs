//! Core types shared across the engine

pub mod error;
pub mod types;

pub use error::{EngineError, Result};
pub use types::{Side, Subsystem};
