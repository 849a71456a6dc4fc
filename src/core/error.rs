use thiserror::Error;

use crate::catalog::{Capability, SlotCategory};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Unknown hull: {0}")]
    UnknownHull(String),

    #[error("Unknown module: {0}")]
    UnknownModule(String),

    #[error("Module {module}: capability {capability:?} cannot occupy a {slot:?} slot")]
    SlotMismatch {
        module: String,
        capability: Capability,
        slot: SlotCategory,
    },

    #[error("Hull {hull}: {category:?} modules need {required} more slots, only {available} left in the untyped pool")]
    SlotOverflow {
        hull: String,
        category: SlotCategory,
        required: u32,
        available: u32,
    },

    #[error("Malformed ship state: {0}")]
    MalformedState(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
