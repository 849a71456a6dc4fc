//! Hull catalog definitions

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::Subsystem;

/// Unique identifier for hull definitions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HullId(pub String);

impl HullId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for HullId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for HullId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Broad hull chassis family, display/classification only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameClass {
    Shuttle,
    Freighter,
    Corvette,
    Cruiser,
    Battleship,
}

/// Intrinsic hull traits that interact with module secondary tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HullTrait {
    Alien,
    Experimental,
}

/// Per-subsystem additive band bias
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandBias {
    pub weapon: i32,
    pub defense: i32,
    pub engine: i32,
}

impl BandBias {
    pub fn get(&self, subsystem: Subsystem) -> i32 {
        match subsystem {
            Subsystem::Weapon => self.weapon,
            Subsystem::Defense => self.defense,
            Subsystem::Engine => self.engine,
        }
    }
}

/// Slot budget a hull offers, per category plus a shared untyped pool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotBudget {
    pub weapon: u32,
    pub defense: u32,
    pub utility: u32,
    pub untyped: u32,
}

/// Immutable hull catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HullDefinition {
    pub id: HullId,
    pub name: String,
    /// Power tier, 1 (civilian shuttle) through 5 (capital)
    pub tier: u8,
    pub frame: FrameClass,
    pub band_bias: BandBias,
    /// Additive adjustment to the tier hull-point baseline
    pub hull_bias: i32,
    pub cargo_base: u32,
    pub data_cargo_base: u32,
    pub fuel_base: u32,
    pub slots: SlotBudget,
    pub traits: Vec<HullTrait>,
}

impl HullDefinition {
    pub fn has_trait(&self, hull_trait: HullTrait) -> bool {
        self.traits.contains(&hull_trait)
    }
}
