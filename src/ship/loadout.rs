//! Ship loadout value types
//!
//! A loadout is the owned, mutable description of one ship: hull reference,
//! fitted module instances, accumulated subsystem degradation, and crew.

use serde::{Deserialize, Serialize};

use crate::catalog::{HullId, ModuleId};
use crate::core::types::Subsystem;
use crate::crew::CrewMember;

/// Secondary tags chosen at loadout-build time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecondaryTag {
    Efficient,
    Unstable,
    Alien,
    Compact,
    Enhanced,
    Prototype,
}

/// One fitted module: a catalog reference plus its secondary tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInstance {
    pub module: ModuleId,
    pub tags: Vec<SecondaryTag>,
}

impl ModuleInstance {
    pub fn new(module: impl Into<ModuleId>) -> Self {
        Self {
            module: module.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tags(module: impl Into<ModuleId>, tags: Vec<SecondaryTag>) -> Self {
        Self {
            module: module.into(),
            tags,
        }
    }

    pub fn has_tag(&self, tag: SecondaryTag) -> bool {
        self.tags.contains(&tag)
    }
}

/// Accumulated per-subsystem wear
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegradationCounters {
    pub weapon: u32,
    pub defense: u32,
    pub engine: u32,
}

impl DegradationCounters {
    pub fn get(&self, subsystem: Subsystem) -> u32 {
        match subsystem {
            Subsystem::Weapon => self.weapon,
            Subsystem::Defense => self.defense,
            Subsystem::Engine => self.engine,
        }
    }

    pub fn add(&mut self, subsystem: Subsystem, amount: u32) {
        match subsystem {
            Subsystem::Weapon => self.weapon += amount,
            Subsystem::Defense => self.defense += amount,
            Subsystem::Engine => self.engine += amount,
        }
    }
}

/// Full description of one ship as the combat engine consumes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipLoadout {
    pub hull: HullId,
    pub modules: Vec<ModuleInstance>,
    pub degradation: DegradationCounters,
    pub crew: Vec<CrewMember>,
    /// Carried-over hull integrity from a previous encounter, if any.
    /// Clamped into [0, hull_max] when combat state is built.
    pub current_hull: Option<i32>,
}

impl ShipLoadout {
    pub fn new(hull: impl Into<HullId>) -> Self {
        Self {
            hull: hull.into(),
            modules: Vec::new(),
            degradation: DegradationCounters::default(),
            crew: Vec::new(),
            current_hull: None,
        }
    }

    pub fn with_module(mut self, instance: ModuleInstance) -> Self {
        self.modules.push(instance);
        self
    }

    pub fn with_crew(mut self, member: CrewMember) -> Self {
        self.crew.push(member);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degradation_counters() {
        let mut counters = DegradationCounters::default();
        counters.add(Subsystem::Weapon, 2);
        counters.add(Subsystem::Engine, 1);

        assert_eq!(counters.get(Subsystem::Weapon), 2);
        assert_eq!(counters.get(Subsystem::Defense), 0);
        assert_eq!(counters.get(Subsystem::Engine), 1);
    }

    #[test]
    fn test_module_instance_tags() {
        let instance =
            ModuleInstance::with_tags("pulse-laser", vec![SecondaryTag::Efficient]);
        assert!(instance.has_tag(SecondaryTag::Efficient));
        assert!(!instance.has_tag(SecondaryTag::Alien));
    }
}
