//! Module catalog definitions

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::Subsystem;

/// Unique identifier for module definitions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleId(pub String);

impl ModuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ModuleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Slot category a module mounts into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotCategory {
    Weapon,
    Defense,
    Utility,
}

/// Primary capability tag. Every capability belongs to exactly one slot
/// category; a definition whose capability disagrees with its declared slot
/// is rejected at assembly time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    // Weapon slot
    EnergyWeapon,
    KineticWeapon,
    DisruptiveWeapon,
    // Defense slot
    ArmoredPlating,
    ShieldArray,
    AdaptiveHull,
    // Utility slot
    ExtraCargo,
    ExtraFuel,
    DataArray,
    Interdictor,
    SmugglerHold,
    MiningRig,
    ProbeArray,
    EngineBoost,
    RepairRig,
    CloakingField,
}

impl Capability {
    /// The slot category this capability is legal in
    pub fn slot(self) -> SlotCategory {
        match self {
            Capability::EnergyWeapon | Capability::KineticWeapon | Capability::DisruptiveWeapon => {
                SlotCategory::Weapon
            }
            Capability::ArmoredPlating | Capability::ShieldArray | Capability::AdaptiveHull => {
                SlotCategory::Defense
            }
            Capability::ExtraCargo
            | Capability::ExtraFuel
            | Capability::DataArray
            | Capability::Interdictor
            | Capability::SmugglerHold
            | Capability::MiningRig
            | Capability::ProbeArray
            | Capability::EngineBoost
            | Capability::RepairRig
            | Capability::CloakingField => SlotCategory::Utility,
        }
    }
}

/// Drop-table rarity of a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Unique,
}

impl Rarity {
    /// Salvage sampling weight factor
    pub fn salvage_weight(self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Uncommon => 2.0,
            Rarity::Rare => 4.0,
            Rarity::Unique => 8.0,
        }
    }
}

/// Which secondary tags a definition accepts at loadout-build time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecondaryTagPolicy {
    /// No secondary tags ever
    Forbidden,
    /// Common tags only (no alien or prototype)
    Standard,
    /// Any tag
    Unrestricted,
}

/// How a module behaves when its ship is destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalvagePolicy {
    pub salvageable: bool,
    pub mutation_allowed: bool,
}

/// One declared numeric subsystem bonus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsystemBonus {
    pub subsystem: Subsystem,
    pub amount: i32,
}

/// Immutable module catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleDefinition {
    pub id: ModuleId,
    pub name: String,
    pub slot: SlotCategory,
    pub capability: Capability,
    /// Declared subsystem bonuses, at most two. The first entry is the
    /// "main" bonus that secondary tags amplify.
    pub bonuses: Vec<SubsystemBonus>,
    pub rarity: Rarity,
    pub tag_policy: SecondaryTagPolicy,
    pub salvage: SalvagePolicy,
}

impl ModuleDefinition {
    /// The first declared bonus, target of efficient/alien tag boosts
    pub fn main_bonus(&self) -> Option<SubsystemBonus> {
        self.bonuses.first().copied()
    }

    /// Total declared bonus for one subsystem
    pub fn bonus_for(&self, subsystem: Subsystem) -> i32 {
        self.bonuses
            .iter()
            .filter(|b| b.subsystem == subsystem)
            .map(|b| b.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_slot_mapping() {
        assert_eq!(Capability::EnergyWeapon.slot(), SlotCategory::Weapon);
        assert_eq!(Capability::ShieldArray.slot(), SlotCategory::Defense);
        assert_eq!(Capability::ProbeArray.slot(), SlotCategory::Utility);
        assert_eq!(Capability::CloakingField.slot(), SlotCategory::Utility);
    }

    #[test]
    fn test_rarity_weights_are_increasing() {
        assert!(Rarity::Common.salvage_weight() < Rarity::Uncommon.salvage_weight());
        assert!(Rarity::Uncommon.salvage_weight() < Rarity::Rare.salvage_weight());
        assert!(Rarity::Rare.salvage_weight() < Rarity::Unique.salvage_weight());
    }

    #[test]
    fn test_main_bonus_is_first_declared() {
        let def = ModuleDefinition {
            id: "twin-mount".into(),
            name: "Twin Mount".to_string(),
            slot: SlotCategory::Weapon,
            capability: Capability::KineticWeapon,
            bonuses: vec![
                SubsystemBonus {
                    subsystem: Subsystem::Weapon,
                    amount: 2,
                },
                SubsystemBonus {
                    subsystem: Subsystem::Engine,
                    amount: -1,
                },
            ],
            rarity: Rarity::Common,
            tag_policy: SecondaryTagPolicy::Standard,
            salvage: SalvagePolicy {
                salvageable: true,
                mutation_allowed: false,
            },
        };
        assert_eq!(def.main_bonus().unwrap().subsystem, Subsystem::Weapon);
        assert_eq!(def.bonus_for(Subsystem::Weapon), 2);
        assert_eq!(def.bonus_for(Subsystem::Engine), -1);
        assert_eq!(def.bonus_for(Subsystem::Defense), 0);
    }
}
