//! Per-side combat state
//!
//! Built once at battle start from a loadout, then owned and mutated in
//! place by the resolver for the whole battle. No other component observes
//! it while a battle runs.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, SlotCategory};
use crate::combat::constants::{HULL_GREEN_ABOVE, HULL_YELLOW_ABOVE, REPAIR_CHARGES_PER_RIG};
use crate::combat::rps::{defense_type_of, weapon_type_of, DefenseType, WeaponType};
use crate::core::error::Result;
use crate::core::types::{Side, Subsystem};
use crate::crew::{aggregate, pilot_count, CrewModifierBundle};
use crate::ship::assembler::{alien_tag_count, assemble_loadout};
use crate::ship::loadout::{DegradationCounters, ShipLoadout};
use crate::ship::threat;

/// Hull integrity color band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HullBand {
    Green,
    Yellow,
    Red,
}

impl HullBand {
    pub fn from_percent(percent: f32) -> Self {
        if percent > HULL_GREEN_ABOVE {
            HullBand::Green
        } else if percent > HULL_YELLOW_ABOVE {
            HullBand::Yellow
        } else {
            HullBand::Red
        }
    }

    /// Ordering index; degradation triggers on downward crossings
    pub fn index(self) -> u8 {
        match self {
            HullBand::Green => 2,
            HullBand::Yellow => 1,
            HullBand::Red => 0,
        }
    }
}

/// Remaining uses on one repair-capable module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairCharge {
    pub module_index: usize,
    pub remaining: u8,
}

/// Cached per-subsystem degradation capacities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsystemCapacities {
    pub weapon: u32,
    pub defense: u32,
    pub engine: u32,
}

impl SubsystemCapacities {
    pub fn get(&self, subsystem: Subsystem) -> u32 {
        match subsystem {
            Subsystem::Weapon => self.weapon,
            Subsystem::Defense => self.defense,
            Subsystem::Engine => self.engine,
        }
    }
}

/// Effective bands as recomputed in the current round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundBands {
    pub weapon: i32,
    pub defense: i32,
    pub engine: i32,
}

impl RoundBands {
    pub fn get(&self, subsystem: Subsystem) -> i32 {
        match subsystem {
            Subsystem::Weapon => self.weapon,
            Subsystem::Defense => self.defense,
            Subsystem::Engine => self.engine,
        }
    }

    pub fn set(&mut self, subsystem: Subsystem, value: i32) {
        match subsystem {
            Subsystem::Weapon => self.weapon = value,
            Subsystem::Defense => self.defense = value,
            Subsystem::Engine => self.engine = value,
        }
    }
}

/// One side's mutable battle state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatState {
    pub side: Side,
    pub hull_max: i32,
    pub hull_current: i32,
    pub degradation: DegradationCounters,
    pub capacities: SubsystemCapacities,
    pub bands: RoundBands,
    pub repair_charges: Vec<RepairCharge>,
    pub scanned: bool,
    pub crew: CrewModifierBundle,
    pub pilot_count: u32,
    pub weapon_type: Option<WeaponType>,
    pub defense_type: Option<DefenseType>,
    pub has_cloak: bool,
    pub has_interdictor: bool,
    pub probe_equipped: bool,
    pub threat: u8,
}

impl CombatState {
    /// Assemble a loadout into battle-ready state.
    ///
    /// Validation failures (unknown ids, slot problems) surface here, before
    /// any battle state is mutated.
    pub fn from_loadout(catalog: &Catalog, loadout: &ShipLoadout, side: Side) -> Result<Self> {
        let ship = assemble_loadout(catalog, loadout)?;
        let hull = catalog.hull(&loadout.hull)?;
        let crew = aggregate(&loadout.crew, alien_tag_count(hull, &loadout.modules));

        // Primary weapon/defense types: first fitted module of each slot
        let mut weapon_type = None;
        let mut defense_type = None;
        for instance in &loadout.modules {
            let def = catalog.module(&instance.module)?;
            match def.slot {
                SlotCategory::Weapon if weapon_type.is_none() => {
                    weapon_type = weapon_type_of(def.capability);
                }
                SlotCategory::Defense if defense_type.is_none() => {
                    defense_type = defense_type_of(def.capability);
                }
                _ => {}
            }
        }

        let mut repair_charges: Vec<RepairCharge> = ship
            .repair_modules
            .iter()
            .map(|&module_index| RepairCharge {
                module_index,
                remaining: REPAIR_CHARGES_PER_RIG,
            })
            .collect();
        // Engineer-granted extra uses land on the first rig
        if let Some(first) = repair_charges.first_mut() {
            first.remaining = (first.remaining as i32 + crew.repair_uses).max(0) as u8;
        }

        let hull_current = loadout
            .current_hull
            .map(|h| h.clamp(0, ship.hull_max))
            .unwrap_or(ship.hull_max);

        Ok(Self {
            side,
            hull_max: ship.hull_max,
            hull_current,
            degradation: loadout.degradation,
            capacities: SubsystemCapacities {
                weapon: ship.weapon.capacity,
                defense: ship.defense.capacity,
                engine: ship.engine.capacity,
            },
            bands: RoundBands {
                weapon: ship.weapon.effective,
                defense: ship.defense.effective,
                engine: ship.engine.effective,
            },
            repair_charges,
            scanned: false,
            pilot_count: pilot_count(&loadout.crew),
            weapon_type,
            defense_type,
            has_cloak: ship.has_cloak,
            has_interdictor: ship.has_interdictor,
            probe_equipped: ship.probe_unlocked,
            threat: threat::rate(&ship),
            crew,
        })
    }

    pub fn hull_percent(&self) -> f32 {
        if self.hull_max <= 0 {
            return 0.0;
        }
        100.0 * self.hull_current as f32 / self.hull_max as f32
    }

    pub fn hull_band(&self) -> HullBand {
        HullBand::from_percent(self.hull_percent())
    }

    pub fn has_repair_charges(&self) -> bool {
        self.repair_charges.iter().any(|c| c.remaining > 0)
    }

    pub fn is_destroyed(&self) -> bool {
        self.hull_current <= 0
    }
}
