//! Ship assembly: hull + fitted modules + degradation -> combat stat sheet
//!
//! Assembly is recomputed on demand (every combat round) and never persisted.
//! All adjustments are ADDITIVE; the only multiplicative step anywhere is the
//! compact tag halving slot consumption.

use serde::{Deserialize, Serialize};

use crate::catalog::{
    Capability, Catalog, HullDefinition, HullId, HullTrait, ModuleDefinition, SlotCategory,
};
use crate::core::error::{EngineError, Result};
use crate::core::types::Subsystem;
use crate::ship::loadout::{DegradationCounters, ModuleInstance, SecondaryTag, ShipLoadout};

/// Assembled hull points never drop below this
pub const HULL_POINT_FLOOR: i32 = 4;
/// Every subsystem keeps at least one point of degradation capacity
pub const MIN_SUBSYSTEM_CAPACITY: u32 = 1;
pub const FUEL_PER_TANK: u32 = 5;
pub const CARGO_PER_EXPANSION: u32 = 10;
pub const DATA_CARGO_PER_ARRAY: u32 = 5;

/// Band baseline granted by hull tier alone
pub fn tier_band_baseline(tier: u8) -> i32 {
    tier as i32
}

/// Hull-point baseline granted by hull tier alone
pub fn tier_hull_baseline(tier: u8) -> i32 {
    8 + 4 * tier as i32
}

/// Derived per-subsystem stat line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsystemSheet {
    /// Tier baseline + hull bias, before any module contribution
    pub base: i32,
    /// Base + slot-fill bonus + module bonuses, before degradation
    pub pre_degradation: i32,
    /// Current wear on this subsystem
    pub degradation: u32,
    /// Wear the subsystem can absorb before going red
    pub capacity: u32,
    /// Degradation has reached capacity; the subsystem is offline
    pub red: bool,
    /// Band actually usable this round: 0 if red, else pre - degradation
    pub effective: i32,
}

/// How the hull's slot budget was consumed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotUsage {
    pub weapon: u32,
    pub defense: u32,
    pub utility: u32,
    pub untyped_used: u32,
}

/// Combat-usable view of one ship, derived and discarded per round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssembledShip {
    pub hull_max: i32,
    pub fuel_capacity: u32,
    pub slots: SlotUsage,
    pub weapon: SubsystemSheet,
    pub defense: SubsystemSheet,
    pub engine: SubsystemSheet,
    pub cargo_capacity: u32,
    pub data_cargo_capacity: u32,
    pub has_interdictor: bool,
    pub has_cloak: bool,
    pub smuggler_hold: bool,
    pub mining_unlocked: bool,
    pub probe_unlocked: bool,
    /// Loadout indexes of repair-rig modules, in fitting order
    pub repair_modules: Vec<usize>,
}

impl AssembledShip {
    pub fn subsystem(&self, subsystem: Subsystem) -> &SubsystemSheet {
        match subsystem {
            Subsystem::Weapon => &self.weapon,
            Subsystem::Defense => &self.defense,
            Subsystem::Engine => &self.engine,
        }
    }
}

/// Alien affinity of a ship: alien hull trait plus alien-tagged modules.
/// One factor of the crew synergy product.
pub fn alien_tag_count(hull: &HullDefinition, modules: &[ModuleInstance]) -> u32 {
    let hull_tags = if hull.has_trait(HullTrait::Alien) { 1 } else { 0 };
    let module_tags = modules
        .iter()
        .filter(|m| m.has_tag(SecondaryTag::Alien))
        .count() as u32;
    hull_tags + module_tags
}

fn slot_index(category: SlotCategory) -> usize {
    match category {
        SlotCategory::Weapon => 0,
        SlotCategory::Defense => 1,
        SlotCategory::Utility => 2,
    }
}

fn subsystem_index(subsystem: Subsystem) -> usize {
    match subsystem {
        Subsystem::Weapon => 0,
        Subsystem::Defense => 1,
        Subsystem::Engine => 2,
    }
}

/// Does a module count toward a subsystem's degradation capacity?
fn counts_for_capacity(def: &ModuleDefinition, subsystem: Subsystem) -> bool {
    match subsystem {
        Subsystem::Weapon => def.slot == SlotCategory::Weapon,
        Subsystem::Defense => def.slot == SlotCategory::Defense,
        Subsystem::Engine => {
            def.slot == SlotCategory::Utility
                && (def.bonus_for(Subsystem::Engine) != 0
                    || def.capability == Capability::EngineBoost)
        }
    }
}

/// Assemble one ship from catalog data, fitted modules, and current wear.
///
/// Fails when the hull or any module id is unknown, when a module's
/// capability is incompatible with its declared slot, or when required slots
/// exceed the hull's base + untyped budget.
pub fn assemble(
    catalog: &Catalog,
    hull_id: &HullId,
    modules: &[ModuleInstance],
    degradation: &DegradationCounters,
) -> Result<AssembledShip> {
    let hull = catalog.hull(hull_id)?;

    // Step 1: resolve definitions and validate capability/slot fit
    let mut fitted: Vec<(&ModuleInstance, &ModuleDefinition)> = Vec::with_capacity(modules.len());
    for instance in modules {
        let def = catalog.module(&instance.module)?;
        if def.capability.slot() != def.slot {
            return Err(EngineError::SlotMismatch {
                module: def.id.to_string(),
                capability: def.capability,
                slot: def.slot,
            });
        }
        fitted.push((instance, def));
    }

    // Step 2: slot consumption in half units (compact modules take half a slot)
    let mut half_units = [0u32; 3];
    for (instance, def) in &fitted {
        let units = if instance.has_tag(SecondaryTag::Compact) { 1 } else { 2 };
        half_units[slot_index(def.slot)] += units;
    }
    let required: Vec<u32> = half_units.iter().map(|h| (h + 1) / 2).collect();

    // Step 3: base slots first, overflow into the untyped pool in fixed order
    let base = [hull.slots.weapon, hull.slots.defense, hull.slots.utility];
    let order = [SlotCategory::Weapon, SlotCategory::Defense, SlotCategory::Utility];
    let mut untyped_left = hull.slots.untyped;
    for (i, &category) in order.iter().enumerate() {
        let overflow = required[i].saturating_sub(base[i]);
        if overflow > untyped_left {
            return Err(EngineError::SlotOverflow {
                hull: hull.id.to_string(),
                category,
                required: overflow,
                available: untyped_left,
            });
        }
        untyped_left -= overflow;
    }
    let untyped_used = hull.slots.untyped - untyped_left;

    let alien_hull = hull.has_trait(HullTrait::Alien);
    let experimental_hull = hull.has_trait(HullTrait::Experimental);

    // Step 4: pre-degradation bands
    let mut base_band = [0i32; 3];
    let mut pre_band = [0i32; 3];
    for subsystem in Subsystem::ALL {
        let i = subsystem_index(subsystem);
        base_band[i] = tier_band_baseline(hull.tier) + hull.band_bias.get(subsystem);
        pre_band[i] = base_band[i];
    }
    // Slot-fill bonus: filled weapon/defense slots strengthen their band
    pre_band[0] += required[0] as i32;
    pre_band[1] += required[1] as i32;

    for (instance, def) in &fitted {
        for bonus in def.bonuses.iter().take(2) {
            pre_band[subsystem_index(bonus.subsystem)] += bonus.amount;
        }
        if let Some(main) = def.main_bonus() {
            let i = subsystem_index(main.subsystem);
            if instance.has_tag(SecondaryTag::Efficient) {
                pre_band[i] += 1;
            }
            if instance.has_tag(SecondaryTag::Alien) && alien_hull {
                pre_band[i] += 1;
            }
        }
    }

    // Step 5: degradation capacity per subsystem
    let mut capacity = [0u32; 3];
    for subsystem in Subsystem::ALL {
        let i = subsystem_index(subsystem);
        let mut cap: i32 = 0;
        for (instance, def) in &fitted {
            if !counts_for_capacity(def, subsystem) {
                continue;
            }
            cap += 1;
            if instance.has_tag(SecondaryTag::Enhanced) {
                cap += 1;
            }
            if instance.has_tag(SecondaryTag::Unstable) {
                cap -= 1;
            }
            if instance.has_tag(SecondaryTag::Prototype) && !experimental_hull {
                cap -= 1;
            }
        }
        capacity[i] = cap.max(MIN_SUBSYSTEM_CAPACITY as i32) as u32;
    }

    // Step 6: hull points
    let mut hull_max = tier_hull_baseline(hull.tier) + hull.hull_bias;
    for (instance, def) in &fitted {
        if def.capability == Capability::ArmoredPlating {
            hull_max += 1;
        }
        if instance.has_tag(SecondaryTag::Alien) && alien_hull {
            hull_max += 1;
        }
        if instance.has_tag(SecondaryTag::Prototype) && experimental_hull {
            hull_max += 1;
        }
        if instance.has_tag(SecondaryTag::Unstable) {
            hull_max -= 1;
        }
    }
    hull_max = hull_max.max(HULL_POINT_FLOOR);

    // Step 7: red flags and effective bands
    let mut sheets = [SubsystemSheet {
        base: 0,
        pre_degradation: 0,
        degradation: 0,
        capacity: 0,
        red: false,
        effective: 0,
    }; 3];
    for subsystem in Subsystem::ALL {
        let i = subsystem_index(subsystem);
        let worn = degradation.get(subsystem);
        let red = worn >= capacity[i];
        sheets[i] = SubsystemSheet {
            base: base_band[i],
            pre_degradation: pre_band[i],
            degradation: worn,
            capacity: capacity[i],
            red,
            effective: if red {
                0
            } else {
                (pre_band[i] - worn as i32).max(0)
            },
        };
    }

    // Step 8: fuel, cargo, and side-effect flags from utility capabilities
    let mut fuel_capacity = hull.fuel_base;
    let mut cargo_capacity = hull.cargo_base;
    let mut data_cargo_capacity = hull.data_cargo_base;
    let mut has_interdictor = false;
    let mut has_cloak = false;
    let mut smuggler_hold = false;
    let mut mining_unlocked = false;
    let mut probe_unlocked = false;
    let mut repair_modules = Vec::new();

    for (index, (_, def)) in fitted.iter().enumerate() {
        match def.capability {
            Capability::ExtraFuel => fuel_capacity += FUEL_PER_TANK,
            Capability::ExtraCargo => cargo_capacity += CARGO_PER_EXPANSION,
            Capability::DataArray => data_cargo_capacity += DATA_CARGO_PER_ARRAY,
            Capability::Interdictor => has_interdictor = true,
            Capability::CloakingField => has_cloak = true,
            Capability::SmugglerHold => smuggler_hold = true,
            Capability::MiningRig => mining_unlocked = true,
            Capability::ProbeArray => probe_unlocked = true,
            Capability::RepairRig => repair_modules.push(index),
            _ => {}
        }
    }

    Ok(AssembledShip {
        hull_max,
        fuel_capacity,
        slots: SlotUsage {
            weapon: required[0],
            defense: required[1],
            utility: required[2],
            untyped_used,
        },
        weapon: sheets[0],
        defense: sheets[1],
        engine: sheets[2],
        cargo_capacity,
        data_cargo_capacity,
        has_interdictor,
        has_cloak,
        smuggler_hold,
        mining_unlocked,
        probe_unlocked,
        repair_modules,
    })
}

/// Assemble directly from a loadout record
pub fn assemble_loadout(catalog: &Catalog, loadout: &ShipLoadout) -> Result<AssembledShip> {
    assemble(catalog, &loadout.hull, &loadout.modules, &loadout.degradation)
}
