//! Battle results and the structured round log
//!
//! The result record is the engine's only long-lived output. It carries
//! enough detail (snapshots, per-round events, every logged draw, the seed)
//! for a caller to persist, replay, or render the battle without re-deriving
//! any numbers.

use serde::{Deserialize, Serialize};

use crate::combat::actions::CombatAction;
use crate::combat::rng::RngDraw;
use crate::combat::state::{CombatState, HullBand, RepairCharge, SubsystemCapacities};
use crate::core::types::{Side, Subsystem};
use crate::ship::loadout::{DegradationCounters, ModuleInstance};

/// Terminal state of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatOutcome {
    Destroyed,
    Escape,
    Surrender,
    MaxRounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Player,
    Enemy,
    None,
}

impl From<Side> for Winner {
    fn from(side: Side) -> Self {
        match side {
            Side::Player => Winner::Player,
            Side::Enemy => Winner::Enemy,
        }
    }
}

/// Final per-side view frozen at battle end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipSnapshot {
    pub side: Side,
    pub hull_max: i32,
    pub hull_current: i32,
    pub hull_percent: f32,
    pub hull_band: HullBand,
    pub degradation: DegradationCounters,
    pub capacities: SubsystemCapacities,
    pub repair_charges: Vec<RepairCharge>,
    pub scanned: bool,
}

impl From<&CombatState> for ShipSnapshot {
    fn from(state: &CombatState) -> Self {
        Self {
            side: state.side,
            hull_max: state.hull_max,
            hull_current: state.hull_current,
            hull_percent: state.hull_percent(),
            hull_band: state.hull_band(),
            degradation: state.degradation,
            capacities: state.capacities,
            repair_charges: state.repair_charges.clone(),
            scanned: state.scanned,
        }
    }
}

/// One notable thing that happened during a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    Surrendered { side: Side },
    Repaired { side: Side, module_index: usize, amount: i32 },
    ScanSucceeded { side: Side },
    ScanFailed { side: Side },
    EscapeAttempt { side: Side, delta: i32, succeeded: bool },
    MutualEscape,
    DamageDealt { side: Side, amount: i32 },
    SubsystemDegraded { side: Side, subsystem: Subsystem },
    Destroyed { side: Side },
    SalvageRecovered { modules: Vec<ModuleInstance> },
}

/// Everything that happened in one round, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub player_action: CombatAction,
    pub enemy_action: CombatAction,
    pub events: Vec<CombatEvent>,
    pub player_hull: i32,
    pub enemy_hull: i32,
    pub draws: Vec<RngDraw>,
}

/// Immutable record of one resolved battle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatResult {
    pub outcome: CombatOutcome,
    pub winner: Winner,
    pub rounds: u32,
    pub seed: u64,
    pub player: ShipSnapshot,
    pub enemy: ShipSnapshot,
    pub player_threat: u8,
    pub enemy_threat: u8,
    pub salvage: Vec<ModuleInstance>,
    pub rounds_log: Vec<RoundRecord>,
}
