//! Turn-based combat resolution
//!
//! The resolver owns the round loop; the submodules hold the pieces it
//! orchestrates: per-side state, actions and their providers, the matchup
//! table, the logged RNG stream, and the result records.

pub mod actions;
pub mod constants;
pub mod result;
pub mod resolver;
pub mod rng;
pub mod rps;
pub mod state;

pub use actions::{ActionContext, ActionProvider, CombatAction, Scripted};
pub use result::{CombatEvent, CombatOutcome, CombatResult, RoundRecord, ShipSnapshot, Winner};
pub use resolver::{resolve_combat, CombatConfig};
pub use rng::{RngDraw, RngStream};
pub use rps::{resolve_rps, DefenseType, WeaponType};
pub use state::{CombatState, HullBand, RepairCharge};
