//! Ship loadouts and the assembler that turns them into combat stat sheets

pub mod assembler;
pub mod loadout;
pub mod threat;

pub use assembler::{
    alien_tag_count, assemble, assemble_loadout, AssembledShip, SlotUsage, SubsystemSheet,
};
pub use loadout::{DegradationCounters, ModuleInstance, SecondaryTag, ShipLoadout};
pub use threat::{combat_score, threat_rating};
