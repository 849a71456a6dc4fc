//! Deterministic combat-and-escape resolution for a space-trading simulation.
//!
//! Given two ship loadouts, a seed, and a per-round action provider for each
//! side, [`combat::resolve_combat`] produces a fully reproducible battle
//! outcome with an audit log of every random draw. The supporting pieces are
//! exposed directly: ship assembly ([`ship`]), crew modifier aggregation
//! ([`crew`]), the pursuit/escape model ([`pursuit`]), and salvage sampling
//! ([`salvage`]). The engine performs no I/O; catalogs, loadouts, and rosters
//! come in as plain data and a [`combat::CombatResult`] comes out.

pub mod catalog;
pub mod combat;
pub mod core;
pub mod crew;
pub mod pursuit;
pub mod salvage;
pub mod ship;

pub use crate::core::error::{EngineError, Result};
