//! Shared primitive types used across the engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three combat subsystems every ship carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subsystem {
    Weapon,
    Defense,
    Engine,
}

impl Subsystem {
    pub const ALL: [Subsystem; 3] = [Subsystem::Weapon, Subsystem::Defense, Subsystem::Engine];
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Subsystem::Weapon => "weapon",
            Subsystem::Defense => "defense",
            Subsystem::Engine => "engine",
        };
        write!(f, "{}", name)
    }
}

/// Which side of a battle a state or event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Enemy => write!(f, "enemy"),
        }
    }
}
