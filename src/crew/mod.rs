//! Crew rosters and the modifier aggregation they feed into combat

pub mod modifiers;

pub use modifiers::{aggregate, CrewModifierBundle};

use serde::{Deserialize, Serialize};

/// Crew role, each granting one fixed additive effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrewRole {
    Pilot,
    Gunner,
    Tactician,
    Engineer,
    Mechanic,
    Navigator,
    Broker,
    Quartermaster,
    Scientist,
}

/// Personality/background tags, each mapping to one fixed additive effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrewTag {
    SteadyAim,
    TriggerHappy,
    Evasive,
    SlowReactions,
    DamageControl,
    Overconfident,
    FuelEfficient,
    Wasteful,
    Organized,
    Cluttered,
    Haggler,
    BargainHunter,
    Awkward,
    Blacklisted,
    Undercover,
    Wanted,
    DataSavvy,
    Connected,
    Alien,
}

/// One crew member as combat consumes them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMember {
    pub name: String,
    pub role: CrewRole,
    pub tags: Vec<CrewTag>,
    pub wage: i32,
}

impl CrewMember {
    pub fn new(name: impl Into<String>, role: CrewRole, wage: i32) -> Self {
        Self {
            name: name.into(),
            role,
            tags: Vec::new(),
            wage,
        }
    }

    pub fn with_tag(mut self, tag: CrewTag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn has_tag(&self, tag: CrewTag) -> bool {
        self.tags.contains(&tag)
    }
}

/// Number of pilot-role members in a roster; feeds the in-combat escape delta
pub fn pilot_count(roster: &[CrewMember]) -> u32 {
    roster.iter().filter(|m| m.role == CrewRole::Pilot).count() as u32
}
