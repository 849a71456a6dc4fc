//! Threat rating: a coarse 1-5 combat-power band
//!
//! Derived from effective bands and hull points so a degraded ship reads as
//! less threatening than a fresh one with the same fit.

use crate::ship::assembler::AssembledShip;

/// Raw combat point score. Weapons weigh heaviest, then defense, then engine;
/// hull mass contributes a quarter point per point.
pub fn combat_score(ship: &AssembledShip) -> i32 {
    3 * ship.weapon.effective + 2 * ship.defense.effective + ship.engine.effective
        + ship.hull_max / 4
}

/// Bucket a combat score into the 1-5 threat band
pub fn threat_rating(score: i32) -> u8 {
    match score {
        i32::MIN..=9 => 1,
        10..=19 => 2,
        20..=29 => 3,
        30..=44 => 4,
        _ => 5,
    }
}

/// Threat band for an assembled ship
pub fn rate(ship: &AssembledShip) -> u8 {
    threat_rating(combat_score(ship))
}
