//! Weapon-type vs defense-type matchup bias
//!
//! A +1/0/-1 adjustment to the weapon band only. Categorical lookup; any
//! pairing the table does not name (including a missing weapon or defense)
//! resolves to 0.

use serde::{Deserialize, Serialize};

use crate::catalog::Capability;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponType {
    Energy,
    Kinetic,
    Disruptive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefenseType {
    Armored,
    Shielded,
    Adaptive,
}

/// Weapon type implied by a capability, if any
pub fn weapon_type_of(capability: Capability) -> Option<WeaponType> {
    match capability {
        Capability::EnergyWeapon => Some(WeaponType::Energy),
        Capability::KineticWeapon => Some(WeaponType::Kinetic),
        Capability::DisruptiveWeapon => Some(WeaponType::Disruptive),
        _ => None,
    }
}

/// Defense type implied by a capability, if any
pub fn defense_type_of(capability: Capability) -> Option<DefenseType> {
    match capability {
        Capability::ArmoredPlating => Some(DefenseType::Armored),
        Capability::ShieldArray => Some(DefenseType::Shielded),
        Capability::AdaptiveHull => Some(DefenseType::Adaptive),
        _ => None,
    }
}

/// Weapon-band bias for an attacker's weapon type against a defender's
/// defense type
pub fn resolve_rps(weapon: Option<WeaponType>, defense: Option<DefenseType>) -> i32 {
    use DefenseType::*;
    use WeaponType::*;

    match (weapon, defense) {
        (Some(Energy), Some(Armored)) => 1,
        (Some(Energy), Some(Shielded)) => -1,
        (Some(Kinetic), Some(Shielded)) => 1,
        (Some(Kinetic), Some(Adaptive)) => -1,
        (Some(Disruptive), Some(Adaptive)) => 1,
        (Some(Disruptive), Some(Armored)) => -1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_weapon_beats_one_defense() {
        assert_eq!(resolve_rps(Some(WeaponType::Energy), Some(DefenseType::Armored)), 1);
        assert_eq!(resolve_rps(Some(WeaponType::Kinetic), Some(DefenseType::Shielded)), 1);
        assert_eq!(resolve_rps(Some(WeaponType::Disruptive), Some(DefenseType::Adaptive)), 1);
    }

    #[test]
    fn test_each_weapon_loses_to_one_defense() {
        assert_eq!(resolve_rps(Some(WeaponType::Energy), Some(DefenseType::Shielded)), -1);
        assert_eq!(resolve_rps(Some(WeaponType::Kinetic), Some(DefenseType::Adaptive)), -1);
        assert_eq!(resolve_rps(Some(WeaponType::Disruptive), Some(DefenseType::Armored)), -1);
    }

    #[test]
    fn test_neutral_pairs_are_zero() {
        assert_eq!(resolve_rps(Some(WeaponType::Energy), Some(DefenseType::Adaptive)), 0);
        assert_eq!(resolve_rps(Some(WeaponType::Kinetic), Some(DefenseType::Armored)), 0);
        assert_eq!(resolve_rps(Some(WeaponType::Disruptive), Some(DefenseType::Shielded)), 0);
    }

    #[test]
    fn test_undefined_pairs_default_to_zero() {
        assert_eq!(resolve_rps(None, Some(DefenseType::Armored)), 0);
        assert_eq!(resolve_rps(Some(WeaponType::Energy), None), 0);
        assert_eq!(resolve_rps(None, None), 0);
    }

    #[test]
    fn test_capability_mappings() {
        assert_eq!(
            weapon_type_of(Capability::EnergyWeapon),
            Some(WeaponType::Energy)
        );
        assert_eq!(weapon_type_of(Capability::ShieldArray), None);
        assert_eq!(
            defense_type_of(Capability::AdaptiveHull),
            Some(DefenseType::Adaptive)
        );
        assert_eq!(defense_type_of(Capability::KineticWeapon), None);
    }
}
