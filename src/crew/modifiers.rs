//! Crew modifier aggregation
//!
//! Folds a roster into one flat bundle of additive deltas. Roles grant one
//! effect each, tags grant one effect each, and alien synergy pushes every
//! nonzero field further from zero by a flat point count. All effects are
//! ADDITIVE; trade multipliers are carried as signed deltas from 1.0 so the
//! synergy rule applies uniformly.

use serde::{Deserialize, Serialize};

use crate::crew::{CrewMember, CrewRole, CrewTag};

/// Persistent band bonuses are clamped to this magnitude after synergy
pub const BAND_BONUS_CLAMP: i32 = 3;

/// Flat additive deltas derived from one roster
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CrewModifierBundle {
    // Persistent band bonuses, clamped to [-3, +3]
    pub attack_band: i32,
    pub defense_band: i32,
    pub engine_band: i32,

    // Repair
    pub repair_uses: i32,
    pub repair_amount: i32,

    // Action bonuses, applied only on the matching chosen action
    pub focus_fire_bonus: i32,
    pub reinforce_shields_bonus: i32,
    pub evasive_bonus: i32,
    pub repair_focus_bonus: i32,

    // Logistics
    pub fuel_delta: i32,
    pub cargo_bonus: i32,
    pub data_cargo_bonus: i32,

    // Trade, as deltas from a 1.0 multiplier
    pub buy_delta: f64,
    pub sell_delta: f64,

    // Misc
    pub inspection_delta: i32,
    pub mission_slots: i32,
    pub wage_total: i32,
}

fn apply_role(bundle: &mut CrewModifierBundle, role: CrewRole) {
    match role {
        CrewRole::Pilot => bundle.engine_band += 1,
        CrewRole::Gunner => bundle.attack_band += 1,
        CrewRole::Tactician => bundle.defense_band += 1,
        CrewRole::Engineer => bundle.repair_uses += 1,
        CrewRole::Mechanic => bundle.repair_amount += 1,
        CrewRole::Navigator => bundle.fuel_delta -= 2,
        CrewRole::Broker => {
            bundle.buy_delta -= 0.10;
            bundle.sell_delta += 0.10;
        }
        CrewRole::Quartermaster => bundle.cargo_bonus += 3,
        CrewRole::Scientist => bundle.data_cargo_bonus += 2,
    }
}

fn apply_tag(bundle: &mut CrewModifierBundle, tag: CrewTag) {
    match tag {
        CrewTag::SteadyAim => bundle.focus_fire_bonus += 1,
        CrewTag::TriggerHappy => bundle.focus_fire_bonus -= 1,
        CrewTag::Evasive => bundle.evasive_bonus += 1,
        CrewTag::SlowReactions => bundle.evasive_bonus -= 1,
        CrewTag::DamageControl => bundle.repair_focus_bonus += 1,
        CrewTag::Overconfident => bundle.reinforce_shields_bonus -= 1,
        CrewTag::FuelEfficient => bundle.fuel_delta -= 1,
        CrewTag::Wasteful => bundle.fuel_delta += 1,
        CrewTag::Organized => bundle.cargo_bonus += 1,
        CrewTag::Cluttered => bundle.cargo_bonus -= 1,
        CrewTag::Haggler => bundle.buy_delta -= 0.05,
        CrewTag::BargainHunter => bundle.buy_delta -= 0.05,
        CrewTag::Awkward => bundle.buy_delta += 0.05,
        CrewTag::Blacklisted => bundle.sell_delta -= 0.05,
        CrewTag::Undercover => bundle.inspection_delta -= 1,
        CrewTag::Wanted => bundle.inspection_delta += 1,
        CrewTag::DataSavvy => bundle.data_cargo_bonus += 2,
        CrewTag::Connected => bundle.mission_slots += 1,
        // No direct effect; alien crew drive the synergy multiplier
        CrewTag::Alien => {}
    }
}

fn push_from_zero_i32(value: i32, points: i32) -> i32 {
    match value.signum() {
        1 => value + points,
        -1 => value - points,
        _ => 0,
    }
}

fn push_from_zero_f64(value: f64, points: f64) -> f64 {
    if value > 0.0 {
        value + points
    } else if value < 0.0 {
        value - points
    } else {
        0.0
    }
}

fn apply_synergy(bundle: &mut CrewModifierBundle, points: i32) {
    let pts = points;
    let pts_f = points as f64;

    bundle.attack_band = push_from_zero_i32(bundle.attack_band, pts);
    bundle.defense_band = push_from_zero_i32(bundle.defense_band, pts);
    bundle.engine_band = push_from_zero_i32(bundle.engine_band, pts);
    bundle.repair_uses = push_from_zero_i32(bundle.repair_uses, pts);
    bundle.repair_amount = push_from_zero_i32(bundle.repair_amount, pts);
    bundle.focus_fire_bonus = push_from_zero_i32(bundle.focus_fire_bonus, pts);
    bundle.reinforce_shields_bonus = push_from_zero_i32(bundle.reinforce_shields_bonus, pts);
    bundle.evasive_bonus = push_from_zero_i32(bundle.evasive_bonus, pts);
    bundle.repair_focus_bonus = push_from_zero_i32(bundle.repair_focus_bonus, pts);
    bundle.fuel_delta = push_from_zero_i32(bundle.fuel_delta, pts);
    bundle.cargo_bonus = push_from_zero_i32(bundle.cargo_bonus, pts);
    bundle.data_cargo_bonus = push_from_zero_i32(bundle.data_cargo_bonus, pts);
    bundle.buy_delta = push_from_zero_f64(bundle.buy_delta, pts_f);
    bundle.sell_delta = push_from_zero_f64(bundle.sell_delta, pts_f);
    bundle.inspection_delta = push_from_zero_i32(bundle.inspection_delta, pts);
    bundle.mission_slots = push_from_zero_i32(bundle.mission_slots, pts);
    bundle.wage_total = push_from_zero_i32(bundle.wage_total, pts);
}

/// Fold a roster into one modifier bundle.
///
/// `alien_ship_tags` is the count of alien-tagged hull traits and module
/// tags on the ship this crew serves (see `ship::alien_tag_count`). Synergy
/// points = alien_ship_tags x alien-tagged crew count; when positive, every
/// nonzero field is pushed further from zero by exactly that many points.
///
/// An empty roster yields an all-zero bundle.
pub fn aggregate(roster: &[CrewMember], alien_ship_tags: u32) -> CrewModifierBundle {
    let mut bundle = CrewModifierBundle::default();

    for member in roster {
        apply_role(&mut bundle, member.role);
        for &tag in &member.tags {
            apply_tag(&mut bundle, tag);
        }
        bundle.wage_total += member.wage;
    }

    let alien_crew = roster
        .iter()
        .filter(|m| m.has_tag(CrewTag::Alien))
        .count() as u32;
    let synergy = (alien_ship_tags * alien_crew) as i32;
    if synergy > 0 {
        apply_synergy(&mut bundle, synergy);
    }

    // Clamp AFTER synergy
    bundle.attack_band = bundle.attack_band.clamp(-BAND_BONUS_CLAMP, BAND_BONUS_CLAMP);
    bundle.defense_band = bundle.defense_band.clamp(-BAND_BONUS_CLAMP, BAND_BONUS_CLAMP);
    bundle.engine_band = bundle.engine_band.clamp(-BAND_BONUS_CLAMP, BAND_BONUS_CLAMP);

    bundle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_roster_is_all_zero() {
        let bundle = aggregate(&[], 3);
        assert_eq!(bundle, CrewModifierBundle::default());
    }

    #[test]
    fn test_role_effects() {
        let roster = vec![
            CrewMember::new("Ash", CrewRole::Pilot, 10),
            CrewMember::new("Vega", CrewRole::Gunner, 12),
            CrewMember::new("Tam", CrewRole::Tactician, 11),
            CrewMember::new("Orr", CrewRole::Mechanic, 8),
            CrewMember::new("Lin", CrewRole::Navigator, 9),
        ];
        let bundle = aggregate(&roster, 0);

        assert_eq!(bundle.engine_band, 1);
        assert_eq!(bundle.attack_band, 1);
        assert_eq!(bundle.defense_band, 1);
        assert_eq!(bundle.repair_amount, 1);
        assert_eq!(bundle.fuel_delta, -2);
        assert_eq!(bundle.wage_total, 50);
    }

    #[test]
    fn test_broker_trade_deltas() {
        let roster = vec![CrewMember::new("Pell", CrewRole::Broker, 15)];
        let bundle = aggregate(&roster, 0);
        assert!((bundle.buy_delta - -0.10).abs() < 1e-9);
        assert!((bundle.sell_delta - 0.10).abs() < 1e-9);
    }

    #[test]
    fn test_tag_effects_stack_additively() {
        let roster = vec![
            CrewMember::new("Vega", CrewRole::Gunner, 12).with_tag(CrewTag::SteadyAim),
            CrewMember::new("Nok", CrewRole::Gunner, 12).with_tag(CrewTag::TriggerHappy),
            CrewMember::new("Iri", CrewRole::Pilot, 10)
                .with_tag(CrewTag::Evasive)
                .with_tag(CrewTag::Organized),
        ];
        let bundle = aggregate(&roster, 0);

        assert_eq!(bundle.focus_fire_bonus, 0); // +1 and -1 cancel
        assert_eq!(bundle.evasive_bonus, 1);
        assert_eq!(bundle.cargo_bonus, 1);
        assert_eq!(bundle.attack_band, 2);
    }

    #[test]
    fn test_alien_synergy_pushes_nonzero_fields() {
        // 2 alien ship tags x 1 alien crew member = 2 synergy points
        let roster = vec![
            CrewMember::new("Xel", CrewRole::Mechanic, 20).with_tag(CrewTag::Alien),
        ];
        let bundle = aggregate(&roster, 2);

        // repair_amount 1 -> 3, wage 20 -> 22; zero fields stay zero
        assert_eq!(bundle.repair_amount, 3);
        assert_eq!(bundle.wage_total, 22);
        assert_eq!(bundle.attack_band, 0);
        assert_eq!(bundle.cargo_bonus, 0);
    }

    #[test]
    fn test_synergy_requires_both_factors() {
        let alien_crew = vec![
            CrewMember::new("Xel", CrewRole::Mechanic, 20).with_tag(CrewTag::Alien),
        ];
        let plain_crew = vec![CrewMember::new("Orr", CrewRole::Mechanic, 20)];

        // Alien crew, no alien ship tags
        assert_eq!(aggregate(&alien_crew, 0).repair_amount, 1);
        // Alien ship tags, no alien crew
        assert_eq!(aggregate(&plain_crew, 4).repair_amount, 1);
    }

    #[test]
    fn test_band_bonuses_clamped_after_synergy() {
        // Five gunners + big synergy would push attack far past +3
        let mut roster: Vec<CrewMember> = (0..5)
            .map(|i| CrewMember::new(format!("G{}", i), CrewRole::Gunner, 10))
            .collect();
        roster.push(CrewMember::new("Xel", CrewRole::Pilot, 10).with_tag(CrewTag::Alien));

        let bundle = aggregate(&roster, 3);
        assert_eq!(bundle.attack_band, BAND_BONUS_CLAMP);
        assert_eq!(bundle.engine_band, BAND_BONUS_CLAMP);
        // Non-band fields are NOT clamped
        assert!(bundle.wage_total > 60);
    }

    #[test]
    fn test_negative_fields_pushed_negative() {
        let roster = vec![
            CrewMember::new("Lin", CrewRole::Navigator, 9).with_tag(CrewTag::Alien),
        ];
        let bundle = aggregate(&roster, 1);
        // fuel_delta -2 pushed to -3
        assert_eq!(bundle.fuel_delta, -3);
    }
}
