//! The round loop
//!
//! A battle is a pure function of the catalog, both loadouts, a seed, and
//! the two action providers. Each round gets its own logged RNG stream, both
//! ships are reassembled from current degradation, and the step order below
//! is fixed: surrender, repair, scan, band recompute, escape, attack, damage,
//! destruction.

use crate::catalog::Catalog;
use crate::combat::actions::{ActionContext, ActionProvider, CombatAction};
use crate::combat::constants::{
    ACTION_BAND_BONUS, DEFAULT_MAX_ROUNDS, ESCAPE_ROLL_MAX, REPAIR_BASE_AMOUNT,
};
use crate::combat::result::{
    CombatEvent, CombatOutcome, CombatResult, RoundRecord, ShipSnapshot, Winner,
};
use crate::combat::rng::RngStream;
use crate::combat::rps::resolve_rps;
use crate::combat::state::{CombatState, SubsystemCapacities};
use crate::core::error::Result;
use crate::core::types::{Side, Subsystem};
use crate::salvage;
use crate::ship::assembler::assemble;
use crate::ship::loadout::{SecondaryTag, ShipLoadout};

#[derive(Debug, Clone, Copy)]
pub struct CombatConfig {
    pub seed: u64,
    pub max_rounds: u32,
}

impl CombatConfig {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Actions a side may legally choose this round
fn allowed_actions(state: &CombatState) -> Vec<CombatAction> {
    CombatAction::ALL
        .iter()
        .copied()
        .filter(|action| match action {
            CombatAction::Scan => state.probe_equipped,
            CombatAction::RepairSystems => state.has_repair_charges(),
            _ => true,
        })
        .collect()
}

/// Substitute Focus Fire for any choice outside the allowed set. Not an
/// error, and no draw is attributed to the substitution.
fn validated_choice(choice: CombatAction, allowed: &[CombatAction], side: Side) -> CombatAction {
    if allowed.contains(&choice) {
        choice
    } else {
        tracing::warn!(%side, ?choice, "illegal action replaced with focus fire");
        CombatAction::FocusFire
    }
}

/// Reassemble one side and fold crew and action bonuses into its bands.
/// The weapon-vs-defense matchup bias lands on the weapon band only.
fn recompute_bands(
    catalog: &Catalog,
    state: &mut CombatState,
    loadout: &ShipLoadout,
    action: CombatAction,
    opponent: &CombatState,
) -> Result<()> {
    let ship = assemble(catalog, &loadout.hull, &loadout.modules, &state.degradation)?;

    state.capacities = SubsystemCapacities {
        weapon: ship.weapon.capacity,
        defense: ship.defense.capacity,
        engine: ship.engine.capacity,
    };

    for subsystem in Subsystem::ALL {
        let sheet = ship.subsystem(subsystem);
        let crew_bonus = match subsystem {
            Subsystem::Weapon => state.crew.attack_band,
            Subsystem::Defense => state.crew.defense_band,
            Subsystem::Engine => state.crew.engine_band,
        };
        let mut band = sheet.effective + crew_bonus;
        if action.band_target() == Some(subsystem) {
            band += ACTION_BAND_BONUS;
            band += match action {
                CombatAction::FocusFire => state.crew.focus_fire_bonus,
                CombatAction::ReinforceShields => state.crew.reinforce_shields_bonus,
                CombatAction::EvasiveManeuvers => state.crew.evasive_bonus,
                _ => 0,
            };
        }
        if subsystem == Subsystem::Weapon {
            band += resolve_rps(state.weapon_type, opponent.defense_type);
        }
        state.bands.set(subsystem, band.max(0));
    }
    Ok(())
}

/// Engine-band gap adjusted for cloak, interdiction, and pilot headcount.
/// A positive delta means the fleeing side gets away.
fn escape_delta(fleeing: &CombatState, pursuing: &CombatState) -> i32 {
    let cloak = if fleeing.has_cloak { 1 } else { 0 };
    let interdictor = if pursuing.has_interdictor { 1 } else { 0 };
    (fleeing.bands.engine - pursuing.bands.engine) + (cloak + fleeing.pilot_count as i32)
        - (interdictor + pursuing.pilot_count as i32)
}

/// Hull points restored by one repair charge on `module_index`
fn repair_amount(catalog: &Catalog, state: &CombatState, loadout: &ShipLoadout, module_index: usize) -> Result<i32> {
    let hull = catalog.hull(&loadout.hull)?;
    let instance = &loadout.modules[module_index];

    let mut amount = REPAIR_BASE_AMOUNT;
    if instance.has_tag(SecondaryTag::Efficient) {
        amount += 1;
    }
    if instance.has_tag(SecondaryTag::Alien) && hull.has_trait(crate::catalog::HullTrait::Alien) {
        amount += 1;
    }
    amount += state.crew.repair_amount;
    amount += state.crew.repair_focus_bonus;
    Ok(amount.max(0))
}

fn apply_repair(
    catalog: &Catalog,
    state: &mut CombatState,
    loadout: &ShipLoadout,
    events: &mut Vec<CombatEvent>,
) -> Result<()> {
    let Some(charge) = state.repair_charges.iter_mut().find(|c| c.remaining > 0) else {
        return Ok(());
    };
    charge.remaining -= 1;
    let module_index = charge.module_index;

    let amount = repair_amount(catalog, state, loadout, module_index)?;
    let healed = (state.hull_current + amount).min(state.hull_max);
    let applied = healed - state.hull_current;
    state.hull_current = healed;

    tracing::debug!(side = %state.side, module_index, applied, "repair applied");
    events.push(CombatEvent::Repaired {
        side: state.side,
        module_index,
        amount: applied,
    });
    Ok(())
}

/// Roll one side's outgoing damage from the band gap computed in this round
fn roll_damage(
    rng: &mut RngStream,
    attacker: &CombatState,
    defender: &CombatState,
    defender_action: CombatAction,
) -> i32 {
    // No fitted weapon, no attack, no draw
    if attacker.weapon_type.is_none() {
        return 0;
    }
    let delta = attacker.bands.weapon - defender.bands.defense;
    let label = match attacker.side {
        Side::Player => "damage_player",
        Side::Enemy => "damage_enemy",
    };
    let mut damage = if delta > 0 {
        rng.roll_range(label, 1, delta)
    } else if delta == 0 {
        rng.roll_range(label, 0, 1)
    } else {
        return 0;
    };

    if defender_action == CombatAction::EvasiveManeuvers {
        let evade_label = match defender.side {
            Side::Player => "evade_player",
            Side::Enemy => "evade_enemy",
        };
        damage = (damage - rng.roll_range(evade_label, 0, 1)).max(0);
    }
    damage
}

/// Subtract hull points and degrade one random subsystem per color-band
/// crossing
fn apply_damage(
    rng: &mut RngStream,
    state: &mut CombatState,
    damage: i32,
    events: &mut Vec<CombatEvent>,
) {
    if damage <= 0 {
        return;
    }
    let before = state.hull_band();
    state.hull_current = (state.hull_current - damage).max(0);
    let after = state.hull_band();

    let label = match state.side {
        Side::Player => "degrade_player",
        Side::Enemy => "degrade_enemy",
    };
    for _ in after.index()..before.index() {
        let subsystem = rng.pick_subsystem(label);
        state.degradation.add(subsystem, 1);
        events.push(CombatEvent::SubsystemDegraded {
            side: state.side,
            subsystem,
        });
    }
}

/// Resolve a full battle to its terminal outcome.
///
/// Fails only on validation problems in the loadouts, before any round runs.
pub fn resolve_combat(
    catalog: &Catalog,
    config: &CombatConfig,
    player_loadout: &ShipLoadout,
    enemy_loadout: &ShipLoadout,
    player_provider: &mut dyn ActionProvider,
    enemy_provider: &mut dyn ActionProvider,
) -> Result<CombatResult> {
    let mut player = CombatState::from_loadout(catalog, player_loadout, Side::Player)?;
    let mut enemy = CombatState::from_loadout(catalog, enemy_loadout, Side::Enemy)?;
    let player_threat = player.threat;
    let enemy_threat = enemy.threat;

    tracing::info!(
        seed = config.seed,
        player_threat,
        enemy_threat,
        "combat started"
    );

    let mut rounds_log: Vec<RoundRecord> = Vec::new();
    let mut salvage_list = Vec::new();
    let mut terminal: Option<(CombatOutcome, Winner)> = None;
    let mut round = 0;

    while terminal.is_none() && round < config.max_rounds {
        round += 1;
        let mut rng = RngStream::new(config.seed, round);
        let mut events: Vec<CombatEvent> = Vec::new();

        // Action selection, validated against per-side legality
        let player_allowed = allowed_actions(&player);
        let player_action = {
            let ctx = ActionContext {
                round,
                own: &player,
                opponent: &enemy,
                own_loadout: player_loadout,
                opponent_loadout: enemy_loadout,
                allowed: &player_allowed,
            };
            validated_choice(player_provider.choose(&ctx), &player_allowed, Side::Player)
        };
        let enemy_allowed = allowed_actions(&enemy);
        let enemy_action = {
            let ctx = ActionContext {
                round,
                own: &enemy,
                opponent: &player,
                own_loadout: enemy_loadout,
                opponent_loadout: player_loadout,
                allowed: &enemy_allowed,
            };
            validated_choice(enemy_provider.choose(&ctx), &enemy_allowed, Side::Enemy)
        };

        // Step 1: surrender short-circuits the whole round
        let player_quit = player_action == CombatAction::Surrender;
        let enemy_quit = enemy_action == CombatAction::Surrender;
        if player_quit || enemy_quit {
            if player_quit {
                events.push(CombatEvent::Surrendered { side: Side::Player });
            }
            if enemy_quit {
                events.push(CombatEvent::Surrendered { side: Side::Enemy });
            }
            // The opponent of the side that quit wins; nobody wins a mutual one
            let winner = if player_quit && enemy_quit {
                Winner::None
            } else if player_quit {
                Winner::from(Side::Player.opponent())
            } else {
                Winner::from(Side::Enemy.opponent())
            };
            terminal = Some((CombatOutcome::Surrender, winner));
            rounds_log.push(RoundRecord {
                round,
                player_action,
                enemy_action,
                events,
                player_hull: player.hull_current,
                enemy_hull: enemy.hull_current,
                draws: rng.into_draws(),
            });
            break;
        }

        // Step 2: repairs
        if player_action == CombatAction::RepairSystems {
            apply_repair(catalog, &mut player, player_loadout, &mut events)?;
        }
        if enemy_action == CombatAction::RepairSystems {
            apply_repair(catalog, &mut enemy, enemy_loadout, &mut events)?;
        }

        // Step 3: scans mark the opponent
        if player_action == CombatAction::Scan {
            if rng.roll_bool("scan_player") {
                enemy.scanned = true;
                events.push(CombatEvent::ScanSucceeded { side: Side::Player });
            } else {
                events.push(CombatEvent::ScanFailed { side: Side::Player });
            }
        }
        if enemy_action == CombatAction::Scan {
            if rng.roll_bool("scan_enemy") {
                player.scanned = true;
                events.push(CombatEvent::ScanSucceeded { side: Side::Enemy });
            } else {
                events.push(CombatEvent::ScanFailed { side: Side::Enemy });
            }
        }

        // Step 4: this round's effective bands for both sides
        recompute_bands(catalog, &mut player, player_loadout, player_action, &enemy)?;
        recompute_bands(catalog, &mut enemy, enemy_loadout, enemy_action, &player)?;

        // Steps 5 and 6: escape attempts, player evaluated first
        let player_flees = player_action == CombatAction::AttemptEscape;
        let enemy_flees = enemy_action == CombatAction::AttemptEscape;
        if player_flees && enemy_flees {
            events.push(CombatEvent::MutualEscape);
            terminal = Some((CombatOutcome::Escape, Winner::None));
        } else if player_flees || enemy_flees {
            let (fleeing, pursuing) = if player_flees {
                (&player, &enemy)
            } else {
                (&enemy, &player)
            };
            let delta = escape_delta(fleeing, pursuing);
            // Logged for replay symmetry; the sign of the delta decides
            let label = match fleeing.side {
                Side::Player => "escape_roll_player",
                Side::Enemy => "escape_roll_enemy",
            };
            rng.roll_range(label, 1, ESCAPE_ROLL_MAX);
            let succeeded = delta > 0;
            events.push(CombatEvent::EscapeAttempt {
                side: fleeing.side,
                delta,
                succeeded,
            });
            if succeeded {
                terminal = Some((CombatOutcome::Escape, Winner::None));
            }
        }

        if terminal.is_none() {
            // Step 7: both damage rolls use bands as of step 4
            let player_damage = roll_damage(&mut rng, &player, &enemy, enemy_action);
            let enemy_damage = roll_damage(&mut rng, &enemy, &player, player_action);

            // Step 8: apply simultaneously
            if player_damage > 0 {
                events.push(CombatEvent::DamageDealt {
                    side: Side::Player,
                    amount: player_damage,
                });
            }
            if enemy_damage > 0 {
                events.push(CombatEvent::DamageDealt {
                    side: Side::Enemy,
                    amount: enemy_damage,
                });
            }
            apply_damage(&mut rng, &mut enemy, player_damage, &mut events);
            apply_damage(&mut rng, &mut player, enemy_damage, &mut events);

            // Step 9: destruction and salvage
            let player_dead = player.is_destroyed();
            let enemy_dead = enemy.is_destroyed();
            if player_dead {
                events.push(CombatEvent::Destroyed { side: Side::Player });
            }
            if enemy_dead {
                events.push(CombatEvent::Destroyed { side: Side::Enemy });
            }
            if player_dead || enemy_dead {
                let winner = match (player_dead, enemy_dead) {
                    (true, true) => Winner::None,
                    (true, false) => Winner::Enemy,
                    (false, true) => Winner::Player,
                    (false, false) => unreachable!(),
                };
                if enemy_dead {
                    salvage_list = salvage::sample(&mut rng, catalog, &enemy_loadout.modules)?;
                    events.push(CombatEvent::SalvageRecovered {
                        modules: salvage_list.clone(),
                    });
                }
                terminal = Some((CombatOutcome::Destroyed, winner));
            }
        }

        rounds_log.push(RoundRecord {
            round,
            player_action,
            enemy_action,
            events,
            player_hull: player.hull_current,
            enemy_hull: enemy.hull_current,
            draws: rng.into_draws(),
        });
    }

    let (outcome, winner) = terminal.unwrap_or((CombatOutcome::MaxRounds, Winner::None));
    tracing::info!(?outcome, ?winner, rounds = round, "combat resolved");

    Ok(CombatResult {
        outcome,
        winner,
        rounds: round,
        seed: config.seed,
        player: ShipSnapshot::from(&player),
        enemy: ShipSnapshot::from(&enemy),
        player_threat,
        enemy_threat,
        salvage: salvage_list,
        rounds_log,
    })
}
