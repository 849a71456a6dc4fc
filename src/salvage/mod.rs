//! Salvage sampling from destroyed ships
//!
//! Loot count comes from a fixed distribution, then instances are drawn by
//! weighted sampling without replacement. Rarity and secondary tags both
//! raise a module's weight; pristine picks can mutate.

use crate::catalog::Catalog;
use crate::combat::rng::RngStream;
use crate::core::error::Result;
use crate::ship::loadout::{ModuleInstance, SecondaryTag};

/// Percent chance of recovering nothing
pub const NO_LOOT_PCT: i32 = 50;
/// Percent chance of recovering exactly one module (after the no-loot band)
pub const ONE_LOOT_PCT: i32 = 40;
/// Chance a pristine, mutation-allowed pick comes back unstable
pub const MUTATION_CHANCE: f64 = 0.20;

/// Weight factor from an instance's secondary tags
fn tag_factor(instance: &ModuleInstance) -> f64 {
    if instance.has_tag(SecondaryTag::Alien) {
        if instance.tags.len() > 1 {
            3.0
        } else {
            2.5
        }
    } else if instance.has_tag(SecondaryTag::Prototype) {
        1.75
    } else if instance.has_tag(SecondaryTag::Unstable) {
        1.25
    } else {
        1.0
    }
}

/// Sample salvage from a destroyed ship's fitted modules.
///
/// Draws come from the supplied round stream so salvage appears in the same
/// audit log as the killing blow. The result never exceeds the number of
/// salvageable instances.
pub fn sample(
    rng: &mut RngStream,
    catalog: &Catalog,
    modules: &[ModuleInstance],
) -> Result<Vec<ModuleInstance>> {
    // Pool: salvageable instances only, with their sampling weights
    let mut pool: Vec<(ModuleInstance, f64, bool)> = Vec::new();
    for instance in modules {
        let def = catalog.module(&instance.module)?;
        if !def.salvage.salvageable {
            continue;
        }
        let weight = def.rarity.salvage_weight() * tag_factor(instance);
        pool.push((instance.clone(), weight, def.salvage.mutation_allowed));
    }

    let count_roll = rng.roll_range("salvage_count", 0, 99);
    let count = if count_roll < NO_LOOT_PCT {
        0
    } else if count_roll < NO_LOOT_PCT + ONE_LOOT_PCT {
        1
    } else {
        2
    };
    let count = count.min(pool.len());

    let mut loot = Vec::with_capacity(count);
    for _ in 0..count {
        let total: f64 = pool.iter().map(|(_, w, _)| w).sum();
        let mut pick = rng.roll_f64("salvage_pick", total);
        let mut chosen = pool.len() - 1;
        for (i, (_, weight, _)) in pool.iter().enumerate() {
            if pick < *weight {
                chosen = i;
                break;
            }
            pick -= weight;
        }

        let (mut instance, _, mutation_allowed) = pool.swap_remove(chosen);
        if instance.tags.is_empty()
            && mutation_allowed
            && rng.roll_chance("salvage_mutation", MUTATION_CHANCE)
        {
            instance.tags.push(SecondaryTag::Unstable);
        }
        loot.push(instance);
    }

    tracing::debug!(recovered = loot.len(), "salvage sampled");
    Ok(loot)
}
