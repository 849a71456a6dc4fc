//! Pursuit/escape probability model
//!
//! Shared by pre-combat flight and the combat resolver's threat math. The
//! roll is a hash-derived value, not a stream draw: the same seed key always
//! produces the same outcome, so a flight attempt can be re-audited without
//! replaying anything else.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

pub const THRESHOLD_MIN: f64 = 0.05;
pub const THRESHOLD_MAX: f64 = 0.95;
pub const TR_BAND_WEIGHT: f64 = 0.05;
pub const CLOAK_BONUS: f64 = 0.10;
pub const INTERDICTOR_PENALTY: f64 = 0.15;
pub const PILOT_SKILL_WEIGHT: f64 = 0.10;

/// Kinematic descriptor of one ship in a pursuit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PursuitProfile {
    pub engine_band: i32,
    pub threat_band: i32,
    pub pilot_skill: i32,
    pub has_cloak: bool,
    pub has_interdictor: bool,
}

/// Outcome of one escape attempt, with the numbers behind it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PursuitOutcome {
    pub escaped: bool,
    pub threshold: f64,
    pub roll: f64,
}

/// Base escape threshold from the engine band gap alone
fn base_threshold(engine_delta: i32) -> f64 {
    match engine_delta {
        d if d >= 2 => 0.70,
        1 => 0.60,
        0 => 0.50,
        -1 => 0.40,
        _ => 0.30,
    }
}

/// Deterministic roll in [0, 1) derived from a seed key
fn keyed_roll(seed_key: u64) -> f64 {
    let mut rng = ChaCha8Rng::seed_from_u64(seed_key);
    rng.gen::<f64>()
}

/// Resolve a flight attempt: does `fleeing` get away from `pursuing`?
///
/// Pure function of the two profiles and the seed key; repeated calls with
/// identical inputs return identical thresholds and rolls.
pub fn resolve(
    fleeing: &PursuitProfile,
    pursuing: &PursuitProfile,
    seed_key: u64,
) -> PursuitOutcome {
    let mut threshold = base_threshold(fleeing.engine_band - pursuing.engine_band);

    threshold += TR_BAND_WEIGHT * (fleeing.threat_band - pursuing.threat_band) as f64;
    if fleeing.has_cloak {
        threshold += CLOAK_BONUS;
    }
    if pursuing.has_interdictor {
        threshold -= INTERDICTOR_PENALTY;
    }
    threshold += PILOT_SKILL_WEIGHT * (fleeing.pilot_skill - pursuing.pilot_skill) as f64;

    let threshold = threshold.clamp(THRESHOLD_MIN, THRESHOLD_MAX);
    let roll = keyed_roll(seed_key);

    PursuitOutcome {
        escaped: roll < threshold,
        threshold,
        roll,
    }
}
