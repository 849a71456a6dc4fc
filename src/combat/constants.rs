//! Combat tunables - all additive adjustments in one place

/// Round cap when the caller does not override it
pub const DEFAULT_MAX_ROUNDS: u32 = 30;

/// Base hull points restored by one repair charge
pub const REPAIR_BASE_AMOUNT: i32 = 2;
/// Charges each repair rig carries into battle
pub const REPAIR_CHARGES_PER_RIG: u8 = 2;

/// Band bonus for choosing the matching stance action
pub const ACTION_BAND_BONUS: i32 = 1;

/// Upper bound of the logged (outcome-neutral) in-combat escape roll
pub const ESCAPE_ROLL_MAX: i32 = 100;

// Hull color band thresholds, in percent
pub const HULL_GREEN_ABOVE: f32 = 66.0;
pub const HULL_YELLOW_ABOVE: f32 = 33.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_thresholds_ordered() {
        assert!(HULL_GREEN_ABOVE > HULL_YELLOW_ABOVE);
        assert!(HULL_YELLOW_ABOVE > 0.0);
    }
}
