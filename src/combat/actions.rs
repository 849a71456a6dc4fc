//! Combat actions and the providers that choose them
//!
//! A provider is any value that can pick one action per round from the
//! allowed set. Scripted sequences cover AI and tests; a closure works for
//! interactive front ends. An illegal choice is not an error: the resolver
//! silently substitutes Focus Fire.

use serde::{Deserialize, Serialize};

use crate::combat::state::CombatState;
use crate::core::types::Subsystem;
use crate::ship::loadout::ShipLoadout;

/// One side's chosen action for a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatAction {
    FocusFire,
    ReinforceShields,
    EvasiveManeuvers,
    AttemptEscape,
    RepairSystems,
    Scan,
    Surrender,
}

impl CombatAction {
    pub const ALL: [CombatAction; 7] = [
        CombatAction::FocusFire,
        CombatAction::ReinforceShields,
        CombatAction::EvasiveManeuvers,
        CombatAction::AttemptEscape,
        CombatAction::RepairSystems,
        CombatAction::Scan,
        CombatAction::Surrender,
    ];

    /// Subsystem band this action boosts for the round, if any
    pub fn band_target(self) -> Option<Subsystem> {
        match self {
            CombatAction::FocusFire => Some(Subsystem::Weapon),
            CombatAction::ReinforceShields => Some(Subsystem::Defense),
            CombatAction::EvasiveManeuvers => Some(Subsystem::Engine),
            _ => None,
        }
    }
}

/// Everything a provider may inspect when choosing
#[derive(Debug)]
pub struct ActionContext<'a> {
    pub round: u32,
    pub own: &'a CombatState,
    pub opponent: &'a CombatState,
    pub own_loadout: &'a ShipLoadout,
    pub opponent_loadout: &'a ShipLoadout,
    pub allowed: &'a [CombatAction],
}

/// Chooses one action per round
pub trait ActionProvider {
    fn choose(&mut self, ctx: &ActionContext<'_>) -> CombatAction;
}

impl<F> ActionProvider for F
where
    F: FnMut(&ActionContext<'_>) -> CombatAction,
{
    fn choose(&mut self, ctx: &ActionContext<'_>) -> CombatAction {
        self(ctx)
    }
}

/// Fixed per-round action sequence; repeats its last entry once exhausted
#[derive(Debug, Clone)]
pub struct Scripted {
    actions: Vec<CombatAction>,
    cursor: usize,
}

impl Scripted {
    pub fn new(actions: Vec<CombatAction>) -> Self {
        Self { actions, cursor: 0 }
    }

    /// The same action every round
    pub fn always(action: CombatAction) -> Self {
        Self::new(vec![action])
    }
}

impl ActionProvider for Scripted {
    fn choose(&mut self, _ctx: &ActionContext<'_>) -> CombatAction {
        let action = self
            .actions
            .get(self.cursor)
            .or_else(|| self.actions.last())
            .copied()
            .unwrap_or(CombatAction::FocusFire);
        if self.cursor < self.actions.len() {
            self.cursor += 1;
        }
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_ctx_choose(provider: &mut impl ActionProvider, rounds: usize) -> Vec<CombatAction> {
        // Providers that ignore the context can be driven without a battle
        use crate::catalog::Catalog;
        use crate::core::types::Side;

        let catalog = {
            let mut c = Catalog::new();
            c.add_hull(crate::catalog::HullDefinition {
                id: "shell".into(),
                name: "Shell".to_string(),
                tier: 1,
                frame: crate::catalog::FrameClass::Shuttle,
                band_bias: Default::default(),
                hull_bias: 0,
                cargo_base: 0,
                data_cargo_base: 0,
                fuel_base: 0,
                slots: Default::default(),
                traits: vec![],
            });
            c
        };
        let loadout = ShipLoadout::new("shell");
        let state = CombatState::from_loadout(&catalog, &loadout, Side::Player).unwrap();
        let allowed = CombatAction::ALL;

        (0..rounds)
            .map(|round| {
                let ctx = ActionContext {
                    round: round as u32 + 1,
                    own: &state,
                    opponent: &state,
                    own_loadout: &loadout,
                    opponent_loadout: &loadout,
                    allowed: &allowed,
                };
                provider.choose(&ctx)
            })
            .collect()
    }

    #[test]
    fn test_band_targets() {
        assert_eq!(
            CombatAction::FocusFire.band_target(),
            Some(Subsystem::Weapon)
        );
        assert_eq!(
            CombatAction::ReinforceShields.band_target(),
            Some(Subsystem::Defense)
        );
        assert_eq!(
            CombatAction::EvasiveManeuvers.band_target(),
            Some(Subsystem::Engine)
        );
        assert_eq!(CombatAction::Scan.band_target(), None);
        assert_eq!(CombatAction::Surrender.band_target(), None);
    }

    #[test]
    fn test_scripted_repeats_last_action() {
        let mut script = Scripted::new(vec![
            CombatAction::Scan,
            CombatAction::RepairSystems,
            CombatAction::FocusFire,
        ]);
        let chosen = dummy_ctx_choose(&mut script, 5);
        assert_eq!(
            chosen,
            vec![
                CombatAction::Scan,
                CombatAction::RepairSystems,
                CombatAction::FocusFire,
                CombatAction::FocusFire,
                CombatAction::FocusFire,
            ]
        );
    }

    #[test]
    fn test_empty_script_falls_back_to_focus_fire() {
        let mut script = Scripted::new(vec![]);
        let chosen = dummy_ctx_choose(&mut script, 2);
        assert_eq!(chosen, vec![CombatAction::FocusFire, CombatAction::FocusFire]);
    }

    #[test]
    fn test_closure_provider() {
        let mut provider = |ctx: &ActionContext<'_>| {
            if ctx.round == 1 {
                CombatAction::Scan
            } else {
                CombatAction::FocusFire
            }
        };
        let chosen = dummy_ctx_choose(&mut provider, 2);
        assert_eq!(chosen, vec![CombatAction::Scan, CombatAction::FocusFire]);
    }
}
