//! Action domain: named, parameterized abilities a construct can fire.
//!
//! An [`Action`] never mutates the battle. Executing it against a
//! [`BattleContext`] yields an [`ActionResult`] descriptor which the engine
//! then applies.
//!
//! # Module Structure
//!
//! - `kind`: `ActionKind`, the parameterized behaviour enum
//! - `result`: `ActionResult`, the descriptor handed to the engine
//! - `context`: `BattleContext`, the read-only snapshot actions and triggers see
//! - `movement`: clamping and occupancy rules for moves
//! - `factory`: constructors for similarly shaped actions
//! - `catalog`: the built-in action registry
//! - `bonus`: meta-progression damage bonuses

mod bonus;
mod catalog;
mod context;
mod factory;
mod kind;
mod movement;
mod result;

pub use bonus::{Bonus, DamageBonus};
pub use catalog::ActionCatalog;
pub use context::BattleContext;
pub use kind::ActionKind;
pub use movement::MoveRule;
pub use result::{ActionResult, RowSpan};

use crate::combat::DamageType;
use crate::env::BattleRng;
use crate::state::Millis;

/// Slot classification of an action. Informational only; the engine ignores it.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CoreType {
    Movement,
    #[default]
    Tactical,
}

/// A named action definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cooldown_ms: Millis,
    pub damage_type: Option<DamageType>,
    pub core: CoreType,
    pub kind: ActionKind,
}

impl Action {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ActionKind) -> Self {
        let core = if kind.is_movement() {
            CoreType::Movement
        } else {
            CoreType::Tactical
        };
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            cooldown_ms: 0,
            damage_type: None,
            core,
            kind,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_cooldown(mut self, cooldown_ms: Millis) -> Self {
        self.cooldown_ms = cooldown_ms;
        self
    }

    pub fn with_damage_type(mut self, damage_type: DamageType) -> Self {
        self.damage_type = Some(damage_type);
        self
    }

    pub fn with_core(mut self, core: CoreType) -> Self {
        self.core = core;
        self
    }

    /// Resolves the action for the evaluating side.
    ///
    /// Deterministic for a given context except where the action's own
    /// behaviour is random (dodge).
    pub fn execute(&self, ctx: &BattleContext, rng: &mut dyn BattleRng) -> ActionResult {
        self.kind
            .execute(self.damage_type.unwrap_or_default(), ctx, rng)
    }

    /// Copy of this action with `bonus` folded into its damage figure.
    pub fn with_bonus(&self, bonus: &DamageBonus) -> Self {
        let mut action = self.clone();
        if let Some(damage) = action.kind.damage_mut() {
            *damage = bonus.apply(*damage);
        }
        action
    }

    pub fn damage(&self) -> Option<f32> {
        self.kind.damage()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRng;
    use crate::state::{BattleState, Fighter, InitialState, Position, Side};

    fn context() -> BattleContext {
        let initial = InitialState::new(
            Fighter::new(Position::new(1, 1), 100.0),
            Fighter::new(Position::new(4, 2), 100.0),
        );
        BattleContext::capture(&BattleState::from_initial(initial, None, None), Side::Player, false)
    }

    #[test]
    fn execution_is_deterministic() {
        let catalog = ActionCatalog::builtin();
        let ctx = context();
        for action in catalog.iter().filter(|a| a.id != "dodge") {
            let first = action.execute(&ctx, &mut ScriptedRng::constant(0.1));
            let second = action.execute(&ctx, &mut ScriptedRng::constant(0.9));
            assert_eq!(first, second, "{} is not deterministic", action.id);
        }
    }

    #[test]
    fn bomb_targets_enemy_tile() {
        let bomb = Action::bomb("bomb", "Bomb", 25.0, DamageType::Concussion, 1_000, 3_000);
        let result = bomb.execute(&context(), &mut ScriptedRng::constant(0.0));
        assert!(matches!(
            result,
            ActionResult::Bomb { target, delay_ms: 1_000, .. } if target == Position::new(4, 2)
        ));
    }

    #[test]
    fn bonus_scales_damage_only() {
        let shot = Action::shoot("shot", "Shot", 10.0, DamageType::Kinetic, 0.0, 500);
        let boosted = shot.with_bonus(&DamageBonus::new().flat(2.0).increased(50.0));
        assert_eq!(boosted.damage(), Some(18.0));
        assert_eq!(boosted.cooldown_ms, 500);

        let heal = Action::heal("repair", "Repair", 20.0, 5_000);
        assert_eq!(heal.with_bonus(&DamageBonus::new().flat(5.0)), heal);
    }

    #[test]
    fn move_actions_are_movement_core() {
        let catalog = ActionCatalog::builtin();
        let up = catalog.get("move_up").map(|a| a.core);
        assert_eq!(up, Some(CoreType::Movement));
        assert_eq!(catalog.get("basic_shot").map(|a| a.core), Some(CoreType::Tactical));
    }
}
