//! Rule programs: priority-ordered trigger → action pairs.
//!
//! A program is built once before a battle and only read afterwards. Each
//! tick the engine walks it top to bottom and fires the first protocol that
//! is enabled, matches, is off cooldown and does not stutter.

use crate::action::{Action, BattleContext};
use crate::trigger::Trigger;

/// One trigger → action rule.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Protocol {
    pub trigger: Trigger,
    pub action: Action,
    pub priority: i32,
    pub enabled: bool,
}

impl Protocol {
    pub fn new(trigger: Trigger, action: Action, priority: i32) -> Self {
        Self {
            trigger,
            action,
            priority,
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Ordered list of protocols for one combatant.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleProgram {
    protocols: Vec<Protocol>,
}

impl RuleProgram {
    /// Sorts by priority, highest first. Equal priorities keep declaration order.
    pub fn new(mut protocols: Vec<Protocol>) -> Self {
        protocols.sort_by_key(|p| std::cmp::Reverse(p.priority));
        Self { protocols }
    }

    pub fn protocols(&self) -> &[Protocol] {
        &self.protocols
    }

    pub fn len(&self) -> usize {
        self.protocols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty()
    }

    /// Picks the protocol to fire this tick.
    ///
    /// `is_ready` reports whether an action is off cooldown. `stutters` is
    /// consulted only for a protocol that is enabled, matches and is ready;
    /// returning true skips that protocol and the walk continues.
    pub fn select(
        &self,
        ctx: &BattleContext,
        mut is_ready: impl FnMut(&Action) -> bool,
        mut stutters: impl FnMut(&Protocol) -> bool,
    ) -> Option<&Protocol> {
        self.protocols.iter().find(|protocol| {
            if !protocol.enabled || !protocol.trigger.evaluate(ctx) {
                return false;
            }
            if !is_ready(&protocol.action) {
                return false;
            }
            if stutters(protocol) {
                tracing::trace!(
                    side = %ctx.side,
                    action = %protocol.action.id,
                    "protocol stuttered"
                );
                return false;
            }
            true
        })
    }
}

impl FromIterator<Protocol> for RuleProgram {
    fn from_iter<I: IntoIterator<Item = Protocol>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionCatalog;
    use crate::state::{BattleState, Fighter, InitialState, Position, Side};
    use crate::trigger::{TriggerCatalog, TriggerCondition};

    fn protocol(trigger: &str, action: &str, priority: i32) -> Protocol {
        let triggers = TriggerCatalog::builtin();
        let actions = ActionCatalog::builtin();
        match (triggers.get(trigger), actions.get(action)) {
            (Some(t), Some(a)) => Protocol::new(t.clone(), a.clone(), priority),
            _ => panic!("unknown ids {trigger}/{action}"),
        }
    }

    fn context() -> BattleContext {
        let initial = InitialState::new(
            Fighter::new(Position::new(1, 1), 100.0),
            Fighter::new(Position::new(4, 1), 100.0),
        );
        BattleContext::capture(
            &BattleState::from_initial(initial, None, None),
            Side::Player,
            false,
        )
    }

    #[test]
    fn sorts_by_priority_descending_and_stable() {
        let program = RuleProgram::new(vec![
            protocol("always", "basic_shot", 1),
            protocol("always", "flame_shot", 5),
            protocol("always", "frost_shot", 5),
            protocol("always", "bomb", 3),
        ]);
        let order: Vec<&str> = program
            .protocols()
            .iter()
            .map(|p| p.action.id.as_str())
            .collect();
        assert_eq!(order, vec!["flame_shot", "frost_shot", "bomb", "basic_shot"]);
    }

    #[test]
    fn selects_highest_matching_ready_protocol() {
        let program = RuleProgram::new(vec![
            protocol("hp_below_25", "repair", 10),
            protocol("always", "bomb", 5),
            protocol("always", "basic_shot", 1),
        ]);
        let ctx = context();

        let chosen = program.select(&ctx, |_| true, |_| false);
        assert_eq!(chosen.map(|p| p.action.id.as_str()), Some("bomb"));

        let chosen = program.select(&ctx, |a| a.id != "bomb", |_| false);
        assert_eq!(chosen.map(|p| p.action.id.as_str()), Some("basic_shot"));
    }

    #[test]
    fn disabled_protocols_are_skipped() {
        let program = RuleProgram::new(vec![
            protocol("always", "bomb", 5).disabled(),
            protocol("always", "basic_shot", 1),
        ]);
        let chosen = program.select(&context(), |_| true, |_| false);
        assert_eq!(chosen.map(|p| p.action.id.as_str()), Some("basic_shot"));
    }

    #[test]
    fn stutter_is_rolled_only_for_ready_matches() {
        let program = RuleProgram::new(vec![
            protocol("hp_below_25", "repair", 10),
            protocol("always", "bomb", 5),
            protocol("always", "basic_shot", 1),
        ]);
        let mut rolled = Vec::new();
        let chosen = program.select(
            &context(),
            |a| a.id != "bomb",
            |p| {
                rolled.push(p.action.id.clone());
                true
            },
        );
        assert!(chosen.is_none());
        assert_eq!(rolled, vec!["basic_shot".to_string()]);
    }

    #[test]
    fn custom_conditions_work_in_programs() {
        let trigger = Trigger::new("never", "Never", TriggerCondition::Not(Box::new(
            TriggerCondition::Always,
        )));
        let program = RuleProgram::new(vec![Protocol::new(
            trigger,
            Action::heal("repair", "Repair", 10.0, 0),
            1,
        )]);
        assert!(program.select(&context(), |_| true, |_| false).is_none());
    }
}
