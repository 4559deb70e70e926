//! Resolves authored program specs into engine-ready rule programs.

use battle_core::{ActionCatalog, Protocol, RuleProgram, TriggerCatalog};

use crate::program::ProgramSpec;
use crate::progression::{PlayerProgress, ProgressionBonus};

/// Reasons a program spec cannot be turned into a [`RuleProgram`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("unknown trigger `{0}`")]
    UnknownTrigger(String),

    #[error("unknown action `{0}`")]
    UnknownAction(String),

    #[error("{kind} `{id}` is not unlocked")]
    Locked { kind: &'static str, id: String },

    #[error("program `{0}` has no protocols")]
    EmptyProgram(String),
}

/// Builds [`RuleProgram`]s from [`ProgramSpec`]s.
///
/// Without progress every catalog entry is usable and no upgrade bonuses
/// apply. With progress, ids must be unlocked and upgraded actions have
/// their damage scaled by [`ProgressionBonus`].
#[derive(Clone, Debug)]
pub struct ProgramBuilder<'a> {
    triggers: &'a TriggerCatalog,
    actions: &'a ActionCatalog,
    progress: Option<&'a PlayerProgress>,
    bonus: ProgressionBonus,
}

impl<'a> ProgramBuilder<'a> {
    pub fn new(triggers: &'a TriggerCatalog, actions: &'a ActionCatalog) -> Self {
        Self {
            triggers,
            actions,
            progress: None,
            bonus: ProgressionBonus::default(),
        }
    }

    pub fn with_progress(mut self, progress: &'a PlayerProgress) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_bonus(mut self, bonus: ProgressionBonus) -> Self {
        self.bonus = bonus;
        self
    }

    pub fn build(&self, spec: &ProgramSpec) -> Result<RuleProgram, BuildError> {
        if spec.protocols.is_empty() {
            return Err(BuildError::EmptyProgram(spec.name.clone()));
        }

        let mut protocols = Vec::with_capacity(spec.protocols.len());
        for entry in &spec.protocols {
            let trigger = self
                .triggers
                .get(&entry.trigger)
                .ok_or_else(|| BuildError::UnknownTrigger(entry.trigger.clone()))?;
            let action = self
                .actions
                .get(&entry.action)
                .ok_or_else(|| BuildError::UnknownAction(entry.action.clone()))?;

            let mut action = action.clone();
            if let Some(progress) = self.progress {
                if !progress.has_trigger(&trigger.id) {
                    return Err(BuildError::Locked {
                        kind: "trigger",
                        id: trigger.id.clone(),
                    });
                }
                if !progress.has_action(&action.id) {
                    return Err(BuildError::Locked {
                        kind: "action",
                        id: action.id.clone(),
                    });
                }
                let level = progress.upgrade_level(&action.id);
                if level > 0 {
                    action = action.with_bonus(&self.bonus.for_level(level));
                }
            }

            let protocol = Protocol::new(trigger.clone(), action, entry.priority);
            protocols.push(if entry.enabled {
                protocol
            } else {
                protocol.disabled()
            });
        }

        tracing::debug!(
            program = %spec.name,
            protocols = protocols.len(),
            "rule program built"
        );
        Ok(RuleProgram::new(protocols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::ProtocolSpec;

    fn spec() -> ProgramSpec {
        ProgramSpec::new("gunner")
            .with(ProtocolSpec::new("always", "basic_shot", 1))
            .with(ProtocolSpec::new("hp_below_25", "repair", 10))
    }

    #[test]
    fn resolves_ids_in_priority_order() {
        let (triggers, actions) = (TriggerCatalog::builtin(), ActionCatalog::builtin());
        let program = ProgramBuilder::new(&triggers, &actions)
            .build(&spec())
            .unwrap();

        let ids: Vec<_> = program
            .protocols()
            .iter()
            .map(|p| p.action.id.as_str())
            .collect();
        assert_eq!(ids, vec!["repair", "basic_shot"]);
    }

    #[test]
    fn unknown_ids_are_reported() {
        let (triggers, actions) = (TriggerCatalog::builtin(), ActionCatalog::builtin());
        let builder = ProgramBuilder::new(&triggers, &actions);

        let bad_trigger = ProgramSpec::new("x").with(ProtocolSpec::new("sometimes", "bomb", 1));
        assert_eq!(
            builder.build(&bad_trigger),
            Err(BuildError::UnknownTrigger("sometimes".into()))
        );

        let bad_action = ProgramSpec::new("x").with(ProtocolSpec::new("always", "nuke", 1));
        assert_eq!(
            builder.build(&bad_action),
            Err(BuildError::UnknownAction("nuke".into()))
        );
    }

    #[test]
    fn empty_program_is_rejected() {
        let (triggers, actions) = (TriggerCatalog::builtin(), ActionCatalog::builtin());
        let result = ProgramBuilder::new(&triggers, &actions).build(&ProgramSpec::new("idle"));
        assert_eq!(result, Err(BuildError::EmptyProgram("idle".into())));
    }

    #[test]
    fn locked_action_is_rejected() {
        let (triggers, actions) = (TriggerCatalog::builtin(), ActionCatalog::builtin());
        let progress = PlayerProgress::new()
            .unlock_trigger("always")
            .unlock_trigger("hp_below_25")
            .unlock_action("basic_shot");

        let result = ProgramBuilder::new(&triggers, &actions)
            .with_progress(&progress)
            .build(&spec());
        assert_eq!(
            result,
            Err(BuildError::Locked {
                kind: "action",
                id: "repair".into()
            })
        );
    }

    #[test]
    fn upgrades_scale_action_damage() {
        let (triggers, actions) = (TriggerCatalog::builtin(), ActionCatalog::builtin());
        let progress = PlayerProgress::new()
            .unlock_trigger("always")
            .unlock_action("basic_shot")
            .with_upgrade("basic_shot", 2);
        let spec = ProgramSpec::new("upgraded").with(ProtocolSpec::new("always", "basic_shot", 1));

        let program = ProgramBuilder::new(&triggers, &actions)
            .with_progress(&progress)
            .build(&spec)
            .unwrap();
        let damage = program.protocols()[0].action.damage().unwrap();
        // (10 + 2) × 1.10
        assert!((damage - 13.2).abs() < 1e-4);
    }

    #[test]
    fn disabled_entries_stay_in_program() {
        let (triggers, actions) = (TriggerCatalog::builtin(), ActionCatalog::builtin());
        let spec = ProgramSpec::new("x")
            .with(ProtocolSpec::new("always", "bomb", 5).disabled())
            .with(ProtocolSpec::new("always", "basic_shot", 1));

        let program = ProgramBuilder::new(&triggers, &actions).build(&spec).unwrap();
        assert_eq!(program.len(), 2);
        assert!(!program.protocols()[0].enabled);
    }
}
