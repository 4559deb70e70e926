//! Meta-progression: what a player has unlocked and how far each action has
//! been upgraded.

use std::collections::{BTreeMap, BTreeSet};

use battle_core::DamageBonus;

/// Unlocks and upgrade levels carried between battles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerProgress {
    pub unlocked_actions: BTreeSet<String>,
    pub unlocked_triggers: BTreeSet<String>,
    /// Upgrade level per action id. Missing entries are level 0.
    pub upgrades: BTreeMap<String, u32>,
}

impl PlayerProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unlock_action(mut self, id: impl Into<String>) -> Self {
        self.unlocked_actions.insert(id.into());
        self
    }

    pub fn unlock_trigger(mut self, id: impl Into<String>) -> Self {
        self.unlocked_triggers.insert(id.into());
        self
    }

    pub fn with_upgrade(mut self, action_id: impl Into<String>, level: u32) -> Self {
        self.upgrades.insert(action_id.into(), level);
        self
    }

    pub fn has_action(&self, id: &str) -> bool {
        self.unlocked_actions.contains(id)
    }

    pub fn has_trigger(&self, id: &str) -> bool {
        self.unlocked_triggers.contains(id)
    }

    pub fn upgrade_level(&self, action_id: &str) -> u32 {
        self.upgrades.get(action_id).copied().unwrap_or(0)
    }
}

/// Damage scaling granted per upgrade level.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgressionBonus {
    pub flat_per_level: f32,
    /// Percent added to the "increased" bucket per level.
    pub increased_per_level: f32,
}

impl ProgressionBonus {
    pub const DEFAULT_FLAT_PER_LEVEL: f32 = 1.0;
    pub const DEFAULT_INCREASED_PER_LEVEL: f32 = 5.0;

    /// Bonus for an action upgraded to `level`. Level 0 yields no bonus.
    pub fn for_level(&self, level: u32) -> DamageBonus {
        if level == 0 {
            return DamageBonus::new();
        }
        let level = level as f32;
        DamageBonus::new()
            .flat(self.flat_per_level * level)
            .increased(self.increased_per_level * level)
    }
}

impl Default for ProgressionBonus {
    fn default() -> Self {
        Self {
            flat_per_level: Self::DEFAULT_FLAT_PER_LEVEL,
            increased_per_level: Self::DEFAULT_INCREASED_PER_LEVEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_zero_adds_nothing() {
        let bonus = ProgressionBonus::default().for_level(0);
        assert!(bonus.is_empty());
        assert_eq!(bonus.apply(10.0), 10.0);
    }

    #[test]
    fn levels_fold_flat_then_increased() {
        // (10 + 2) × 1.10
        let bonus = ProgressionBonus::default().for_level(2);
        assert!((bonus.apply(10.0) - 13.2).abs() < 1e-4);
    }

    #[test]
    fn missing_upgrade_is_level_zero() {
        let progress = PlayerProgress::new().with_upgrade("bomb", 3);
        assert_eq!(progress.upgrade_level("bomb"), 3);
        assert_eq!(progress.upgrade_level("basic_shot"), 0);
    }
}
