//! Stacking status effects.
//!
//! Every fighter tracks four independent, time-windowed stack collections.
//! Each stack stores its own `expires_at`, so stacks applied at different
//! times fall off at different times; reapplying never refreshes an existing
//! stack.
//!
//! # Capacity
//!
//! Collections hold at most [`BattleConfig::MAX_STACKS`] entries. Stacks
//! applied beyond the cap are dropped without error.

use arrayvec::ArrayVec;

use crate::config::{BattleConfig, StatusTuning};
use crate::state::Millis;

/// Kinds of stacking status effect.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusKind {
    /// Flat damage every burn tick, straight to HP.
    Burn,
    /// Amplifies all incoming HP damage.
    Viral,
    /// Disables shield regeneration while active.
    Emp,
    /// Slows cooldowns and makes actions stutter.
    Lag,
}

impl StatusKind {
    /// Lifetime of a freshly applied stack.
    pub fn duration(self, tuning: &StatusTuning) -> Millis {
        match self {
            StatusKind::Burn => tuning.burn_duration_ms,
            StatusKind::Viral => tuning.viral_duration_ms,
            StatusKind::Emp => tuning.emp_duration_ms,
            StatusKind::Lag => tuning.lag_duration_ms,
        }
    }
}

/// A single stack with its own expiry window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusStack {
    pub applied_at: Millis,
    /// Battle time at which this stack expires.
    pub expires_at: Millis,
}

type Stacks = ArrayVec<StatusStack, { BattleConfig::MAX_STACKS }>;

/// Active status stacks on a fighter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusStacks {
    burn: Stacks,
    viral: Stacks,
    emp: Stacks,
    lag: Stacks,
    /// Recomputed every tick as "any EMP stack active".
    pub shield_regen_disabled: bool,
}

impl StatusStacks {
    /// Creates an empty stack set.
    pub fn empty() -> Self {
        Self::default()
    }

    fn stacks(&self, kind: StatusKind) -> &Stacks {
        match kind {
            StatusKind::Burn => &self.burn,
            StatusKind::Viral => &self.viral,
            StatusKind::Emp => &self.emp,
            StatusKind::Lag => &self.lag,
        }
    }

    fn stacks_mut(&mut self, kind: StatusKind) -> &mut Stacks {
        match kind {
            StatusKind::Burn => &mut self.burn,
            StatusKind::Viral => &mut self.viral,
            StatusKind::Emp => &mut self.emp,
            StatusKind::Lag => &mut self.lag,
        }
    }

    /// Number of stacks of `kind` currently held.
    pub fn count(&self, kind: StatusKind) -> usize {
        self.stacks(kind).len()
    }

    /// Adds one stack of `kind` lasting `duration` from `now`.
    ///
    /// Returns false when the collection is already at the cap and the stack
    /// was dropped.
    pub fn add(&mut self, kind: StatusKind, now: Millis, duration: Millis) -> bool {
        let stacks = self.stacks_mut(kind);
        if stacks.is_full() {
            return false;
        }
        stacks.push(StatusStack {
            applied_at: now,
            expires_at: now.saturating_add(duration),
        });
        if kind == StatusKind::Emp {
            self.shield_regen_disabled = true;
        }
        true
    }

    /// Removes every stack whose window has closed at `now` and recomputes the
    /// shield-regen flag. Returns the number of stacks removed.
    pub fn remove_expired(&mut self, now: Millis) -> usize {
        let mut removed = 0;
        for stacks in [&mut self.burn, &mut self.viral, &mut self.emp, &mut self.lag] {
            let before = stacks.len();
            stacks.retain(|s| s.expires_at > now);
            removed += before - stacks.len();
        }
        self.shield_regen_disabled = !self.emp.is_empty();
        removed
    }

    /// Iterates the stacks of one kind.
    pub fn iter(&self, kind: StatusKind) -> impl Iterator<Item = &StatusStack> {
        self.stacks(kind).iter()
    }

    /// Compact counts for update payloads.
    pub fn summary(&self) -> StatusSummary {
        StatusSummary {
            burn: self.burn.len() as u8,
            viral: self.viral.len() as u8,
            emp: self.emp.len() as u8,
            lag: self.lag.len() as u8,
            shield_regen_disabled: self.shield_regen_disabled,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.burn.is_empty() && self.viral.is_empty() && self.emp.is_empty() && self.lag.is_empty()
    }
}

/// Stack counts per kind, as reported to observers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusSummary {
    pub burn: u8,
    pub viral: u8,
    pub emp: u8,
    pub lag: u8,
    pub shield_regen_disabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn stacks_beyond_cap_are_dropped() {
        let mut status = StatusStacks::empty();
        for kind in StatusKind::iter() {
            for i in 0..BattleConfig::MAX_STACKS {
                assert!(status.add(kind, i as Millis, 1_000));
            }
            assert!(!status.add(kind, 99, 1_000));
            assert_eq!(status.count(kind), BattleConfig::MAX_STACKS);
        }
    }

    #[test]
    fn each_stack_expires_on_its_own_schedule() {
        let mut status = StatusStacks::empty();
        status.add(StatusKind::Burn, 0, 4_000);
        status.add(StatusKind::Burn, 1_000, 4_000);

        assert_eq!(status.remove_expired(3_999), 0);
        assert_eq!(status.remove_expired(4_000), 1);
        assert_eq!(status.count(StatusKind::Burn), 1);
        assert_eq!(status.remove_expired(5_000), 1);
        assert!(status.is_empty());
    }

    #[test]
    fn emp_controls_shield_regen_flag() {
        let mut status = StatusStacks::empty();
        status.add(StatusKind::Emp, 0, 5_000);
        assert!(status.shield_regen_disabled);

        status.remove_expired(4_999);
        assert!(status.shield_regen_disabled);

        status.remove_expired(5_000);
        assert!(!status.shield_regen_disabled);
    }

    #[test]
    fn kinds_parse_from_snake_case() {
        assert_eq!("emp".parse::<StatusKind>().ok(), Some(StatusKind::Emp));
        assert_eq!(StatusKind::Lag.as_ref(), "lag");
    }
}
