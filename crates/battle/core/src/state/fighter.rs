//! Combatant state: health, defensive layers, resistances and timed effects.

use std::collections::BTreeMap;

use crate::combat::DamageType;
use crate::state::{Meter, Millis, Position, StatusStacks};

/// Regenerating shield layer. Absorbs damage 1:1 before HP.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shields {
    pub meter: Meter,
    /// Points regenerated per second once the delay has elapsed.
    pub regen_per_sec: f32,
    /// Quiet period after taking damage before regeneration resumes.
    pub regen_delay_ms: Millis,
    pub last_damage_at: Option<Millis>,
}

impl Shields {
    pub fn new(maximum: f32) -> Self {
        Self {
            meter: Meter::full(maximum),
            regen_per_sec: 0.0,
            regen_delay_ms: 0,
            last_damage_at: None,
        }
    }

    pub fn with_regen(mut self, regen_per_sec: f32, regen_delay_ms: Millis) -> Self {
        self.regen_per_sec = regen_per_sec;
        self.regen_delay_ms = regen_delay_ms;
        self
    }

    /// Regenerate for `delta_ms` if the post-damage delay has elapsed.
    pub fn regenerate(&mut self, now: Millis, delta_ms: Millis) -> f32 {
        if self.regen_per_sec <= 0.0 {
            return 0.0;
        }
        let quiet = match self.last_damage_at {
            Some(at) => now.saturating_sub(at) >= self.regen_delay_ms,
            None => true,
        };
        if !quiet {
            return 0.0;
        }
        self.meter
            .restore(self.regen_per_sec * delta_ms as f32 / 1_000.0)
    }
}

/// Armor layer. Mitigates a share of every hit while above zero.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Armor {
    pub meter: Meter,
}

impl Armor {
    pub fn new(maximum: f32) -> Self {
        Self {
            meter: Meter::full(maximum),
        }
    }
}

/// Per-damage-type resistance fractions. Missing entries resist nothing.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resistances(BTreeMap<DamageType, f32>);

impl Resistances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, damage_type: DamageType, fraction: f32) -> Self {
        self.0.insert(damage_type, fraction);
        self
    }

    /// Resistance to `damage_type`, clamped to `0.0..=1.0`.
    pub fn get(&self, damage_type: DamageType) -> f32 {
        self.0
            .get(&damage_type)
            .copied()
            .unwrap_or(0.0)
            .clamp(0.0, 1.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(DamageType, f32)> for Resistances {
    fn from_iter<I: IntoIterator<Item = (DamageType, f32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ============================================================================
// Timed defenses and buffs
// ============================================================================

/// Temporary absorb pool granted by the shield-boost action.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Overshield {
    pub points: f32,
    pub expires_at: Millis,
}

/// Reflect window granted by the counter action.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CounterWindow {
    pub ratio: f32,
    pub expires_at: Millis,
}

/// Time-boxed defensive abilities currently up on a fighter.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Defenses {
    /// Projectiles are deflected entirely until this time.
    pub barrier_until: Option<Millis>,
    pub overshield: Option<Overshield>,
    pub counter: Option<CounterWindow>,
    /// Immune to damage and status until this time.
    pub invincible_until: Option<Millis>,
}

impl Defenses {
    pub fn barrier_active(&self, now: Millis) -> bool {
        self.barrier_until.is_some_and(|until| now < until)
    }

    pub fn invincible(&self, now: Millis) -> bool {
        self.invincible_until.is_some_and(|until| now < until)
    }

    pub fn counter_ratio(&self, now: Millis) -> Option<f32> {
        self.counter
            .filter(|c| now < c.expires_at)
            .map(|c| c.ratio)
    }

    /// Drops every defense whose window has closed. Returns true if anything
    /// was removed.
    pub fn remove_expired(&mut self, now: Millis) -> bool {
        let before = *self;
        if self.barrier_until.is_some_and(|until| now >= until) {
            self.barrier_until = None;
        }
        if self.invincible_until.is_some_and(|until| now >= until) {
            self.invincible_until = None;
        }
        if self
            .overshield
            .is_some_and(|o| now >= o.expires_at || o.points <= 0.0)
        {
            self.overshield = None;
        }
        if self.counter.is_some_and(|c| now >= c.expires_at) {
            self.counter = None;
        }
        before != *self
    }
}

/// Statistic a buff scales.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BuffStat {
    /// Outgoing damage of actions fired while active.
    Damage,
    /// Cooldowns applied while active.
    Cooldown,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Buff {
    pub stat: BuffStat,
    pub multiplier: f32,
    pub expires_at: Millis,
}

/// Fighter state tracked by the engine for one combatant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fighter {
    pub position: Position,
    pub hp: Meter,
    pub shields: Option<Shields>,
    pub armor: Option<Armor>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resistances: Resistances,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: StatusStacks,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status_immune: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defenses: Defenses,
    #[cfg_attr(feature = "serde", serde(default))]
    pub buffs: Vec<Buff>,
}

impl Fighter {
    /// Creates a fighter at full health with no defensive layers.
    pub fn new(position: Position, max_hp: f32) -> Self {
        Self {
            position,
            hp: Meter::full(max_hp),
            shields: None,
            armor: None,
            resistances: Resistances::default(),
            status: StatusStacks::empty(),
            status_immune: false,
            defenses: Defenses::default(),
            buffs: Vec::new(),
        }
    }

    pub fn with_hp(mut self, current: f32) -> Self {
        self.hp.current = current;
        self
    }

    pub fn with_shields(mut self, shields: Shields) -> Self {
        self.shields = Some(shields);
        self
    }

    pub fn with_armor(mut self, armor: Armor) -> Self {
        self.armor = Some(armor);
        self
    }

    pub fn with_resistances(mut self, resistances: Resistances) -> Self {
        self.resistances = resistances;
        self
    }

    pub fn with_status(mut self, status: StatusStacks) -> Self {
        self.status = status;
        self
    }

    pub fn with_status_immunity(mut self, immune: bool) -> Self {
        self.status_immune = immune;
        self
    }

    pub fn shield_points(&self) -> f32 {
        self.shields.map_or(0.0, |s| s.meter.current)
    }

    pub fn armor_points(&self) -> f32 {
        self.armor.map_or(0.0, |a| a.meter.current)
    }

    pub fn is_defeated(&self) -> bool {
        self.hp.is_empty()
    }

    /// Product of all active damage buffs.
    pub fn damage_multiplier(&self, now: Millis) -> f32 {
        self.buff_product(BuffStat::Damage, now)
    }

    /// Product of all active cooldown buffs.
    pub fn cooldown_multiplier(&self, now: Millis) -> f32 {
        self.buff_product(BuffStat::Cooldown, now)
    }

    fn buff_product(&self, stat: BuffStat, now: Millis) -> f32 {
        self.buffs
            .iter()
            .filter(|b| b.stat == stat && now < b.expires_at)
            .map(|b| b.multiplier)
            .product()
    }

    /// Drops buffs whose window has closed. Returns true if any were removed.
    pub fn remove_expired_buffs(&mut self, now: Millis) -> bool {
        let before = self.buffs.len();
        self.buffs.retain(|b| now < b.expires_at);
        before != self.buffs.len()
    }

    /// Records that a defensive layer or HP took damage at `now`.
    pub fn mark_damaged(&mut self, now: Millis) {
        if let Some(shields) = self.shields.as_mut() {
            shields.last_damage_at = Some(now);
        }
    }
}
