//! Constructors for families of similarly shaped actions.

use super::{Action, ActionKind};
use crate::combat::DamageType;
use crate::state::Millis;

impl Action {
    /// Single straight projectile.
    pub fn shoot(
        id: &str,
        name: &str,
        damage: f32,
        damage_type: DamageType,
        status_chance: f32,
        cooldown_ms: Millis,
    ) -> Self {
        Action::new(
            id,
            name,
            ActionKind::Shoot {
                damage,
                status_chance,
            },
        )
        .with_damage_type(damage_type)
        .with_cooldown(cooldown_ms)
    }

    /// Burst of `count` projectiles, `interval_ms` apart.
    pub fn rapid_fire(
        id: &str,
        name: &str,
        damage: f32,
        damage_type: DamageType,
        count: u32,
        interval_ms: Millis,
        cooldown_ms: Millis,
    ) -> Self {
        Action::new(
            id,
            name,
            ActionKind::RapidFire {
                damage,
                status_chance: 0.0,
                count,
                interval_ms,
            },
        )
        .with_damage_type(damage_type)
        .with_cooldown(cooldown_ms)
    }

    /// Instant row attack covering `spread` rows either side.
    pub fn wave(
        id: &str,
        name: &str,
        damage: f32,
        damage_type: DamageType,
        spread: i32,
        cooldown_ms: Millis,
    ) -> Self {
        Action::new(
            id,
            name,
            ActionKind::Wave {
                damage,
                status_chance: 0.0,
                spread,
            },
        )
        .with_damage_type(damage_type)
        .with_cooldown(cooldown_ms)
    }

    /// Delayed strike on the opponent's current tile.
    pub fn bomb(
        id: &str,
        name: &str,
        damage: f32,
        damage_type: DamageType,
        delay_ms: Millis,
        cooldown_ms: Millis,
    ) -> Self {
        Action::new(id, name, ActionKind::Bomb { damage, delay_ms })
            .with_damage_type(damage_type)
            .with_cooldown(cooldown_ms)
    }

    /// Damage pulse on the opponent's row every `tick_ms`, `ticks` times.
    pub fn field(
        id: &str,
        name: &str,
        damage_per_tick: f32,
        damage_type: DamageType,
        tick_ms: Millis,
        ticks: u32,
        cooldown_ms: Millis,
    ) -> Self {
        Action::new(
            id,
            name,
            ActionKind::Field {
                damage_per_tick,
                tick_ms,
                ticks,
            },
        )
        .with_damage_type(damage_type)
        .with_cooldown(cooldown_ms)
    }

    pub fn heal(id: &str, name: &str, amount: f32, cooldown_ms: Millis) -> Self {
        Action::new(id, name, ActionKind::Heal { amount }).with_cooldown(cooldown_ms)
    }

    /// Sets the status chance on kinds that carry one.
    pub fn with_status_chance(mut self, chance: f32) -> Self {
        match &mut self.kind {
            ActionKind::Shoot { status_chance, .. }
            | ActionKind::Homing { status_chance, .. }
            | ActionKind::Piercing { status_chance, .. }
            | ActionKind::RapidFire { status_chance, .. }
            | ActionKind::Wave { status_chance, .. }
            | ActionKind::TripleShot { status_chance, .. } => *status_chance = chance,
            _ => {}
        }
        self
    }
}
