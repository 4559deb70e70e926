use super::movement::{self, MoveRule};
use super::{ActionResult, BattleContext, RowSpan};
use crate::combat::DamageType;
use crate::env::BattleRng;
use crate::state::{BuffStat, Millis};

/// Parameterized behaviour of an action.
///
/// The damage type lives on the owning [`Action`](super::Action); every other
/// number an action needs is carried here.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ActionKind {
    Shoot {
        damage: f32,
        status_chance: f32,
    },
    Homing {
        damage: f32,
        status_chance: f32,
    },
    Piercing {
        damage: f32,
        status_chance: f32,
    },
    RapidFire {
        damage: f32,
        status_chance: f32,
        count: u32,
        interval_ms: Millis,
    },
    /// Instant damage across the opponent's row, widened by `spread` rows.
    Wave {
        damage: f32,
        status_chance: f32,
        spread: i32,
    },
    Bomb {
        damage: f32,
        delay_ms: Millis,
    },
    Cluster {
        damage: f32,
        delay_ms: Millis,
        count: u32,
        interval_ms: Millis,
    },
    Field {
        damage_per_tick: f32,
        tick_ms: Millis,
        ticks: u32,
    },
    Melee {
        damage: f32,
        range: i32,
    },
    WideMelee {
        damage: f32,
        range: i32,
    },
    TripleShot {
        damage: f32,
        status_chance: f32,
    },
    Dash {
        damage: f32,
    },
    Retreat {
        damage: f32,
    },
    Drain {
        damage: f32,
        heal_ratio: f32,
    },
    Move {
        rule: MoveRule,
    },
    Heal {
        amount: f32,
    },
    HealOverTime {
        amount_per_tick: f32,
        tick_ms: Millis,
        ticks: u32,
    },
    Barrier {
        duration_ms: Millis,
    },
    Shield {
        amount: f32,
        duration_ms: Millis,
    },
    Counter {
        ratio: f32,
        duration_ms: Millis,
    },
    Invincible {
        duration_ms: Millis,
    },
    Buff {
        stat: BuffStat,
        multiplier: f32,
        duration_ms: Millis,
    },
}

impl ActionKind {
    /// Resolves this behaviour against a context snapshot.
    ///
    /// Only `Move { rule: Dodge }` consumes randomness.
    pub fn execute(
        &self,
        damage_type: DamageType,
        ctx: &BattleContext,
        rng: &mut dyn BattleRng,
    ) -> ActionResult {
        match *self {
            ActionKind::Shoot {
                damage,
                status_chance,
            } => ActionResult::Shoot {
                damage,
                damage_type,
                status_chance,
            },
            ActionKind::Homing {
                damage,
                status_chance,
            } => ActionResult::Homing {
                damage,
                damage_type,
                status_chance,
            },
            ActionKind::Piercing {
                damage,
                status_chance,
            } => ActionResult::Piercing {
                damage,
                damage_type,
                status_chance,
            },
            ActionKind::RapidFire {
                damage,
                status_chance,
                count,
                interval_ms,
            } => ActionResult::RapidFire {
                damage,
                damage_type,
                status_chance,
                count,
                interval_ms,
            },
            ActionKind::Wave {
                damage,
                status_chance,
                spread,
            } => ActionResult::Wave {
                damage,
                damage_type,
                status_chance,
                rows: RowSpan::around(ctx.own_position.y, spread),
            },
            ActionKind::Bomb { damage, delay_ms } => ActionResult::Bomb {
                damage,
                damage_type,
                target: ctx.enemy_position,
                delay_ms,
            },
            ActionKind::Cluster {
                damage,
                delay_ms,
                count,
                interval_ms,
            } => ActionResult::Cluster {
                damage,
                damage_type,
                target: ctx.enemy_position,
                delay_ms,
                count,
                interval_ms,
            },
            ActionKind::Field {
                damage_per_tick,
                tick_ms,
                ticks,
            } => ActionResult::Field {
                damage_per_tick,
                damage_type,
                row: ctx.enemy_position.y,
                tick_ms,
                ticks,
            },
            ActionKind::Melee { damage, range } => ActionResult::Melee {
                damage,
                damage_type,
                range,
            },
            ActionKind::WideMelee { damage, range } => ActionResult::WideMelee {
                damage,
                damage_type,
                range,
            },
            ActionKind::TripleShot {
                damage,
                status_chance,
            } => ActionResult::TripleShot {
                damage,
                damage_type,
                status_chance,
            },
            ActionKind::Dash { damage } => ActionResult::Dash {
                to: movement::front_line(ctx),
                damage,
                damage_type,
            },
            ActionKind::Retreat { damage } => ActionResult::Retreat {
                to: movement::back_line(ctx),
                damage,
                damage_type,
            },
            ActionKind::Drain { damage, heal_ratio } => ActionResult::Drain {
                damage,
                damage_type,
                heal_ratio,
            },
            ActionKind::Move { rule } => ActionResult::Move {
                to: rule.destination(ctx, rng),
            },
            ActionKind::Heal { amount } => ActionResult::Heal { amount },
            ActionKind::HealOverTime {
                amount_per_tick,
                tick_ms,
                ticks,
            } => ActionResult::HealOverTime {
                amount_per_tick,
                tick_ms,
                ticks,
            },
            ActionKind::Barrier { duration_ms } => ActionResult::Barrier { duration_ms },
            ActionKind::Shield {
                amount,
                duration_ms,
            } => ActionResult::Shield {
                amount,
                duration_ms,
            },
            ActionKind::Counter { ratio, duration_ms } => {
                ActionResult::Counter { ratio, duration_ms }
            }
            ActionKind::Invincible { duration_ms } => ActionResult::Invincible { duration_ms },
            ActionKind::Buff {
                stat,
                multiplier,
                duration_ms,
            } => ActionResult::Buff {
                stat,
                multiplier,
                duration_ms,
            },
        }
    }

    /// Mutable access to the outgoing damage figure, if this kind deals damage.
    pub(crate) fn damage_mut(&mut self) -> Option<&mut f32> {
        match self {
            ActionKind::Shoot { damage, .. }
            | ActionKind::Homing { damage, .. }
            | ActionKind::Piercing { damage, .. }
            | ActionKind::RapidFire { damage, .. }
            | ActionKind::Wave { damage, .. }
            | ActionKind::Bomb { damage, .. }
            | ActionKind::Cluster { damage, .. }
            | ActionKind::Melee { damage, .. }
            | ActionKind::WideMelee { damage, .. }
            | ActionKind::TripleShot { damage, .. }
            | ActionKind::Dash { damage }
            | ActionKind::Retreat { damage }
            | ActionKind::Drain { damage, .. } => Some(damage),
            ActionKind::Field {
                damage_per_tick, ..
            } => Some(damage_per_tick),
            ActionKind::Move { .. }
            | ActionKind::Heal { .. }
            | ActionKind::HealOverTime { .. }
            | ActionKind::Barrier { .. }
            | ActionKind::Shield { .. }
            | ActionKind::Counter { .. }
            | ActionKind::Invincible { .. }
            | ActionKind::Buff { .. } => None,
        }
    }

    /// Outgoing damage figure, if this kind deals damage.
    pub fn damage(&self) -> Option<f32> {
        match *self {
            ActionKind::Shoot { damage, .. }
            | ActionKind::Homing { damage, .. }
            | ActionKind::Piercing { damage, .. }
            | ActionKind::RapidFire { damage, .. }
            | ActionKind::Wave { damage, .. }
            | ActionKind::Bomb { damage, .. }
            | ActionKind::Cluster { damage, .. }
            | ActionKind::Melee { damage, .. }
            | ActionKind::WideMelee { damage, .. }
            | ActionKind::TripleShot { damage, .. }
            | ActionKind::Dash { damage }
            | ActionKind::Retreat { damage }
            | ActionKind::Drain { damage, .. } => Some(damage),
            ActionKind::Field {
                damage_per_tick, ..
            } => Some(damage_per_tick),
            _ => None,
        }
    }

    pub fn is_movement(&self) -> bool {
        matches!(self, ActionKind::Move { .. })
    }
}
