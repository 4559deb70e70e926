use crate::combat::DamageType;
use crate::config::BattleConfig;
use crate::state::{BuffStat, Millis, Position};

/// Inclusive range of rows covered by a wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowSpan {
    pub first: i32,
    pub last: i32,
}

impl RowSpan {
    /// Rows within `radius` of `center`, clipped to the grid.
    pub fn around(center: i32, radius: i32) -> Self {
        Self {
            first: (center - radius).max(0),
            last: (center + radius).min(BattleConfig::GRID_HEIGHT - 1),
        }
    }

    pub fn contains(&self, row: i32) -> bool {
        (self.first..=self.last).contains(&row)
    }
}

/// Descriptor of what an action wants to happen.
///
/// Produced by [`Action::execute`](super::Action::execute) and applied by the
/// engine. Each variant carries exactly the data its effect needs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum ActionResult {
    Shoot {
        damage: f32,
        damage_type: DamageType,
        status_chance: f32,
    },
    Homing {
        damage: f32,
        damage_type: DamageType,
        status_chance: f32,
    },
    Piercing {
        damage: f32,
        damage_type: DamageType,
        status_chance: f32,
    },
    RapidFire {
        damage: f32,
        damage_type: DamageType,
        status_chance: f32,
        count: u32,
        interval_ms: Millis,
    },
    Wave {
        damage: f32,
        damage_type: DamageType,
        status_chance: f32,
        rows: RowSpan,
    },
    Bomb {
        damage: f32,
        damage_type: DamageType,
        target: Position,
        delay_ms: Millis,
    },
    Cluster {
        damage: f32,
        damage_type: DamageType,
        target: Position,
        delay_ms: Millis,
        count: u32,
        interval_ms: Millis,
    },
    Field {
        damage_per_tick: f32,
        damage_type: DamageType,
        row: i32,
        tick_ms: Millis,
        ticks: u32,
    },
    Melee {
        damage: f32,
        damage_type: DamageType,
        range: i32,
    },
    WideMelee {
        damage: f32,
        damage_type: DamageType,
        range: i32,
    },
    TripleShot {
        damage: f32,
        damage_type: DamageType,
        status_chance: f32,
    },
    Dash {
        to: Position,
        damage: f32,
        damage_type: DamageType,
    },
    Retreat {
        to: Position,
        damage: f32,
        damage_type: DamageType,
    },
    Drain {
        damage: f32,
        damage_type: DamageType,
        heal_ratio: f32,
    },
    Move {
        to: Position,
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

impl ActionResult {
    /// Short tag used in logs and events.
    pub fn label(&self) -> &'static str {
        match self {
            ActionResult::Shoot { .. } => "shoot",
            ActionResult::Homing { .. } => "homing",
            ActionResult::Piercing { .. } => "piercing",
            ActionResult::RapidFire { .. } => "rapid_fire",
            ActionResult::Wave { .. } => "wave",
            ActionResult::Bomb { .. } => "bomb",
            ActionResult::Cluster { .. } => "cluster",
            ActionResult::Field { .. } => "field",
            ActionResult::Melee { .. } => "melee",
            ActionResult::WideMelee { .. } => "wide_melee",
            ActionResult::TripleShot { .. } => "triple_shot",
            ActionResult::Dash { .. } => "dash",
            ActionResult::Retreat { .. } => "retreat",
            ActionResult::Drain { .. } => "drain",
            ActionResult::Move { .. } => "move",
            ActionResult::Heal { .. } => "heal",
            ActionResult::HealOverTime { .. } => "heal_over_time",
            ActionResult::Barrier { .. } => "barrier",
            ActionResult::Shield { .. } => "shield",
            ActionResult::Counter { .. } => "counter",
            ActionResult::Invincible { .. } => "invincible",
            ActionResult::Buff { .. } => "buff",
        }
    }
}
