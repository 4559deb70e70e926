//! Trigger predicates over a [`BattleContext`].
//!
//! Conditions are plain data so programs can be declared in content files
//! and composed with `And`/`Or`/`Not` without closures.

mod catalog;

pub use catalog::TriggerCatalog;

use crate::action::BattleContext;

/// Boolean condition evaluated against a context snapshot.
///
/// HP thresholds are fractions of maximum HP (`0.5` = 50%). Rows grow
/// downward, so "above" means a smaller row index.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TriggerCondition {
    Always,
    HpBelow(f32),
    HpAbove(f32),
    EnemyHpBelow(f32),
    SameRow,
    DifferentRow,
    EnemyAbove,
    EnemyBelow,
    /// Column distance within `min..=max`.
    Distance { min: i32, max: i32 },
    JustTookDamage,
    And(Vec<TriggerCondition>),
    Or(Vec<TriggerCondition>),
    Not(Box<TriggerCondition>),
}

impl TriggerCondition {
    pub fn evaluate(&self, ctx: &BattleContext) -> bool {
        match self {
            TriggerCondition::Always => true,
            TriggerCondition::HpBelow(threshold) => ctx.own_hp_ratio() < *threshold,
            TriggerCondition::HpAbove(threshold) => ctx.own_hp_ratio() > *threshold,
            TriggerCondition::EnemyHpBelow(threshold) => ctx.enemy_hp_ratio() < *threshold,
            TriggerCondition::SameRow => ctx.row_offset() == 0,
            TriggerCondition::DifferentRow => ctx.row_offset() != 0,
            TriggerCondition::EnemyAbove => ctx.row_offset() < 0,
            TriggerCondition::EnemyBelow => ctx.row_offset() > 0,
            TriggerCondition::Distance { min, max } => {
                (*min..=*max).contains(&ctx.column_distance())
            }
            TriggerCondition::JustTookDamage => ctx.just_took_damage,
            TriggerCondition::And(all) => all.iter().all(|c| c.evaluate(ctx)),
            TriggerCondition::Or(any) => any.iter().any(|c| c.evaluate(ctx)),
            TriggerCondition::Not(inner) => !inner.evaluate(ctx),
        }
    }
}

/// Named trigger definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trigger {
    pub id: String,
    pub name: String,
    pub description: String,
    pub condition: TriggerCondition,
}

impl Trigger {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        condition: TriggerCondition,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            condition,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn evaluate(&self, ctx: &BattleContext) -> bool {
        self.condition.evaluate(ctx)
    }
}
