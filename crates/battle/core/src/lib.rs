//! Deterministic construct battle simulation.
//!
//! `battle-core` defines the canonical combat rules (damage model, status
//! stacks, actions, triggers, rule programs) and the tick-driven
//! [`engine::BattleEngine`] that owns one battle. It performs no I/O; hosts
//! load content elsewhere and hand the engine fully resolved programs.
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod program;
pub mod state;
pub mod trigger;

pub use action::{
    Action, ActionCatalog, ActionKind, ActionResult, BattleContext, Bonus, CoreType, DamageBonus,
    MoveRule, RowSpan,
};
pub use combat::{AppliedStatus, DamageType, Hit, HitDelivery, HitReport};
pub use config::{BattleConfig, StatusTuning};
pub use engine::{
    BattleEngine, BattleEvent, BattleResult, BattleUpdate, Cooldowns, SideUpdate, UpdateFields,
};
pub use env::{BattleRng, PcgRng, ScriptedRng};
pub use program::{Protocol, RuleProgram};
pub use state::{
    Armor, BattleOutcome, BattleState, Buff, BuffStat, CosmeticLoadout, CounterWindow, Defenses,
    Fighter, HistorySample, InitialState, InitializationError, Meter, Millis, Overshield, Position,
    Projectile, ProjectileFlavor, ProjectileId, Resistances, Shields, Side, StatusKind,
    StatusStack, StatusStacks, StatusSummary,
};
pub use trigger::{Trigger, TriggerCatalog, TriggerCondition};
