//! Host-provided collaborators of the simulation.
//!
//! The engine is pure apart from randomness; the random source is the only
//! environment dependency and is injected through [`BattleRng`].

mod rng;

pub use rng::{BattleRng, PcgRng, ScriptedRng};
