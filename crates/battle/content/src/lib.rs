//! Data-driven battle content.
//!
//! This crate houses construct baselines and rule-program specs, and builds
//! the resolved values `battle-core` consumes:
//! - Construct catalog (data-driven via RON)
//! - Rule-program specs (data-driven via RON)
//! - Player progress and upgrade bonuses (data-driven via RON)
//! - Battle tuning (data-driven via TOML)
//!
//! The engine never sees ids; [`ProgramBuilder`] resolves every spec against
//! the trigger and action catalogs before a battle starts.

pub mod builder;
pub mod construct;
pub mod program;
pub mod progression;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use builder::{BuildError, ProgramBuilder};
pub use construct::{ConstructCatalog, ConstructSpec, ShieldSpec};
pub use program::{ProgramSpec, ProtocolSpec};
pub use progression::{PlayerProgress, ProgressionBonus};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, ProgramLoader, ProgressLoader};
