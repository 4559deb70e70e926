//! Damage & defense model.
//!
//! Pure functions over fighter state. Nothing here schedules or remembers;
//! the engine decides *when* a hit resolves, this module decides *what* it
//! does.
//!
//! # Core Functions
//!
//! - `resolve_hit`: full hit pipeline (status → multipliers → armor → shields → HP)
//! - `apply_burn`: Burn tick damage straight to HP
//! - `type_multiplier`: per-damage-type layer interactions
//! - `armor_mitigation`: diminishing-returns armor curve

pub mod damage;
pub mod hit;

pub use damage::{DamageType, armor_mitigation, type_multiplier};
pub use hit::{AppliedStatus, Hit, HitDelivery, HitReport, apply_burn, resolve_hit};
