use crate::combat::DamageType;
use crate::config::BattleConfig;
use crate::state::Side;

/// Unique identifier for a projectile within one battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectileId(pub u32);

/// How a projectile behaves in flight and on impact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ProjectileFlavor {
    #[default]
    Standard,
    /// Steers one row per reference frame toward the target's row.
    Homing,
    /// Rail round; resolves like a standard projectile.
    Piercing,
}

/// Transient projectile travelling toward the opposing side.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Projectile {
    pub id: ProjectileId,
    pub owner: Side,
    /// Horizontal position in grid units (fractional while in flight).
    pub x: f32,
    pub row: i32,
    /// +1 travels toward the enemy half, -1 toward the player half.
    pub direction: i32,
    pub damage: f32,
    pub damage_type: DamageType,
    /// Probability in `0.0..=1.0` that the damage type's status lands on hit.
    pub status_chance: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flavor: ProjectileFlavor,
}

impl Projectile {
    /// Returns true once the projectile has left the horizontal grid range.
    pub fn out_of_bounds(&self) -> bool {
        self.x < 0.0 || self.x > (BattleConfig::GRID_WIDTH - 1) as f32
    }

    /// Side this projectile can hit.
    pub fn target(&self) -> Side {
        self.owner.opponent()
    }
}
