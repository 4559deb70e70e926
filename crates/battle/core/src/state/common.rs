use std::fmt;

use crate::config::BattleConfig;

/// Which combatant a piece of state belongs to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// Both sides in evaluation order (player acts first each tick).
    pub const BOTH: [Side; 2] = [Side::Player, Side::Enemy];

    pub const fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    /// Horizontal travel direction of projectiles fired by this side.
    pub const fn facing(self) -> i32 {
        match self {
            Side::Player => 1,
            Side::Enemy => -1,
        }
    }

    /// Inclusive column range this side is allowed to stand on.
    pub const fn columns(self) -> (i32, i32) {
        let half = BattleConfig::GRID_WIDTH / 2;
        match self {
            Side::Player => (0, half - 1),
            Side::Enemy => (half, BattleConfig::GRID_WIDTH - 1),
        }
    }

    pub const fn is_player(self) -> bool {
        matches!(self, Side::Player)
    }
}

/// Discrete grid position expressed in tile coordinates.
///
/// The battle grid is `GRID_WIDTH` columns by `GRID_HEIGHT` rows. Columns
/// 0–2 belong to the player and 3–5 to the enemy; the type itself does not
/// enforce the split.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true if the position lies on the battle grid.
    pub const fn in_bounds(self) -> bool {
        self.x >= 0
            && self.x < BattleConfig::GRID_WIDTH
            && self.y >= 0
            && self.y < BattleConfig::GRID_HEIGHT
    }

    /// Returns true if the position lies on the given side's half.
    pub const fn on_side(self, side: Side) -> bool {
        let (min_x, max_x) = side.columns();
        self.in_bounds() && self.x >= min_x && self.x <= max_x
    }

    /// Clamp into the given side's half of the grid.
    pub fn clamp_to(self, side: Side) -> Self {
        let (min_x, max_x) = side.columns();
        Self {
            x: self.x.clamp(min_x, max_x),
            y: self.y.clamp(0, BattleConfig::GRID_HEIGHT - 1),
        }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Column distance between two positions.
    pub fn column_distance(self, other: Position) -> i32 {
        (self.x - other.x).abs()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Simulated battle time in milliseconds.
pub type Millis = u64;

/// Bounded resource meter (HP, shields, armor).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meter {
    pub current: f32,
    pub maximum: f32,
}

impl Meter {
    pub fn new(current: f32, maximum: f32) -> Self {
        Self { current, maximum }
    }

    pub fn full(maximum: f32) -> Self {
        Self::new(maximum, maximum)
    }

    /// Current value as a fraction of the maximum (0 when maximum is 0).
    pub fn ratio(&self) -> f32 {
        if self.maximum <= 0.0 {
            0.0
        } else {
            self.current / self.maximum
        }
    }

    /// Subtract `amount`, never dropping below zero. Returns the amount removed.
    pub fn drain(&mut self, amount: f32) -> f32 {
        let removed = amount.max(0.0).min(self.current);
        self.current -= removed;
        removed
    }

    /// Add `amount`, never exceeding the maximum. Returns the amount restored.
    pub fn restore(&mut self, amount: f32) -> f32 {
        let headroom = (self.maximum - self.current).max(0.0);
        let restored = amount.max(0.0).min(headroom);
        self.current += restored;
        restored
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }
}
