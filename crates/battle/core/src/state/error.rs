use crate::state::{Position, Side};

/// Errors surfaced while validating an initial battle state.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitializationError {
    #[error("{side} starts at {position}, outside its half of the grid")]
    PositionOutOfHalf { side: Side, position: Position },

    #[error("{side} has non-positive or non-finite max HP {max_hp}")]
    InvalidMaxHp { side: Side, max_hp: f32 },

    #[error("{side} starts with HP {current} outside 0..={maximum}")]
    HpOutOfRange {
        side: Side,
        current: f32,
        maximum: f32,
    },

    #[error("{side} starts already defeated")]
    AlreadyDefeated { side: Side },

    #[error("additional enemy at {position} overlaps another combatant or leaves the enemy half")]
    InvalidOccupant { position: Position },

    #[error("projectile {id} has non-finite position {x}")]
    InvalidProjectile { id: u32, x: f32 },
}
