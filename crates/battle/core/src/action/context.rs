use crate::state::{BattleState, Millis, Position, Side};

/// Read-only view of the battle from one combatant's seat.
///
/// Built by the engine right before a side evaluates its program. Triggers
/// and actions only ever see this snapshot, never the mutable state.
#[derive(Clone, Debug, PartialEq)]
pub struct BattleContext {
    pub side: Side,
    pub time_ms: Millis,
    pub own_position: Position,
    pub enemy_position: Position,
    pub own_hp: f32,
    pub own_max_hp: f32,
    pub enemy_hp: f32,
    pub enemy_max_hp: f32,
    pub own_shields: f32,
    pub just_took_damage: bool,
    /// Tiles held by other active enemies.
    pub other_enemies: Vec<Position>,
}

impl BattleContext {
    pub fn capture(state: &BattleState, side: Side, just_took_damage: bool) -> Self {
        let own = state.fighter(side);
        let enemy = state.fighter(side.opponent());
        Self {
            side,
            time_ms: state.time_ms,
            own_position: own.position,
            enemy_position: enemy.position,
            own_hp: own.hp.current,
            own_max_hp: own.hp.maximum,
            enemy_hp: enemy.hp.current,
            enemy_max_hp: enemy.hp.maximum,
            own_shields: own.shield_points(),
            just_took_damage,
            other_enemies: state.other_enemies.clone(),
        }
    }

    pub fn own_hp_ratio(&self) -> f32 {
        ratio(self.own_hp, self.own_max_hp)
    }

    pub fn enemy_hp_ratio(&self) -> f32 {
        ratio(self.enemy_hp, self.enemy_max_hp)
    }

    pub fn column_distance(&self) -> i32 {
        self.own_position.column_distance(self.enemy_position)
    }

    /// Row offset of the opponent: negative means above (lower row index).
    pub fn row_offset(&self) -> i32 {
        self.enemy_position.y - self.own_position.y
    }

    /// True if `position` is held by the opponent or another active enemy.
    pub fn is_occupied(&self, position: Position) -> bool {
        position == self.enemy_position || self.other_enemies.contains(&position)
    }
}

fn ratio(current: f32, maximum: f32) -> f32 {
    if maximum <= 0.0 {
        0.0
    } else {
        current / maximum
    }
}
