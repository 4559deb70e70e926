//! Battle state: the data the engine owns and mutates each tick.
//!
//! [`InitialState`] is what a caller supplies when setting up a battle;
//! [`BattleState`] is the full snapshot the engine maintains and exposes
//! through `BattleEngine::state`.

mod common;
mod error;
mod fighter;
mod projectile;
mod status;

pub use common::{Meter, Millis, Position, Side};
pub use error::InitializationError;
pub use fighter::{
    Armor, Buff, BuffStat, CounterWindow, Defenses, Fighter, Overshield, Resistances, Shields,
};
pub use projectile::{Projectile, ProjectileFlavor, ProjectileId};
pub use status::{StatusKind, StatusStack, StatusStacks, StatusSummary};

/// Optional visual loadout carried through the battle untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CosmeticLoadout {
    pub chassis: Option<String>,
    pub paint: Option<String>,
    pub projectile_trail: Option<String>,
}

/// One HP sample of the battle history.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistorySample {
    pub time_ms: Millis,
    pub player_hp: f32,
    pub enemy_hp: f32,
}

/// Terminal result of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattleOutcome {
    PlayerWon,
    EnemyWon,
}

impl BattleOutcome {
    pub fn player_won(self) -> bool {
        matches!(self, BattleOutcome::PlayerWon)
    }
}

/// Caller-supplied starting conditions.
///
/// Fighters may arrive pre-seeded with shields, armor, status stacks and
/// buffs; projectiles already in flight are accepted as-is.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitialState {
    pub player: Fighter,
    pub enemy: Fighter,
    #[cfg_attr(feature = "serde", serde(default))]
    pub projectiles: Vec<Projectile>,
    /// Other active enemies that occupy tiles but do not act.
    #[cfg_attr(feature = "serde", serde(default))]
    pub other_enemies: Vec<Position>,
}

impl InitialState {
    pub fn new(player: Fighter, enemy: Fighter) -> Self {
        Self {
            player,
            enemy,
            projectiles: Vec::new(),
            other_enemies: Vec::new(),
        }
    }

    pub fn with_projectiles(mut self, projectiles: Vec<Projectile>) -> Self {
        self.projectiles = projectiles;
        self
    }

    pub fn with_other_enemies(mut self, positions: Vec<Position>) -> Self {
        self.other_enemies = positions;
        self
    }

    /// Checks positions and health before a battle starts.
    pub fn validate(&self) -> Result<(), InitializationError> {
        for side in Side::BOTH {
            let fighter = self.fighter(side);
            if !fighter.position.on_side(side) {
                return Err(InitializationError::PositionOutOfHalf {
                    side,
                    position: fighter.position,
                });
            }
            let hp = fighter.hp;
            if !hp.maximum.is_finite() || hp.maximum <= 0.0 {
                return Err(InitializationError::InvalidMaxHp {
                    side,
                    max_hp: hp.maximum,
                });
            }
            if !hp.current.is_finite() || hp.current > hp.maximum {
                return Err(InitializationError::HpOutOfRange {
                    side,
                    current: hp.current,
                    maximum: hp.maximum,
                });
            }
            if fighter.is_defeated() {
                return Err(InitializationError::AlreadyDefeated { side });
            }
        }

        for (index, &position) in self.other_enemies.iter().enumerate() {
            let clashes = position == self.enemy.position
                || self.other_enemies[..index].contains(&position);
            if clashes || !position.on_side(Side::Enemy) {
                return Err(InitializationError::InvalidOccupant { position });
            }
        }

        if let Some(projectile) = self.projectiles.iter().find(|p| !p.x.is_finite()) {
            return Err(InitializationError::InvalidProjectile {
                id: projectile.id.0,
                x: projectile.x,
            });
        }

        Ok(())
    }

    fn fighter(&self, side: Side) -> &Fighter {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }
}

/// Full battle snapshot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    pub time_ms: Millis,
    pub player: Fighter,
    pub enemy: Fighter,
    pub projectiles: Vec<Projectile>,
    pub other_enemies: Vec<Position>,
    pub history: Vec<HistorySample>,
    pub outcome: Option<BattleOutcome>,
    pub player_cosmetics: Option<CosmeticLoadout>,
    pub enemy_cosmetics: Option<CosmeticLoadout>,
}

impl BattleState {
    pub(crate) fn from_initial(
        initial: InitialState,
        player_cosmetics: Option<CosmeticLoadout>,
        enemy_cosmetics: Option<CosmeticLoadout>,
    ) -> Self {
        let mut state = Self {
            time_ms: 0,
            player: initial.player,
            enemy: initial.enemy,
            projectiles: initial.projectiles,
            other_enemies: initial.other_enemies,
            history: Vec::new(),
            outcome: None,
            player_cosmetics,
            enemy_cosmetics,
        };
        state.record_sample(0);
        state
    }

    pub fn fighter(&self, side: Side) -> &Fighter {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn fighter_mut(&mut self, side: Side) -> &mut Fighter {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    /// Appends an HP sample stamped `time_ms`.
    pub(crate) fn record_sample(&mut self, time_ms: Millis) {
        self.history.push(HistorySample {
            time_ms,
            player_hp: self.player.hp.current,
            enemy_hp: self.enemy.hp.current,
        });
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Tiles that `side` may not move onto.
    pub fn blocked_tiles(&self, side: Side) -> Vec<Position> {
        let mut tiles = vec![self.fighter(side.opponent()).position];
        tiles.extend(self.other_enemies.iter().copied());
        tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::DamageType;

    fn initial() -> InitialState {
        InitialState::new(
            Fighter::new(Position::new(1, 1), 100.0),
            Fighter::new(Position::new(4, 1), 100.0),
        )
    }

    #[test]
    fn accepts_fighters_on_their_halves() {
        assert!(initial().validate().is_ok());
    }

    #[test]
    fn rejects_player_on_enemy_half() {
        let mut state = initial();
        state.player.position = Position::new(3, 0);
        assert!(matches!(
            state.validate(),
            Err(InitializationError::PositionOutOfHalf {
                side: Side::Player,
                ..
            })
        ));
    }

    #[test]
    fn rejects_overlapping_other_enemies() {
        let state = initial().with_other_enemies(vec![Position::new(4, 1)]);
        assert!(matches!(
            state.validate(),
            Err(InitializationError::InvalidOccupant { .. })
        ));
    }

    #[test]
    fn rejects_hp_above_maximum() {
        let mut state = initial();
        state.enemy.hp.current = 150.0;
        assert!(matches!(
            state.validate(),
            Err(InitializationError::HpOutOfRange {
                side: Side::Enemy,
                ..
            })
        ));
    }

    #[test]
    fn rejects_non_finite_hp() {
        let mut state = initial();
        state.player.hp.maximum = f32::INFINITY;
        assert!(matches!(
            state.validate(),
            Err(InitializationError::InvalidMaxHp { .. })
        ));

        let mut state = initial();
        state.player.hp.current = f32::NAN;
        assert!(matches!(
            state.validate(),
            Err(InitializationError::HpOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_projectile_with_non_finite_position() {
        let projectile = Projectile {
            id: ProjectileId(7),
            owner: Side::Player,
            x: f32::NAN,
            row: 1,
            direction: 1,
            damage: 10.0,
            damage_type: DamageType::Kinetic,
            status_chance: 0.0,
            flavor: ProjectileFlavor::Standard,
        };
        let state = initial().with_projectiles(vec![projectile]);
        assert!(matches!(
            state.validate(),
            Err(InitializationError::InvalidProjectile { id: 7, .. })
        ));
    }

    #[test]
    fn starts_history_at_time_zero() {
        let state = BattleState::from_initial(initial(), None, None);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].time_ms, 0);
        assert_eq!(state.history[0].enemy_hp, 100.0);
    }
}
