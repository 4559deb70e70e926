//! Sparse per-tick updates.
//!
//! A [`BattleUpdate`] carries only what changed during one tick. The
//! [`UpdateFields`] mask mirrors which optional fields are populated so a
//! consumer can branch on bits instead of probing every `Option`.

use bitflags::bitflags;

use crate::combat::{AppliedStatus, HitReport};
use crate::state::{
    BattleState, Fighter, HistorySample, Millis, Position, Projectile, ProjectileId, Side,
    StatusSummary,
};

bitflags! {
    /// Tracks which optional fields of a [`BattleUpdate`] are present.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct UpdateFields: u16 {
        const PLAYER_HP       = 1 << 0;
        const PLAYER_SHIELDS  = 1 << 1;
        const PLAYER_ARMOR    = 1 << 2;
        const PLAYER_POSITION = 1 << 3;
        const PLAYER_STATUS   = 1 << 4;
        const ENEMY_HP        = 1 << 5;
        const ENEMY_SHIELDS   = 1 << 6;
        const ENEMY_ARMOR     = 1 << 7;
        const ENEMY_POSITION  = 1 << 8;
        const ENEMY_STATUS    = 1 << 9;
        const PROJECTILES     = 1 << 10;
        const EVENTS          = 1 << 11;
        const RESULT          = 1 << 12;
    }
}

impl UpdateFields {
    const fn side(side: Side) -> [UpdateFields; 5] {
        match side {
            Side::Player => [
                Self::PLAYER_HP,
                Self::PLAYER_SHIELDS,
                Self::PLAYER_ARMOR,
                Self::PLAYER_POSITION,
                Self::PLAYER_STATUS,
            ],
            Side::Enemy => [
                Self::ENEMY_HP,
                Self::ENEMY_SHIELDS,
                Self::ENEMY_ARMOR,
                Self::ENEMY_POSITION,
                Self::ENEMY_STATUS,
            ],
        }
    }
}

/// Changed fields of one fighter.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideUpdate {
    pub hp: Option<f32>,
    pub shields: Option<f32>,
    pub armor: Option<f32>,
    pub position: Option<Position>,
    pub status: Option<StatusSummary>,
}

impl SideUpdate {
    pub fn is_empty(&self) -> bool {
        self.hp.is_none()
            && self.shields.is_none()
            && self.armor.is_none()
            && self.position.is_none()
            && self.status.is_none()
    }
}

/// Something notable that happened during a tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum BattleEvent {
    ActionFired {
        side: Side,
        action_id: String,
        result: String,
    },
    /// A matched, ready protocol was skipped by a Lag stutter.
    Stuttered { side: Side, action_id: String },
    Hit {
        attacker: Side,
        target: Side,
        projectile: Option<ProjectileId>,
        report: HitReport,
    },
    StatusApplied { side: Side, status: AppliedStatus },
    BurnDamage { side: Side, amount: f32 },
    Healed { side: Side, amount: f32 },
}

/// Terminal payload.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleResult {
    pub player_won: bool,
    pub history: Vec<HistorySample>,
}

/// Result of one [`tick`](super::BattleEngine::tick).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleUpdate {
    pub time_ms: Millis,
    pub fields: UpdateFields,
    pub player: SideUpdate,
    pub enemy: SideUpdate,
    pub projectiles: Option<Vec<Projectile>>,
    pub events: Vec<BattleEvent>,
    pub result: Option<BattleResult>,
}

impl BattleUpdate {
    pub fn is_terminal(&self) -> bool {
        self.result.is_some()
    }

    pub fn side(&self, side: Side) -> &SideUpdate {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }
}

/// Values of one fighter captured before a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
struct FighterSnapshot {
    hp: f32,
    shields: f32,
    armor: f32,
    position: Position,
    status: StatusSummary,
}

impl FighterSnapshot {
    fn capture(fighter: &Fighter) -> Self {
        Self {
            hp: fighter.hp.current,
            shields: fighter.shield_points(),
            armor: fighter.armor_points(),
            position: fighter.position,
            status: fighter.status.summary(),
        }
    }
}

/// Pre-tick capture used to compute the sparse update.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TickSnapshot {
    player: FighterSnapshot,
    enemy: FighterSnapshot,
    projectiles: Vec<ProjectileId>,
}

impl TickSnapshot {
    pub(crate) fn capture(state: &BattleState) -> Self {
        Self {
            player: FighterSnapshot::capture(&state.player),
            enemy: FighterSnapshot::capture(&state.enemy),
            projectiles: state.projectiles.iter().map(|p| p.id).collect(),
        }
    }

    /// Builds the update describing everything that differs from `state`.
    pub(crate) fn diff(&self, state: &BattleState, events: Vec<BattleEvent>) -> BattleUpdate {
        let mut fields = UpdateFields::empty();
        let player = diff_side(&self.player, &state.player, Side::Player, &mut fields);
        let enemy = diff_side(&self.enemy, &state.enemy, Side::Enemy, &mut fields);

        let ids_changed = self.projectiles.len() != state.projectiles.len()
            || self
                .projectiles
                .iter()
                .zip(&state.projectiles)
                .any(|(before, after)| *before != after.id);
        let projectiles = if ids_changed || !state.projectiles.is_empty() {
            fields |= UpdateFields::PROJECTILES;
            Some(state.projectiles.clone())
        } else {
            None
        };

        if !events.is_empty() {
            fields |= UpdateFields::EVENTS;
        }

        let result = state.outcome.map(|outcome| {
            fields |= UpdateFields::RESULT;
            BattleResult {
                player_won: outcome.player_won(),
                history: state.history.clone(),
            }
        });

        BattleUpdate {
            time_ms: state.time_ms,
            fields,
            player,
            enemy,
            projectiles,
            events,
            result,
        }
    }
}

fn diff_side(
    before: &FighterSnapshot,
    fighter: &Fighter,
    side: Side,
    fields: &mut UpdateFields,
) -> SideUpdate {
    let after = FighterSnapshot::capture(fighter);
    let [hp_bit, shields_bit, armor_bit, position_bit, status_bit] = UpdateFields::side(side);
    let mut update = SideUpdate::default();

    if after.hp != before.hp {
        update.hp = Some(after.hp);
        *fields |= hp_bit;
    }
    if after.shields != before.shields {
        update.shields = Some(after.shields);
        *fields |= shields_bit;
    }
    if after.armor != before.armor {
        update.armor = Some(after.armor);
        *fields |= armor_bit;
    }
    if after.position != before.position {
        update.position = Some(after.position);
        *fields |= position_bit;
    }
    if after.status != before.status {
        update.status = Some(after.status);
        *fields |= status_bit;
    }
    update
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Fighter, InitialState, Position};

    fn state() -> BattleState {
        BattleState::from_initial(
            InitialState::new(
                Fighter::new(Position::new(1, 1), 100.0),
                Fighter::new(Position::new(4, 1), 100.0),
            ),
            None,
            None,
        )
    }

    #[test]
    fn unchanged_state_yields_empty_update() {
        let state = state();
        let update = TickSnapshot::capture(&state).diff(&state, Vec::new());
        assert!(update.fields.is_empty());
        assert!(update.player.is_empty());
        assert!(update.projectiles.is_none());
    }

    #[test]
    fn mask_mirrors_changed_fields() {
        let mut state = state();
        let snapshot = TickSnapshot::capture(&state);
        state.enemy.hp.drain(10.0);
        state.player.position = Position::new(0, 1);

        let update = snapshot.diff(&state, Vec::new());
        assert_eq!(
            update.fields,
            UpdateFields::ENEMY_HP | UpdateFields::PLAYER_POSITION
        );
        assert_eq!(update.enemy.hp, Some(90.0));
        assert_eq!(update.player.position, Some(Position::new(0, 1)));
        assert!(update.result.is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn events_serialize_with_snake_case_tag() {
        let event = BattleEvent::BurnDamage {
            side: Side::Enemy,
            amount: 6.0,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "burn_damage");
        assert_eq!(json["amount"], 6.0);
    }
}
