//! Grid movement rules shared by move, dash and retreat actions.
//!
//! Every destination is clamped to the mover's half of the grid. A
//! destination held by another combatant is refused and the mover's current
//! position is returned instead.

use super::BattleContext;
use crate::env::BattleRng;
use crate::state::Position;

/// Direction or rule a move action follows.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MoveRule {
    Up,
    Down,
    /// Toward the opponent's half.
    Forward,
    /// Away from the opponent's half.
    Back,
    /// Into the opponent's row.
    Align,
    /// Random legal neighbouring tile.
    Dodge,
}

impl MoveRule {
    pub fn destination(self, ctx: &BattleContext, rng: &mut dyn BattleRng) -> Position {
        let here = ctx.own_position;
        let facing = ctx.side.facing();
        match self {
            MoveRule::Up => settle(ctx, here.offset(0, -1)),
            MoveRule::Down => settle(ctx, here.offset(0, 1)),
            MoveRule::Forward => settle(ctx, here.offset(facing, 0)),
            MoveRule::Back => settle(ctx, here.offset(-facing, 0)),
            MoveRule::Align => settle(
                ctx,
                Position {
                    y: ctx.enemy_position.y,
                    ..here
                },
            ),
            MoveRule::Dodge => dodge(ctx, rng),
        }
    }
}

/// Clamp `desired` to the mover's half and refuse occupied tiles.
pub fn settle(ctx: &BattleContext, desired: Position) -> Position {
    let clamped = desired.clamp_to(ctx.side);
    if ctx.is_occupied(clamped) {
        ctx.own_position
    } else {
        clamped
    }
}

/// Front column of the mover's half, same row.
pub fn front_line(ctx: &BattleContext) -> Position {
    let (min_x, max_x) = ctx.side.columns();
    let x = if ctx.side.is_player() { max_x } else { min_x };
    settle(ctx, Position { x, ..ctx.own_position })
}

/// Back column of the mover's half, same row.
pub fn back_line(ctx: &BattleContext) -> Position {
    let (min_x, max_x) = ctx.side.columns();
    let x = if ctx.side.is_player() { min_x } else { max_x };
    settle(ctx, Position { x, ..ctx.own_position })
}

fn dodge(ctx: &BattleContext, rng: &mut dyn BattleRng) -> Position {
    let here = ctx.own_position;
    let options: Vec<Position> = [(0, -1), (0, 1), (-1, 0), (1, 0)]
        .into_iter()
        .map(|(dx, dy)| here.offset(dx, dy))
        .filter(|tile| tile.on_side(ctx.side) && !ctx.is_occupied(*tile))
        .collect();
    if options.is_empty() {
        return here;
    }
    options[rng.gen_index(options.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, ScriptedRng};
    use crate::state::{BattleState, Fighter, InitialState, Side};

    fn context(player: Position, enemy: Position, side: Side) -> BattleContext {
        let initial = InitialState::new(Fighter::new(player, 100.0), Fighter::new(enemy, 100.0));
        let state = BattleState::from_initial(initial, None, None);
        BattleContext::capture(&state, side, false)
    }

    #[test]
    fn forward_stops_at_the_half_line() {
        let ctx = context(Position::new(2, 1), Position::new(4, 1), Side::Player);
        let mut rng = ScriptedRng::constant(0.0);
        assert_eq!(
            MoveRule::Forward.destination(&ctx, &mut rng),
            Position::new(2, 1)
        );
    }

    #[test]
    fn up_clamps_to_the_top_row() {
        let ctx = context(Position::new(1, 0), Position::new(4, 1), Side::Player);
        let mut rng = ScriptedRng::constant(0.0);
        assert_eq!(MoveRule::Up.destination(&ctx, &mut rng), Position::new(1, 0));
    }

    #[test]
    fn occupied_tile_returns_current_position() {
        let mut ctx = context(Position::new(1, 1), Position::new(4, 1), Side::Player);
        ctx.other_enemies.push(Position::new(1, 2));
        let mut rng = ScriptedRng::constant(0.0);
        assert_eq!(
            MoveRule::Down.destination(&ctx, &mut rng),
            Position::new(1, 1)
        );
    }

    #[test]
    fn enemy_forward_moves_left() {
        let ctx = context(Position::new(0, 1), Position::new(5, 2), Side::Enemy);
        let mut rng = ScriptedRng::constant(0.0);
        assert_eq!(
            MoveRule::Forward.destination(&ctx, &mut rng),
            Position::new(4, 2)
        );
    }

    #[test]
    fn dodge_stays_on_own_half() {
        let ctx = context(Position::new(2, 1), Position::new(4, 1), Side::Player);
        let mut rng = PcgRng::seed_from_u64(9);
        for _ in 0..50 {
            let to = MoveRule::Dodge.destination(&ctx, &mut rng);
            assert!(to.on_side(Side::Player));
            assert_eq!(to.column_distance(ctx.own_position) + (to.y - 1).abs(), 1);
        }
    }

    #[test]
    fn front_and_back_lines() {
        let ctx = context(Position::new(1, 2), Position::new(4, 1), Side::Player);
        assert_eq!(front_line(&ctx), Position::new(2, 2));
        assert_eq!(back_line(&ctx), Position::new(0, 2));
    }
}
