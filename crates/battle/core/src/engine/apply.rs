//! Turns [`ActionResult`] descriptors and due pending effects into state
//! mutations.

use super::pending::PendingEffect;
use super::{BattleEngine, BattleEvent, index};
use crate::action::ActionResult;
use crate::combat::{DamageType, Hit, HitReport, resolve_hit};
use crate::config::BattleConfig;
use crate::env::BattleRng;
use crate::state::{
    Buff, CounterWindow, Overshield, Position, Projectile, ProjectileFlavor, ProjectileId, Side,
};

impl<R: BattleRng> BattleEngine<R> {
    pub(super) fn apply_result(
        &mut self,
        side: Side,
        result: ActionResult,
        events: &mut Vec<BattleEvent>,
    ) {
        let now = self.state.time_ms;
        let power = self.state.fighter(side).damage_multiplier(now);

        match result {
            ActionResult::Shoot {
                damage,
                damage_type,
                status_chance,
            } => {
                let row = self.state.fighter(side).position.y;
                self.spawn(
                    side,
                    row,
                    damage * power,
                    damage_type,
                    status_chance,
                    ProjectileFlavor::Standard,
                );
            }
            ActionResult::Homing {
                damage,
                damage_type,
                status_chance,
            } => {
                let row = self.state.fighter(side).position.y;
                self.spawn(
                    side,
                    row,
                    damage * power,
                    damage_type,
                    status_chance,
                    ProjectileFlavor::Homing,
                );
            }
            ActionResult::Piercing {
                damage,
                damage_type,
                status_chance,
            } => {
                let row = self.state.fighter(side).position.y;
                self.spawn(
                    side,
                    row,
                    damage * power,
                    damage_type,
                    status_chance,
                    ProjectileFlavor::Piercing,
                );
            }
            ActionResult::RapidFire {
                damage,
                damage_type,
                status_chance,
                count,
                interval_ms,
            } => {
                if count == 0 {
                    return;
                }
                let row = self.state.fighter(side).position.y;
                self.spawn(
                    side,
                    row,
                    damage * power,
                    damage_type,
                    status_chance,
                    ProjectileFlavor::Standard,
                );
                for shot in 1..count {
                    self.pending.schedule(
                        now.saturating_add(u64::from(shot).saturating_mul(interval_ms)),
                        PendingEffect::Projectile {
                            owner: side,
                            damage: damage * power,
                            damage_type,
                            status_chance,
                            flavor: ProjectileFlavor::Standard,
                        },
                    );
                }
            }
            ActionResult::Wave {
                damage,
                damage_type,
                status_chance,
                rows,
            } => {
                let target_row = self.state.fighter(side.opponent()).position.y;
                if rows.contains(target_row) {
                    let hit = Hit::direct(damage * power, damage_type)
                        .with_status_chance(status_chance);
                    self.strike(side, hit, None, events);
                }
            }
            ActionResult::Bomb {
                damage,
                damage_type,
                target,
                delay_ms,
            } => {
                self.pending.schedule(
                    now.saturating_add(delay_ms),
                    PendingEffect::Detonation {
                        owner: side,
                        target,
                        damage: damage * power,
                        damage_type,
                    },
                );
            }
            ActionResult::Cluster {
                damage,
                damage_type,
                target,
                delay_ms,
                count,
                interval_ms,
            } => {
                for bomblet in 0..count {
                    self.pending.schedule(
                        now.saturating_add(delay_ms)
                            .saturating_add(u64::from(bomblet).saturating_mul(interval_ms)),
                        PendingEffect::Detonation {
                            owner: side,
                            target,
                            damage: damage * power,
                            damage_type,
                        },
                    );
                }
            }
            ActionResult::Field {
                damage_per_tick,
                damage_type,
                row,
                tick_ms,
                ticks,
            } => {
                for pulse in 1..=ticks {
                    self.pending.schedule(
                        now.saturating_add(u64::from(pulse).saturating_mul(tick_ms)),
                        PendingEffect::FieldPulse {
                            owner: side,
                            row,
                            damage: damage_per_tick * power,
                            damage_type,
                        },
                    );
                }
            }
            ActionResult::Melee {
                damage,
                damage_type,
                range,
            } => {
                if self.in_reach(side, range, 0) {
                    self.strike(side, Hit::direct(damage * power, damage_type), None, events);
                }
            }
            ActionResult::WideMelee {
                damage,
                damage_type,
                range,
            } => {
                if self.in_reach(side, range, 1) {
                    self.strike(side, Hit::direct(damage * power, damage_type), None, events);
                }
            }
            ActionResult::TripleShot {
                damage,
                damage_type,
                status_chance,
            } => {
                let row = self.state.fighter(side).position.y;
                for lane in [row - 1, row, row + 1] {
                    if (0..BattleConfig::GRID_HEIGHT).contains(&lane) {
                        self.spawn(
                            side,
                            lane,
                            damage * power,
                            damage_type,
                            status_chance,
                            ProjectileFlavor::Standard,
                        );
                    }
                }
            }
            ActionResult::Dash {
                to,
                damage,
                damage_type,
            } => {
                self.relocate(side, to);
                if self.in_reach(side, 1, 0) {
                    self.strike(side, Hit::direct(damage * power, damage_type), None, events);
                }
            }
            ActionResult::Retreat {
                to,
                damage,
                damage_type,
            } => {
                self.relocate(side, to);
                let row = self.state.fighter(side).position.y;
                self.spawn(
                    side,
                    row,
                    damage * power,
                    damage_type,
                    0.0,
                    ProjectileFlavor::Standard,
                );
            }
            ActionResult::Drain {
                damage,
                damage_type,
                heal_ratio,
            } => {
                let hit = Hit::direct(damage * power, damage_type);
                let report = self.strike(side, hit, None, events);
                self.heal(side, report.hp_damage * heal_ratio, events);
            }
            ActionResult::Move { to } => self.relocate(side, to),
            ActionResult::Heal { amount } => self.heal(side, amount, events),
            ActionResult::HealOverTime {
                amount_per_tick,
                tick_ms,
                ticks,
            } => {
                for tick in 1..=ticks {
                    self.pending.schedule(
                        now.saturating_add(u64::from(tick).saturating_mul(tick_ms)),
                        PendingEffect::Heal {
                            side,
                            amount: amount_per_tick,
                        },
                    );
                }
            }
            ActionResult::Barrier { duration_ms } => {
                self.state.fighter_mut(side).defenses.barrier_until = Some(now.saturating_add(duration_ms));
            }
            ActionResult::Shield {
                amount,
                duration_ms,
            } => {
                self.state.fighter_mut(side).defenses.overshield = Some(Overshield {
                    points: amount,
                    expires_at: now.saturating_add(duration_ms),
                });
            }
            ActionResult::Counter { ratio, duration_ms } => {
                self.state.fighter_mut(side).defenses.counter = Some(CounterWindow {
                    ratio,
                    expires_at: now.saturating_add(duration_ms),
                });
            }
            ActionResult::Invincible { duration_ms } => {
                let defenses = &mut self.state.fighter_mut(side).defenses;
                defenses.invincible_until = Some(now.saturating_add(duration_ms));
            }
            ActionResult::Buff {
                stat,
                multiplier,
                duration_ms,
            } => {
                self.state.fighter_mut(side).buffs.push(Buff {
                    stat,
                    multiplier,
                    expires_at: now.saturating_add(duration_ms),
                });
            }
        }
    }

    pub(super) fn resolve_pending(
        &mut self,
        effect: PendingEffect,
        events: &mut Vec<BattleEvent>,
    ) {
        match effect {
            PendingEffect::Projectile {
                owner,
                damage,
                damage_type,
                status_chance,
                flavor,
            } => {
                let row = self.state.fighter(owner).position.y;
                self.spawn(owner, row, damage, damage_type, status_chance, flavor);
            }
            PendingEffect::Detonation {
                owner,
                target,
                damage,
                damage_type,
            } => {
                if self.state.fighter(owner.opponent()).position == target {
                    self.strike(owner, Hit::direct(damage, damage_type), None, events);
                }
            }
            PendingEffect::FieldPulse {
                owner,
                row,
                damage,
                damage_type,
            } => {
                if self.state.fighter(owner.opponent()).position.y == row {
                    self.strike(owner, Hit::direct(damage, damage_type), None, events);
                }
            }
            PendingEffect::Heal { side, amount } => self.heal(side, amount, events),
        }
    }

    /// Resolves `hit` against `attacker`'s opponent, then any counter reflect.
    pub(super) fn strike(
        &mut self,
        attacker: Side,
        hit: Hit,
        projectile: Option<ProjectileId>,
        events: &mut Vec<BattleEvent>,
    ) -> HitReport {
        let now = self.state.time_ms;
        let target = attacker.opponent();
        let report = resolve_hit(
            self.state.fighter_mut(target),
            &hit,
            now,
            &mut self.rng,
            &self.config,
        );
        self.record_hit(attacker, projectile, report, events);

        if report.reflected > 0.0 {
            let reflect = Hit::direct(report.reflected, DamageType::Kinetic);
            let back = resolve_hit(
                self.state.fighter_mut(attacker),
                &reflect,
                now,
                &mut self.rng,
                &self.config,
            );
            tracing::debug!(%attacker, amount = report.reflected, "counter reflected");
            self.record_hit(target, None, back, events);
        }
        report
    }

    fn record_hit(
        &mut self,
        attacker: Side,
        projectile: Option<ProjectileId>,
        report: HitReport,
        events: &mut Vec<BattleEvent>,
    ) {
        let target = attacker.opponent();
        if report.took_damage() {
            self.damaged[index(target)] = true;
        }
        if let Some(status) = report.status {
            events.push(BattleEvent::StatusApplied {
                side: target,
                status,
            });
        }
        events.push(BattleEvent::Hit {
            attacker,
            target,
            projectile,
            report,
        });
    }

    fn spawn(
        &mut self,
        owner: Side,
        row: i32,
        damage: f32,
        damage_type: DamageType,
        status_chance: f32,
        flavor: ProjectileFlavor,
    ) {
        let id = self.next_projectile_id();
        let origin = self.state.fighter(owner).position;
        self.state.projectiles.push(Projectile {
            id,
            owner,
            x: origin.x as f32,
            row,
            direction: owner.facing(),
            damage,
            damage_type,
            status_chance,
            flavor,
        });
    }

    fn heal(&mut self, side: Side, amount: f32, events: &mut Vec<BattleEvent>) {
        let restored = self.state.fighter_mut(side).hp.restore(amount);
        if restored > 0.0 {
            events.push(BattleEvent::Healed {
                side,
                amount: restored,
            });
        }
    }

    /// Moves `side` to `to` unless the tile is off its half or occupied.
    fn relocate(&mut self, side: Side, to: Position) {
        if !to.on_side(side) || self.state.blocked_tiles(side).contains(&to) {
            return;
        }
        self.state.fighter_mut(side).position = to;
    }

    /// True if the opponent is within `range` columns and `rows` rows.
    fn in_reach(&self, side: Side, range: i32, rows: i32) -> bool {
        let own = self.state.fighter(side).position;
        let enemy = self.state.fighter(side.opponent()).position;
        own.column_distance(enemy) <= range && (own.y - enemy.y).abs() <= rows
    }
}
