//! Hit resolution pipeline.
//!
//! Every damaging effect in a battle funnels through [`resolve_hit`]. The
//! pipeline order is fixed:
//!
//! ```text
//! deflection (invincible / barrier)
//!   → status application (one roll, skipped when immune)
//!   → type multiplier → resistance
//!   → armor mitigation
//!   → overshield → shields (1:1)
//!   → Viral amplification → HP
//! ```
//!
//! Burn damage does not use this pipeline; see [`apply_burn`].

use crate::combat::damage::{armor_mitigation, type_multiplier};
use crate::combat::DamageType;
use crate::config::{BattleConfig, StatusTuning};
use crate::env::BattleRng;
use crate::state::{Fighter, Millis, Projectile, ProjectileFlavor, StatusKind};

/// How a hit reaches its target. Barriers only stop projectiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitDelivery {
    Projectile,
    Direct,
}

/// A single incoming hit before any defensive math.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub damage: f32,
    pub damage_type: DamageType,
    pub status_chance: f32,
    pub flavor: ProjectileFlavor,
    pub delivery: HitDelivery,
}

impl Hit {
    /// A direct (non-projectile) hit with no status chance.
    pub fn direct(damage: f32, damage_type: DamageType) -> Self {
        Self {
            damage,
            damage_type,
            status_chance: 0.0,
            flavor: ProjectileFlavor::Standard,
            delivery: HitDelivery::Direct,
        }
    }

    pub fn from_projectile(projectile: &Projectile) -> Self {
        Self {
            damage: projectile.damage,
            damage_type: projectile.damage_type,
            status_chance: projectile.status_chance,
            flavor: projectile.flavor,
            delivery: HitDelivery::Projectile,
        }
    }

    pub fn with_status_chance(mut self, status_chance: f32) -> Self {
        self.status_chance = status_chance;
        self
    }
}

/// Status outcome of a hit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AppliedStatus {
    /// A stack of the given kind was added.
    Stack(StatusKind),
    /// Energy drained shields and added an EMP stack (if below the cap).
    Emp { drained: f32, stacked: bool },
    /// Corrosive removed armor permanently.
    Corroded { stripped: f32 },
}

/// What a hit did to its target.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitReport {
    /// Negated by invincibility or a barrier.
    pub deflected: bool,
    pub status: Option<AppliedStatus>,
    pub overshield_damage: f32,
    pub shield_damage: f32,
    pub hp_damage: f32,
    /// Damage to send back to the attacker from an active counter window.
    pub reflected: f32,
}

impl HitReport {
    fn deflected() -> Self {
        Self {
            deflected: true,
            ..Self::default()
        }
    }

    /// True if any defensive layer or HP lost points.
    pub fn took_damage(&self) -> bool {
        self.overshield_damage > 0.0 || self.shield_damage > 0.0 || self.hp_damage > 0.0
    }
}

/// Runs `hit` through the defender's layers and mutates the defender.
pub fn resolve_hit(
    defender: &mut Fighter,
    hit: &Hit,
    now: Millis,
    rng: &mut dyn BattleRng,
    config: &BattleConfig,
) -> HitReport {
    let barrier_blocks =
        hit.delivery == HitDelivery::Projectile && defender.defenses.barrier_active(now);
    if defender.defenses.invincible(now) || barrier_blocks {
        return HitReport::deflected();
    }

    let mut report = HitReport::default();

    // 1. Status application: one roll per hit.
    if carries_status(hit.damage_type) && !defender.status_immune && rng.chance(hit.status_chance)
    {
        report.status = apply_status(defender, hit.damage_type, now, &config.status);
    }

    // 2. Type interaction against the layers that remain after the status.
    let mut damage = hit.damage.max(0.0) * type_multiplier(hit.damage_type, defender);
    damage *= 1.0 - defender.resistances.get(hit.damage_type);

    // 3. Armor, for every delivery and flavor.
    damage = armor_mitigation(damage, defender.armor_points(), config.armor_constant);

    // 4. Absorb layers, outermost first.
    if let Some(overshield) = defender.defenses.overshield.as_mut() {
        if now < overshield.expires_at {
            let absorbed = damage.min(overshield.points);
            overshield.points -= absorbed;
            damage -= absorbed;
            report.overshield_damage = absorbed;
        }
    }
    if let Some(shields) = defender.shields.as_mut() {
        let absorbed = shields.meter.drain(damage);
        damage -= absorbed;
        report.shield_damage = absorbed;
    }

    // 5. Viral amplification applies to HP damage only.
    let viral = config
        .status
        .viral_multiplier(defender.status.count(StatusKind::Viral));
    report.hp_damage = defender.hp.drain(damage * viral);

    if report.took_damage() {
        defender.mark_damaged(now);
    }

    if let Some(ratio) = defender.defenses.counter_ratio(now) {
        report.reflected = hit.damage.max(0.0) * ratio;
    }

    report
}

/// Damage types whose hits roll for a status.
fn carries_status(damage_type: DamageType) -> bool {
    !matches!(damage_type, DamageType::Kinetic | DamageType::Concussion)
}

/// Applies the status tied to `damage_type`. Returns `None` when nothing
/// changed (stack cap reached, or no armor left to corrode).
fn apply_status(
    defender: &mut Fighter,
    damage_type: DamageType,
    now: Millis,
    tuning: &StatusTuning,
) -> Option<AppliedStatus> {
    let stack = |defender: &mut Fighter, kind: StatusKind| {
        defender
            .status
            .add(kind, now, kind.duration(tuning))
            .then_some(AppliedStatus::Stack(kind))
    };

    match damage_type {
        DamageType::Thermal => stack(defender, StatusKind::Burn),
        DamageType::Viral => stack(defender, StatusKind::Viral),
        DamageType::Glacial => stack(defender, StatusKind::Lag),
        DamageType::Energy => {
            let drained = match defender.shields.as_mut() {
                Some(shields) => {
                    let amount = shields.meter.current * tuning.emp_shield_drain;
                    shields.meter.drain(amount)
                }
                None => 0.0,
            };
            let stacked = defender
                .status
                .add(StatusKind::Emp, now, tuning.emp_duration_ms);
            Some(AppliedStatus::Emp { drained, stacked })
        }
        DamageType::Corrosive => {
            let armor = defender.armor.as_mut()?;
            let current = armor.meter.current;
            if current <= 0.0 {
                return None;
            }
            let stripped = (current * tuning.corrosive_armor_strip).max(1.0).min(current);
            armor.meter.drain(stripped);
            Some(AppliedStatus::Corroded { stripped })
        }
        DamageType::Kinetic | DamageType::Concussion => None,
    }
}

/// Burn damage for one burn tick: flat per stack, straight to HP.
///
/// Bypasses overshield, shields and armor. Returns the HP removed.
pub fn apply_burn(defender: &mut Fighter, now: Millis, tuning: &StatusTuning) -> f32 {
    let stacks = defender.status.count(StatusKind::Burn);
    if stacks == 0 || defender.defenses.invincible(now) {
        return 0.0;
    }
    defender
        .hp
        .drain(stacks as f32 * tuning.burn_damage_per_stack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRng;
    use crate::state::{Armor, CounterWindow, Position, Shields};

    fn target() -> Fighter {
        Fighter::new(Position::new(4, 1), 100.0)
    }

    fn resolve(defender: &mut Fighter, hit: Hit) -> HitReport {
        let mut rng = ScriptedRng::constant(0.0);
        resolve_hit(defender, &hit, 1_000, &mut rng, &BattleConfig::default())
    }

    #[test]
    fn shields_absorb_before_hp() {
        let mut defender = target().with_shields(Shields::new(30.0));
        let report = resolve(&mut defender, Hit::direct(50.0, DamageType::Kinetic));

        assert_eq!(report.shield_damage, 30.0);
        assert_eq!(report.hp_damage, 20.0);
        assert_eq!(defender.shield_points(), 0.0);
        assert_eq!(defender.hp.current, 80.0);
    }

    #[test]
    fn viral_stacks_amplify_hp_damage() {
        let mut defender = target();
        for _ in 0..5 {
            defender.status.add(StatusKind::Viral, 0, 10_000);
        }
        let report = resolve(&mut defender, Hit::direct(10.0, DamageType::Kinetic));

        assert_eq!(report.hp_damage, 20.0);
        assert_eq!(defender.hp.current, 80.0);
    }

    #[test]
    fn armor_mitigates_on_a_curve() {
        let mut defender = target().with_armor(Armor::new(300.0));
        let report = resolve(&mut defender, Hit::direct(40.0, DamageType::Kinetic));
        assert!((report.hp_damage - 20.0).abs() < 1e-4);
    }

    #[test]
    fn piercing_rounds_are_still_mitigated_by_armor() {
        let mut defender = target().with_armor(Armor::new(300.0));
        let hit = Hit {
            flavor: ProjectileFlavor::Piercing,
            delivery: HitDelivery::Projectile,
            ..Hit::direct(40.0, DamageType::Kinetic)
        };
        let report = resolve(&mut defender, hit);
        assert!((report.hp_damage - 20.0).abs() < 1e-4);
        assert!((defender.hp.current - 80.0).abs() < 1e-4);
    }

    #[test]
    fn corrosive_strips_at_least_one_point() {
        let mut defender = target().with_armor(Armor::new(5.0));
        let hit = Hit::direct(0.0, DamageType::Corrosive).with_status_chance(1.0);
        let report = resolve(&mut defender, hit);

        assert_eq!(report.status, Some(AppliedStatus::Corroded { stripped: 1.0 }));
        assert_eq!(defender.armor_points(), 4.0);
    }

    #[test]
    fn energy_drains_then_doubles_against_shields() {
        let mut defender = target().with_shields(Shields::new(100.0));
        let hit = Hit::direct(10.0, DamageType::Energy).with_status_chance(1.0);
        let report = resolve(&mut defender, hit);

        assert_eq!(
            report.status,
            Some(AppliedStatus::Emp {
                drained: 8.0,
                stacked: true
            })
        );
        assert_eq!(report.shield_damage, 20.0);
        assert_eq!(defender.shield_points(), 72.0);
        assert!(defender.status.shield_regen_disabled);
    }

    #[test]
    fn status_stack_follows_damage_type() {
        for (damage_type, kind) in [
            (DamageType::Thermal, StatusKind::Burn),
            (DamageType::Viral, StatusKind::Viral),
            (DamageType::Glacial, StatusKind::Lag),
        ] {
            let mut defender = target();
            let hit = Hit::direct(5.0, damage_type).with_status_chance(1.0);
            let report = resolve(&mut defender, hit);

            assert_eq!(report.status, Some(AppliedStatus::Stack(kind)));
            assert_eq!(defender.status.count(kind), 1);
        }
    }

    #[test]
    fn status_immunity_blocks_application_not_damage() {
        let mut defender = target().with_status_immunity(true);
        let hit = Hit::direct(10.0, DamageType::Thermal).with_status_chance(1.0);
        let report = resolve(&mut defender, hit);

        assert_eq!(report.status, None);
        assert_eq!(report.hp_damage, 10.0);
        assert_eq!(defender.status.count(StatusKind::Burn), 0);
    }

    #[test]
    fn barrier_deflects_projectiles_only() {
        let mut defender = target();
        defender.defenses.barrier_until = Some(5_000);

        let projectile = Hit {
            delivery: HitDelivery::Projectile,
            ..Hit::direct(10.0, DamageType::Kinetic)
        };
        assert!(resolve(&mut defender, projectile).deflected);

        let direct = resolve(&mut defender, Hit::direct(10.0, DamageType::Kinetic));
        assert!(!direct.deflected);
        assert_eq!(defender.hp.current, 90.0);
    }

    #[test]
    fn counter_reflects_incoming_damage() {
        let mut defender = target();
        defender.defenses.counter = Some(CounterWindow {
            ratio: 0.5,
            expires_at: 5_000,
        });
        let report = resolve(&mut defender, Hit::direct(30.0, DamageType::Kinetic));
        assert_eq!(report.reflected, 15.0);
    }

    #[test]
    fn burn_bypasses_shields_and_armor() {
        let mut defender = target()
            .with_shields(Shields::new(100.0))
            .with_armor(Armor::new(100.0));
        defender.status.add(StatusKind::Burn, 0, 4_000);
        defender.status.add(StatusKind::Burn, 0, 4_000);

        let burned = apply_burn(&mut defender, 500, &StatusTuning::default());

        assert_eq!(burned, 6.0);
        assert_eq!(defender.hp.current, 94.0);
        assert_eq!(defender.shield_points(), 100.0);
        assert_eq!(defender.armor_points(), 100.0);
    }
}
