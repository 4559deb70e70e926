use std::collections::BTreeMap;

use super::{Action, ActionKind, MoveRule};
use crate::combat::DamageType;
use crate::state::{BuffStat, Millis};

/// Registry of actions keyed by id. Iteration is in id order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionCatalog {
    actions: BTreeMap<String, Action>,
}

impl ActionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `action`, replacing any previous entry with the same id.
    pub fn insert(&mut self, action: Action) -> Option<Action> {
        self.actions.insert(action.id.clone(), action)
    }

    pub fn get(&self, id: &str) -> Option<&Action> {
        self.actions.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.actions.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.values()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The stock action set.
    pub fn builtin() -> Self {
        use DamageType::*;

        let actions = [
            // ===== projectiles =====
            Action::shoot("basic_shot", "Basic Shot", 10.0, Kinetic, 0.0, 800)
                .with_description("Fires a single kinetic round down the row."),
            Action::shoot("plasma_bolt", "Plasma Bolt", 12.0, Energy, 0.3, 1_200)
                .with_description("Energy bolt that shreds shields and may cause EMP."),
            Action::shoot("flame_shot", "Flame Shot", 8.0, Thermal, 0.5, 1_000)
                .with_description("Incendiary round that may ignite the target."),
            Action::shoot("virus_dart", "Virus Dart", 6.0, Viral, 0.6, 1_200)
                .with_description("Infects the target, amplifying later damage."),
            Action::shoot("acid_shot", "Acid Shot", 8.0, Corrosive, 0.5, 1_200)
                .with_description("Corrodes armor on contact."),
            Action::shoot("frost_shot", "Frost Shot", 8.0, Glacial, 0.5, 1_200)
                .with_description("Chills the target's systems, slowing its cooldowns."),
            Action::new(
                "homing_missile",
                "Homing Missile",
                ActionKind::Homing {
                    damage: 14.0,
                    status_chance: 0.0,
                },
            )
            .with_damage_type(Concussion)
            .with_cooldown(2_000)
            .with_description("Missile that steers toward the target's row."),
            Action::new(
                "rail_piercer",
                "Rail Piercer",
                ActionKind::Piercing {
                    damage: 20.0,
                    status_chance: 0.0,
                },
            )
            .with_damage_type(Kinetic)
            .with_cooldown(2_500)
            .with_description("Heavy kinetic slug."),
            Action::rapid_fire("rapid_fire", "Rapid Fire", 5.0, Kinetic, 3, 100, 1_500)
                .with_description("Three quick rounds in succession."),
            Action::new(
                "triple_shot",
                "Triple Shot",
                ActionKind::TripleShot {
                    damage: 7.0,
                    status_chance: 0.0,
                },
            )
            .with_damage_type(Kinetic)
            .with_cooldown(1_800)
            .with_description("Fires into its own row and both neighbours."),
            // ===== area =====
            Action::wave("shockwave", "Shockwave", 12.0, Concussion, 0, 2_500)
                .with_description("Instant blast along the row."),
            Action::wave("spread_wave", "Spread Wave", 8.0, Energy, 1, 3_000)
                .with_status_chance(0.2)
                .with_description("Energy wave covering three rows."),
            Action::bomb("bomb", "Bomb", 25.0, Concussion, 1_000, 3_000)
                .with_description("Lobs a bomb onto the target's tile."),
            Action::new(
                "cluster_bomb",
                "Cluster Bomb",
                ActionKind::Cluster {
                    damage: 10.0,
                    delay_ms: 800,
                    count: 3,
                    interval_ms: 200,
                },
            )
            .with_damage_type(Concussion)
            .with_cooldown(4_000)
            .with_description("Three staggered bomblets on the target's tile."),
            Action::field("flame_field", "Flame Field", 4.0, Thermal, 500, 6, 5_000)
                .with_description("Sets the target's row alight for three seconds."),
            // ===== close range =====
            Action::new(
                "melee_strike",
                "Melee Strike",
                ActionKind::Melee {
                    damage: 18.0,
                    range: 1,
                },
            )
            .with_damage_type(Kinetic)
            .with_cooldown(1_000)
            .with_description("Strikes an adjacent target in the same row."),
            Action::new(
                "cleave",
                "Cleave",
                ActionKind::WideMelee {
                    damage: 14.0,
                    range: 1,
                },
            )
            .with_damage_type(Kinetic)
            .with_cooldown(1_500)
            .with_description("Sweeping strike that also reaches neighbouring rows."),
            Action::new("dash_strike", "Dash Strike", ActionKind::Dash { damage: 15.0 })
                .with_damage_type(Kinetic)
                .with_cooldown(2_500)
                .with_description("Rushes to the front line and strikes."),
            Action::new(
                "retreat_fire",
                "Retreat Fire",
                ActionKind::Retreat { damage: 8.0 },
            )
            .with_damage_type(Kinetic)
            .with_cooldown(2_000)
            .with_description("Falls back to the rear line while firing."),
            Action::new(
                "drain_beam",
                "Drain Beam",
                ActionKind::Drain {
                    damage: 10.0,
                    heal_ratio: 0.5,
                },
            )
            .with_damage_type(Energy)
            .with_cooldown(2_500)
            .with_description("Siphons the target, repairing half the HP damage dealt."),
            // ===== support =====
            Action::heal("repair", "Repair", 20.0, 5_000).with_description("Restores 20 HP."),
            Action::new(
                "nano_repair",
                "Nano Repair",
                ActionKind::HealOverTime {
                    amount_per_tick: 5.0,
                    tick_ms: 500,
                    ticks: 6,
                },
            )
            .with_cooldown(8_000)
            .with_description("Restores 5 HP every half second for three seconds."),
            Action::new("barrier", "Barrier", ActionKind::Barrier { duration_ms: 1_500 })
                .with_cooldown(6_000)
                .with_description("Blocks incoming projectiles."),
            Action::new(
                "shield_boost",
                "Shield Boost",
                ActionKind::Shield {
                    amount: 30.0,
                    duration_ms: 5_000,
                },
            )
            .with_cooldown(8_000)
            .with_description("Temporary overshield that absorbs damage first."),
            Action::new(
                "counter",
                "Counter",
                ActionKind::Counter {
                    ratio: 0.5,
                    duration_ms: 2_000,
                },
            )
            .with_cooldown(6_000)
            .with_description("Reflects half of incoming damage back at the attacker."),
            Action::new(
                "invincible",
                "Invincible",
                ActionKind::Invincible { duration_ms: 1_000 },
            )
            .with_cooldown(12_000)
            .with_description("Ignores all damage for one second."),
            Action::new(
                "overclock",
                "Overclock",
                ActionKind::Buff {
                    stat: BuffStat::Damage,
                    multiplier: 1.5,
                    duration_ms: 4_000,
                },
            )
            .with_cooldown(10_000)
            .with_description("Outgoing damage ×1.5 for four seconds."),
            Action::new(
                "quick_cycle",
                "Quick Cycle",
                ActionKind::Buff {
                    stat: BuffStat::Cooldown,
                    multiplier: 0.7,
                    duration_ms: 4_000,
                },
            )
            .with_cooldown(10_000)
            .with_description("Cooldowns ×0.7 for four seconds."),
            // ===== movement =====
            movement("move_up", "Move Up", MoveRule::Up, 300),
            movement("move_down", "Move Down", MoveRule::Down, 300),
            movement("move_forward", "Move Forward", MoveRule::Forward, 300),
            movement("move_back", "Move Back", MoveRule::Back, 300),
            movement("align", "Align", MoveRule::Align, 400),
            movement("dodge", "Dodge", MoveRule::Dodge, 600)
                .with_description("Steps to a random free neighbouring tile."),
        ];

        actions.into_iter().collect()
    }
}

fn movement(id: &str, name: &str, rule: MoveRule, cooldown_ms: Millis) -> Action {
    Action::new(id, name, ActionKind::Move { rule }).with_cooldown(cooldown_ms)
}

impl FromIterator<Action> for ActionCatalog {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for action in iter {
            catalog.insert(action);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registers_every_named_action() {
        let catalog = ActionCatalog::builtin();
        for id in [
            "basic_shot",
            "plasma_bolt",
            "flame_shot",
            "virus_dart",
            "acid_shot",
            "frost_shot",
            "homing_missile",
            "rail_piercer",
            "rapid_fire",
            "shockwave",
            "spread_wave",
            "bomb",
            "cluster_bomb",
            "flame_field",
            "melee_strike",
            "cleave",
            "triple_shot",
            "drain_beam",
            "repair",
            "nano_repair",
            "barrier",
            "shield_boost",
            "counter",
            "invincible",
            "overclock",
            "quick_cycle",
            "move_up",
            "move_down",
            "move_forward",
            "move_back",
            "align",
            "dodge",
            "dash_strike",
            "retreat_fire",
        ] {
            assert!(catalog.contains(id), "missing {id}");
        }
        assert_eq!(catalog.len(), 34);
    }

    #[test]
    fn iterates_in_id_order() {
        let catalog = ActionCatalog::builtin();
        let ids: Vec<&str> = catalog.iter().map(|a| a.id.as_str()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }
}
