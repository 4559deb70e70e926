use std::collections::BTreeMap;

use super::{Trigger, TriggerCondition};

/// Registry of triggers keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriggerCatalog {
    triggers: BTreeMap<String, Trigger>,
}

impl TriggerCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, trigger: Trigger) -> Option<Trigger> {
        self.triggers.insert(trigger.id.clone(), trigger)
    }

    pub fn get(&self, id: &str) -> Option<&Trigger> {
        self.triggers.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.triggers.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trigger> {
        self.triggers.values()
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    pub fn builtin() -> Self {
        use TriggerCondition::*;

        [
            Trigger::new("always", "Always", Always),
            Trigger::new("hp_below_50", "HP < 50%", HpBelow(0.5)),
            Trigger::new("hp_below_25", "HP < 25%", HpBelow(0.25)),
            Trigger::new("hp_above_75", "HP > 75%", HpAbove(0.75)),
            Trigger::new("enemy_hp_below_30", "Enemy HP < 30%", EnemyHpBelow(0.3)),
            Trigger::new("same_row", "Same Row", SameRow),
            Trigger::new("different_row", "Different Row", DifferentRow),
            Trigger::new("enemy_above", "Enemy Above", EnemyAbove),
            Trigger::new("enemy_below", "Enemy Below", EnemyBelow),
            Trigger::new("enemy_close", "Enemy Close", Distance { min: 0, max: 2 })
                .with_description("Opponent within two columns."),
            Trigger::new("enemy_mid", "Enemy Mid", Distance { min: 3, max: 3 })
                .with_description("Opponent exactly three columns away."),
            Trigger::new("enemy_far", "Enemy Far", Distance { min: 4, max: i32::MAX })
                .with_description("Opponent four or more columns away."),
            Trigger::new("just_damaged", "Just Damaged", JustTookDamage)
                .with_description("Took damage since the previous tick."),
            Trigger::new(
                "low_hp_and_damaged",
                "Low HP & Damaged",
                And(vec![HpBelow(0.5), JustTookDamage]),
            ),
        ]
        .into_iter()
        .collect()
    }
}

impl FromIterator<Trigger> for TriggerCatalog {
    fn from_iter<I: IntoIterator<Item = Trigger>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for trigger in iter {
            catalog.insert(trigger);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::BattleContext;
    use crate::state::{BattleState, Fighter, InitialState, Position, Side};

    fn context(player_x: i32, enemy_x: i32) -> BattleContext {
        let initial = InitialState::new(
            Fighter::new(Position::new(player_x, 1), 100.0),
            Fighter::new(Position::new(enemy_x, 1), 100.0),
        );
        BattleContext::capture(
            &BattleState::from_initial(initial, None, None),
            Side::Player,
            true,
        )
    }

    #[test]
    fn distance_bands_partition_columns() {
        let catalog = TriggerCatalog::builtin();
        let band = |player_x, enemy_x| {
            let ctx = context(player_x, enemy_x);
            ["enemy_close", "enemy_mid", "enemy_far"]
                .into_iter()
                .filter(|id| catalog.get(id).is_some_and(|t| t.evaluate(&ctx)))
                .collect::<Vec<_>>()
        };
        assert_eq!(band(2, 3), vec!["enemy_close"]);
        assert_eq!(band(2, 4), vec!["enemy_close"]);
        assert_eq!(band(1, 4), vec!["enemy_mid"]);
        assert_eq!(band(0, 5), vec!["enemy_far"]);
    }

    #[test]
    fn builtin_has_fourteen_triggers() {
        assert_eq!(TriggerCatalog::builtin().len(), 14);
    }

    #[test]
    fn low_hp_and_damaged_needs_both() {
        let catalog = TriggerCatalog::builtin();
        let trigger = catalog.get("low_hp_and_damaged").cloned();
        let Some(trigger) = trigger else {
            panic!("missing trigger");
        };
        let mut ctx = context(0, 5);
        assert!(!trigger.evaluate(&ctx));
        ctx.own_hp = 40.0;
        assert!(trigger.evaluate(&ctx));
        ctx.just_took_damage = false;
        assert!(!trigger.evaluate(&ctx));
    }
}
