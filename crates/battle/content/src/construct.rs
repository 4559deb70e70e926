//! Construct baselines: the chassis a fighter is spawned from.

use std::collections::BTreeMap;

use battle_core::{Armor, DamageType, Fighter, Millis, Position, Resistances, Shields};

/// Shield layer of a construct.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShieldSpec {
    pub max: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub regen_per_sec: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub regen_delay_ms: Millis,
}

/// Baseline stats of one construct.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstructSpec {
    pub id: String,
    pub name: String,
    pub max_hp: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub shields: Option<ShieldSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub armor: Option<f32>,
    /// Fraction of incoming damage resisted, per damage type.
    #[cfg_attr(feature = "serde", serde(default))]
    pub resistances: BTreeMap<DamageType, f32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status_immune: bool,
}

impl ConstructSpec {
    pub fn new(id: impl Into<String>, name: impl Into<String>, max_hp: f32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            max_hp,
            shields: None,
            armor: None,
            resistances: BTreeMap::new(),
            status_immune: false,
        }
    }

    /// Builds a full-health fighter standing on `position`.
    pub fn spawn(&self, position: Position) -> Fighter {
        let resistances = self
            .resistances
            .iter()
            .fold(Resistances::new(), |acc, (&damage_type, &fraction)| {
                acc.with(damage_type, fraction)
            });

        let mut fighter = Fighter::new(position, self.max_hp)
            .with_resistances(resistances)
            .with_status_immunity(self.status_immune);
        if let Some(spec) = self.shields {
            let shields =
                Shields::new(spec.max).with_regen(spec.regen_per_sec, spec.regen_delay_ms);
            fighter = fighter.with_shields(shields);
        }
        if let Some(armor) = self.armor {
            fighter = fighter.with_armor(Armor::new(armor));
        }
        fighter
    }
}

/// Constructs keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConstructCatalog {
    constructs: BTreeMap<String, ConstructSpec>,
}

impl ConstructCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `spec`, returning the construct it replaced.
    pub fn insert(&mut self, spec: ConstructSpec) -> Option<ConstructSpec> {
        self.constructs.insert(spec.id.clone(), spec)
    }

    pub fn get(&self, id: &str) -> Option<&ConstructSpec> {
        self.constructs.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConstructSpec> {
        self.constructs.values()
    }

    pub fn len(&self) -> usize {
        self.constructs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructs.is_empty()
    }

    /// Spawns construct `id` at `position`, or `None` if the id is unknown.
    pub fn spawn(&self, id: &str, position: Position) -> Option<Fighter> {
        self.get(id).map(|spec| spec.spawn(position))
    }
}

impl FromIterator<ConstructSpec> for ConstructCatalog {
    fn from_iter<I: IntoIterator<Item = ConstructSpec>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for spec in iter {
            catalog.insert(spec);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_carries_every_layer() {
        let mut spec = ConstructSpec::new("tank", "Tank", 150.0);
        spec.shields = Some(ShieldSpec {
            max: 40.0,
            regen_per_sec: 5.0,
            regen_delay_ms: 1_000,
        });
        spec.armor = Some(120.0);
        spec.resistances.insert(DamageType::Thermal, 0.25);

        let fighter = spec.spawn(Position::new(4, 1));
        assert_eq!(fighter.position, Position::new(4, 1));
        assert_eq!(fighter.hp.current, 150.0);
        assert_eq!(fighter.shield_points(), 40.0);
        assert_eq!(fighter.armor_points(), 120.0);
        assert_eq!(fighter.resistances.get(DamageType::Thermal), 0.25);
        assert_eq!(fighter.resistances.get(DamageType::Kinetic), 0.0);
    }

    #[test]
    fn unknown_construct_does_not_spawn() {
        let catalog: ConstructCatalog =
            [ConstructSpec::new("scout", "Scout", 80.0)].into_iter().collect();
        assert!(catalog.spawn("scout", Position::new(1, 1)).is_some());
        assert!(catalog.spawn("titan", Position::new(1, 1)).is_none());
    }
}
