//! Damage types and the per-type interaction table.

use crate::state::Fighter;

// ============================================================================
// Damage Type
// ============================================================================

/// Damage type for resistances, layer interactions and status application.
///
/// `Concussion` is the canonical name of the blast family; content that
/// still says `Explosive` parses to the same variant.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageType {
    /// Plain physical impact. No status.
    #[default]
    Kinetic,
    /// Strong against shields, weak against armor. Drains shields and applies EMP.
    Energy,
    /// Applies Burn.
    Thermal,
    /// Applies Viral.
    Viral,
    /// Strips armor.
    Corrosive,
    /// Blast damage. No status.
    #[strum(to_string = "concussion", serialize = "explosive")]
    #[cfg_attr(feature = "serde", serde(alias = "Explosive", alias = "explosive"))]
    Concussion,
    /// Slightly weak against shields. Applies Lag.
    Glacial,
}

// ============================================================================
// Interaction Table
// ============================================================================

/// Multiplier applied to a hit of `damage_type` against the defender's
/// current layers.
///
/// ```text
/// Energy:  ×2.0 vs shields, ×0.5 vs armor (no shields), ×1.0 otherwise
/// Glacial: ×0.9 vs shields, ×1.0 otherwise
/// others:  ×1.0
/// ```
pub fn type_multiplier(damage_type: DamageType, defender: &Fighter) -> f32 {
    let shielded = defender.shield_points() > 0.0;
    let armored = defender.armor_points() > 0.0;

    match damage_type {
        DamageType::Energy if shielded => 2.0,
        DamageType::Energy if armored => 0.5,
        DamageType::Glacial if shielded => 0.9,
        _ => 1.0,
    }
}

/// Diminishing-returns armor curve. Approaches but never reaches full
/// mitigation.
pub fn armor_mitigation(damage: f32, armor: f32, armor_constant: f32) -> f32 {
    if armor <= 0.0 {
        return damage;
    }
    damage * (1.0 - armor / (armor + armor_constant))
}
