use crate::state::Millis;

/// Battle configuration constants and tunable parameters.
///
/// Compile-time capacities live as associated constants; everything a
/// designer may want to rebalance is a field with a default.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Cadence of HP history samples.
    pub history_interval_ms: Millis,
    /// Cadence of Burn damage ticks.
    pub burn_interval_ms: Millis,
    /// Frame length that projectile speed is expressed against.
    pub reference_frame_ms: f32,
    /// Grid units a projectile travels per reference frame.
    pub projectile_speed: f32,
    /// Maximum horizontal distance at which a projectile connects.
    pub hit_radius: f32,
    /// Armor mitigation curve constant: `armor / (armor + armor_constant)`.
    pub armor_constant: f32,
    /// Whether Lag stutter and cooldown penalties also apply to the player.
    pub lag_affects_player: bool,
    pub status: StatusTuning,
}

/// Numbers behind the four stacking status effects and the instant
/// Corrosive strip.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatusTuning {
    pub burn_damage_per_stack: f32,
    pub burn_duration_ms: Millis,
    /// HP damage multiplier indexed by active Viral stack count (0..=5).
    pub viral_amplification: [f32; BattleConfig::MAX_STACKS + 1],
    pub viral_duration_ms: Millis,
    /// Fraction of current shields removed when an EMP stack lands.
    pub emp_shield_drain: f32,
    pub emp_duration_ms: Millis,
    pub lag_cooldown_per_stack: f32,
    pub lag_failure_per_stack: f32,
    pub lag_duration_ms: Millis,
    /// Fraction of current armor removed by a Corrosive hit.
    pub corrosive_armor_strip: f32,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    pub const GRID_WIDTH: i32 = 6;
    pub const GRID_HEIGHT: i32 = 3;
    /// Stack cap for every status kind.
    pub const MAX_STACKS: usize = 5;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_HISTORY_INTERVAL_MS: Millis = 500;
    pub const DEFAULT_BURN_INTERVAL_MS: Millis = 500;
    pub const DEFAULT_REFERENCE_FRAME_MS: f32 = 16.0;
    pub const DEFAULT_PROJECTILE_SPEED: f32 = 0.15;
    pub const DEFAULT_HIT_RADIUS: f32 = 0.6;
    pub const DEFAULT_ARMOR_CONSTANT: f32 = 300.0;

    pub fn new() -> Self {
        Self {
            history_interval_ms: Self::DEFAULT_HISTORY_INTERVAL_MS,
            burn_interval_ms: Self::DEFAULT_BURN_INTERVAL_MS,
            reference_frame_ms: Self::DEFAULT_REFERENCE_FRAME_MS,
            projectile_speed: Self::DEFAULT_PROJECTILE_SPEED,
            hit_radius: Self::DEFAULT_HIT_RADIUS,
            armor_constant: Self::DEFAULT_ARMOR_CONSTANT,
            lag_affects_player: false,
            status: StatusTuning::default(),
        }
    }

    /// Distance a projectile covers during `delta_ms`.
    pub fn projectile_step(&self, delta_ms: Millis) -> f32 {
        self.projectile_speed * (delta_ms as f32 / self.reference_frame_ms)
    }

    /// Reference-frame boundaries crossed in `(from, to]`.
    pub fn frames_between(&self, from: Millis, to: Millis) -> u64 {
        let frame = f64::from(self.reference_frame_ms.max(1.0));
        let crossed = (to as f64 / frame).floor() - (from as f64 / frame).floor();
        crossed.max(0.0) as u64
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusTuning {
    /// Viral multiplier for the given stack count, saturating at the cap.
    pub fn viral_multiplier(&self, stacks: usize) -> f32 {
        self.viral_amplification[stacks.min(BattleConfig::MAX_STACKS)]
    }
}

impl Default for StatusTuning {
    fn default() -> Self {
        Self {
            burn_damage_per_stack: 3.0,
            burn_duration_ms: 4_000,
            viral_amplification: [1.0, 1.0, 1.25, 1.5, 1.75, 2.0],
            viral_duration_ms: 10_000,
            emp_shield_drain: 0.08,
            emp_duration_ms: 5_000,
            lag_cooldown_per_stack: 0.15,
            lag_failure_per_stack: 0.05,
            lag_duration_ms: 6_000,
            corrosive_armor_strip: 0.10,
        }
    }
}
