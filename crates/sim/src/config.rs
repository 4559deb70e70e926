//! Runner configuration structures and loaders.
use std::env;

use battle_core::Millis;

/// Cadence and limits of a headless battle run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Seed for the battle's random source.
    pub seed: u64,
    /// Simulated milliseconds per tick.
    pub tick_ms: Millis,
    /// Simulated time after which an unfinished battle is abandoned.
    pub max_ms: Millis,
}

impl SimConfig {
    pub const DEFAULT_TICK_MS: Millis = 16;
    pub const DEFAULT_MAX_MS: Millis = 180_000;

    /// Construct configuration from process environment variables.
    ///
    /// - `BATTLE_SEED`
    /// - `BATTLE_TICK_MS`
    /// - `BATTLE_MAX_MS`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("BATTLE_SEED") {
            config.seed = seed;
        }

        if let Some(tick_ms) = read_env::<Millis>("BATTLE_TICK_MS") {
            config.tick_ms = tick_ms.max(1);
        }

        if let Some(max_ms) = read_env::<Millis>("BATTLE_MAX_MS") {
            config.max_ms = max_ms;
        }

        config
    }

    /// Applies command-line values on top of this configuration.
    pub fn with_overrides(
        mut self,
        seed: Option<u64>,
        tick_ms: Option<Millis>,
        max_ms: Option<Millis>,
    ) -> Self {
        if let Some(seed) = seed {
            self.seed = seed;
        }
        if let Some(tick_ms) = tick_ms {
            self.tick_ms = tick_ms.max(1);
        }
        if let Some(max_ms) = max_ms {
            self.max_ms = max_ms;
        }
        self
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            tick_ms: Self::DEFAULT_TICK_MS,
            max_ms: Self::DEFAULT_MAX_MS,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_and_clamp() {
        let config = SimConfig::default().with_overrides(Some(7), Some(0), None);
        assert_eq!(config.seed, 7);
        assert_eq!(config.tick_ms, 1);
        assert_eq!(config.max_ms, SimConfig::DEFAULT_MAX_MS);
    }
}
