use std::collections::BTreeMap;

use crate::state::Millis;

/// Remaining cooldown per action id for one side.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cooldowns {
    remaining: BTreeMap<String, f32>,
}

impl Cooldowns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every timer down by `delta_ms`, dropping the finished ones.
    pub fn advance(&mut self, delta_ms: Millis) {
        let delta = delta_ms as f32;
        for remaining in self.remaining.values_mut() {
            *remaining -= delta;
        }
        self.remaining.retain(|_, remaining| *remaining > 0.0);
    }

    pub fn is_ready(&self, action_id: &str) -> bool {
        !self.remaining.contains_key(action_id)
    }

    /// Remaining milliseconds for `action_id` (0 when ready).
    pub fn remaining(&self, action_id: &str) -> f32 {
        self.remaining.get(action_id).copied().unwrap_or(0.0)
    }

    pub fn start(&mut self, action_id: &str, duration_ms: f32) {
        if duration_ms > 0.0 {
            self.remaining.insert(action_id.to_owned(), duration_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_until_fully_elapsed() {
        let mut cooldowns = Cooldowns::new();
        cooldowns.start("basic_shot", 1_000.0);

        cooldowns.advance(16);
        cooldowns.advance(16);
        assert!(!cooldowns.is_ready("basic_shot"));
        assert_eq!(cooldowns.remaining("basic_shot"), 968.0);

        cooldowns.advance(968);
        assert!(cooldowns.is_ready("basic_shot"));
    }

    #[test]
    fn zero_cooldown_is_always_ready() {
        let mut cooldowns = Cooldowns::new();
        cooldowns.start("move_up", 0.0);
        assert!(cooldowns.is_ready("move_up"));
    }
}
