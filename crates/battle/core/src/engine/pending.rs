//! Deferred sub-effects keyed by simulated time.
//!
//! Multi-hit and delayed actions schedule their later parts here instead of
//! relying on host timers. Entries drain in (due time, insertion order).

use std::collections::BTreeMap;

use crate::combat::DamageType;
use crate::state::{Millis, Position, ProjectileFlavor, Side};

/// A sub-effect waiting for its due time.
#[derive(Clone, Debug, PartialEq)]
pub enum PendingEffect {
    /// Fires a projectile from the owner's position at due time.
    Projectile {
        owner: Side,
        damage: f32,
        damage_type: DamageType,
        status_chance: f32,
        flavor: ProjectileFlavor,
    },
    /// Hits the opponent if it stands on `target`.
    Detonation {
        owner: Side,
        target: Position,
        damage: f32,
        damage_type: DamageType,
    },
    /// Hits the opponent if it stands anywhere in `row`.
    FieldPulse {
        owner: Side,
        row: i32,
        damage: f32,
        damage_type: DamageType,
    },
    Heal {
        side: Side,
        amount: f32,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PendingQueue {
    entries: BTreeMap<(Millis, u64), PendingEffect>,
    next_seq: u64,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: Millis, effect: PendingEffect) {
        self.entries.insert((due_ms, self.next_seq), effect);
        self.next_seq += 1;
    }

    /// Removes and returns the earliest entry due at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<(Millis, PendingEffect)> {
        let (&(due, _), _) = self.entries.first_key_value()?;
        if due > now {
            return None;
        }
        self.entries
            .pop_first()
            .map(|((due, _), effect)| (due, effect))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heal(amount: f32) -> PendingEffect {
        PendingEffect::Heal {
            side: Side::Player,
            amount,
        }
    }

    #[test]
    fn drains_in_due_then_insertion_order() {
        let mut queue = PendingQueue::new();
        queue.schedule(200, heal(1.0));
        queue.schedule(100, heal(2.0));
        queue.schedule(100, heal(3.0));

        assert_eq!(queue.pop_due(150), Some((100, heal(2.0))));
        assert_eq!(queue.pop_due(150), Some((100, heal(3.0))));
        assert_eq!(queue.pop_due(150), None);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop_due(200), Some((200, heal(1.0))));
        assert!(queue.is_empty());
    }
}
