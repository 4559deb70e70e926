//! Meta-progression damage bonuses folded into actions before a battle.
//!
//! Bonuses follow a layered order:
//! Flat → %Inc → More
//!
//! The engine never sees a bonus; [`Action::with_bonus`](super::Action::with_bonus)
//! bakes the result into the action's damage figure.

/// A single modifier to an action's outgoing damage.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bonus {
    /// Flat additive bonus (applied first)
    Flat(f32),

    /// Percentage increase, summed with other increases before multiplying.
    /// `20.0` = +20%.
    Increased(f32),

    /// Multiplier applied sequentially after increases. `50.0` = ×1.5.
    More(f32),
}

/// Ordered collection of damage bonuses.
///
/// # Example
/// ```
/// # use battle_core::action::DamageBonus;
/// let bonus = DamageBonus::new().flat(2.0).increased(10.0).increased(10.0).more(50.0);
/// // (10 + 2) × 1.2 × 1.5
/// assert!((bonus.apply(10.0) - 21.6).abs() < 1e-4);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageBonus {
    bonuses: Vec<Bonus>,
}

impl DamageBonus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    pub fn flat(mut self, value: f32) -> Self {
        self.add(Bonus::Flat(value));
        self
    }

    pub fn increased(mut self, percent: f32) -> Self {
        self.add(Bonus::Increased(percent));
        self
    }

    pub fn more(mut self, percent: f32) -> Self {
        self.add(Bonus::More(percent));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    /// Applies every bonus to `base`. Never returns a negative value.
    ///
    /// ```text
    /// result = max(0, (base + flat_sum) × (1 + inc_sum/100) × Π(1 + more/100))
    /// ```
    pub fn apply(&self, base: f32) -> f32 {
        let flat_sum: f32 = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Flat(v) => Some(*v),
                _ => None,
            })
            .sum();

        let inc_sum: f32 = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Increased(p) => Some(*p),
                _ => None,
            })
            .sum();

        let after_inc = (base + flat_sum) * (1.0 + inc_sum / 100.0);

        let after_more = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::More(p) => Some(*p),
                _ => None,
            })
            .fold(after_inc, |acc, more| acc * (1.0 + more / 100.0));

        after_more.max(0.0)
    }
}

impl Extend<Bonus> for DamageBonus {
    fn extend<I: IntoIterator<Item = Bonus>>(&mut self, iter: I) {
        self.bonuses.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stack_is_identity() {
        assert_eq!(DamageBonus::new().apply(12.0), 12.0);
    }

    #[test]
    fn flat_applies_before_percent() {
        let bonus = DamageBonus::new().increased(50.0).flat(4.0);
        assert_eq!(bonus.apply(10.0), 21.0);
    }

    #[test]
    fn result_never_negative() {
        let bonus = DamageBonus::new().flat(-20.0);
        assert_eq!(bonus.apply(10.0), 0.0);
    }
}
