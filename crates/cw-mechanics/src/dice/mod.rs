//! Six-sided dice, exploding rolls, and the opposed swerve.
//!
//! Everything rolls a d6. An exploding roll keeps rolling while the most
//! recent die shows a 6 and keeps every die it rolled. A swerve is two
//! exploding rolls subtracted from each other.

pub mod swerve;

pub use swerve::{Swerve, roll_swerve, roll_swerve_with};

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of sides on every die the engine rolls.
pub const DIE_SIDES: u32 = 6;

/// Roll a single d6.
pub fn roll_die<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.random_range(1..=DIE_SIDES)
}

/// The kept dice of an exploding roll and their sum.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExplodingRoll {
    /// Every die rolled, in order. Only the last one is not a 6.
    pub rolls: Vec<u32>,
    /// Sum of `rolls`.
    pub total: u32,
}

impl ExplodingRoll {
    /// Returns true if the first die came up 6.
    pub fn exploded(&self) -> bool {
        self.rolls.first() == Some(&DIE_SIDES)
    }
}

impl std::fmt::Display for ExplodingRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.rolls.iter().map(|r| r.to_string()).collect();
        write!(f, "[{}] = {}", values.join(", "), self.total)
    }
}

/// Roll an exploding die using `roll` as the source of single die results.
///
/// Values outside 1..=6 coming from `roll` are clamped into range.
pub fn roll_exploding<F: FnMut() -> u32>(mut roll: F) -> ExplodingRoll {
    let mut rolls = Vec::new();
    loop {
        let value = roll().clamp(1, DIE_SIDES);
        rolls.push(value);
        if value != DIE_SIDES {
            break;
        }
    }
    let total = rolls.iter().sum();
    if rolls.len() > 1 {
        tracing::trace!(?rolls, total, "die exploded");
    }
    ExplodingRoll { rolls, total }
}

/// Build a roll source that replays fixed values. Panics if it runs dry,
/// so it is only meant for scripted rolls in tests and replays.
#[cfg(test)]
pub(crate) fn scripted(values: &[u32]) -> impl FnMut() -> u32 + '_ {
    let mut iter = values.iter().copied();
    move || iter.next().expect("scripted rolls exhausted")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn roll_die_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            assert!((1..=6).contains(&roll_die(&mut rng)));
        }
    }

    #[test]
    fn non_six_stops_immediately() {
        let r = roll_exploding(scripted(&[4]));
        assert_eq!(r.rolls, vec![4]);
        assert_eq!(r.total, 4);
        assert!(!r.exploded());
    }

    #[test]
    fn sixes_chain_until_non_six() {
        let r = roll_exploding(scripted(&[6, 6, 2, 5]));
        assert_eq!(r.rolls, vec![6, 6, 2]);
        assert_eq!(r.total, 14);
        assert!(r.exploded());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let r = roll_exploding(scripted(&[9, 0]));
        assert_eq!(r.rolls, vec![6, 1]);
        assert_eq!(r.total, 7);
    }

    #[test]
    fn seeded_rolls_are_deterministic() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let ra = roll_exploding(|| roll_die(&mut a));
        let rb = roll_exploding(|| roll_die(&mut b));
        assert_eq!(ra, rb);
    }

    #[test]
    fn display() {
        let r = roll_exploding(scripted(&[6, 3]));
        assert_eq!(r.to_string(), "[6, 3] = 9");
    }
}
