//! The opposed swerve roll.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{DIE_SIDES, ExplodingRoll, roll_die, roll_exploding};

/// The result of an opposed exploding-dice roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Swerve {
    /// Kept dice of the positive stack.
    pub positive_rolls: Vec<u32>,
    /// Kept dice of the negative stack.
    pub negative_rolls: Vec<u32>,
    /// Sum of the positive stack.
    pub positive: u32,
    /// Sum of the negative stack.
    pub negative: u32,
    /// `positive - negative`.
    pub result: i32,
    /// Both stacks opened with a 6. Resolved by the caller, not here.
    pub boxcars: bool,
}

impl Swerve {
    /// Combine two exploding rolls into a swerve.
    pub fn from_rolls(positive: ExplodingRoll, negative: ExplodingRoll) -> Self {
        let boxcars = positive.rolls.first() == Some(&DIE_SIDES)
            && negative.rolls.first() == Some(&DIE_SIDES);
        let result = positive.total as i32 - negative.total as i32;
        Self {
            positive_rolls: positive.rolls,
            negative_rolls: negative.rolls,
            positive: positive.total,
            negative: negative.total,
            result,
            boxcars,
        }
    }
}

impl std::fmt::Display for Swerve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let join = |rolls: &[u32]| {
            rolls
                .iter()
                .map(|r| r.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        write!(
            f,
            "[{}] - [{}] = {:+}",
            join(&self.positive_rolls),
            join(&self.negative_rolls),
            self.result
        )?;
        if self.boxcars {
            write!(f, " (boxcars)")?;
        }
        Ok(())
    }
}

/// Roll a swerve with the given RNG.
pub fn roll_swerve<R: Rng + ?Sized>(rng: &mut R) -> Swerve {
    roll_swerve_with(|| roll_die(rng))
}

/// Roll a swerve from a source of single die results. The positive stack
/// is rolled to completion before the negative stack starts.
pub fn roll_swerve_with<F: FnMut() -> u32>(mut roll: F) -> Swerve {
    let positive = roll_exploding(&mut roll);
    let negative = roll_exploding(&mut roll);
    let swerve = Swerve::from_rolls(positive, negative);
    if swerve.boxcars {
        tracing::debug!(result = swerve.result, "boxcars rolled");
    }
    swerve
}
