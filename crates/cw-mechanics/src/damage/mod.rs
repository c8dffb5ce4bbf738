//! Wounds, impairment, mooks, and death marks.
//!
//! Each operation takes a snapshot and returns a new one. Wounds and
//! impairment are computed in full before the result is built, so no
//! caller ever sees a half-applied or negative state. Mooks are tracked by
//! headcount instead of wounds and never gain impairment.

pub mod vehicle;

pub use vehicle::{is_out_of_chase, take_chase_points, take_condition_points};

use cw_core::{Character, keys};

use crate::rules::CombatRules;
use crate::stats;

/// Count the thresholds crossed when a wound total moves between `old` and
/// `new`, in either direction. A threshold `t` counts when
/// `min(old, new) < t <= max(old, new)`, so reaching a threshold exactly
/// crosses it.
pub fn tiers_crossed(old: i32, new: i32, thresholds: &[i32]) -> u32 {
    let (low, high) = if old <= new { (old, new) } else { (new, old) };
    thresholds.iter().filter(|t| low < **t && **t <= high).count() as u32
}

/// A hit about to be applied to a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Smackdown {
    /// The attacker's raw hit total before toughness.
    pub total: i32,
    /// Toughness to use instead of the target's own.
    pub toughness_override: Option<i32>,
    /// Mooks taken out when the target is a mook group.
    pub mooks_defeated: u32,
}

impl Smackdown {
    /// A smackdown using the target's own toughness that takes out one mook.
    pub fn new(total: i32) -> Self {
        Self {
            total,
            toughness_override: None,
            mooks_defeated: 1,
        }
    }

    /// Use a specific toughness instead of the target's.
    pub fn with_toughness(mut self, toughness: i32) -> Self {
        self.toughness_override = Some(toughness);
        self
    }

    /// Set how many mooks the hit takes out.
    pub fn defeating(mut self, mooks: u32) -> Self {
        self.mooks_defeated = mooks;
        self
    }
}

/// Apply a smackdown. Non-mooks take `max(0, total - toughness)` wounds;
/// mooks lose `mooks_defeated` from their headcount instead.
pub fn take_smackdown(target: &Character, smackdown: &Smackdown, rules: &CombatRules) -> Character {
    if target.is_mook() {
        return kill_mooks(target, smackdown.mooks_defeated);
    }
    let toughness = smackdown
        .toughness_override
        .unwrap_or_else(|| stats::toughness(target));
    let wounds = smackdown.total.saturating_sub(toughness).max(0);
    take_raw_wounds(target, wounds, rules)
}

/// Add wounds directly, bypassing toughness. Negative amounts are ignored.
/// Mooks are returned unchanged.
pub fn take_raw_wounds(target: &Character, wounds: i32, rules: &CombatRules) -> Character {
    let mut next = target.clone();
    if target.is_mook() || wounds <= 0 {
        return next;
    }
    let old = stats::wounds(target);
    let new = old.saturating_add(wounds);
    let crossed = tiers_crossed(old, new, rules.thresholds_for(target.entity_class));
    next.impairments = target.impairments.saturating_add(crossed);
    next.action_values.set_number(keys::WOUNDS, new);
    tracing::debug!(
        character = %target.name,
        old,
        new,
        impairments = next.impairments,
        "wounds taken"
    );
    next
}

/// Heal wounds, removing impairment for every threshold healed past.
/// Wounds and impairment never drop below 0. Mooks are returned unchanged.
pub fn heal_wounds(target: &Character, amount: i32, rules: &CombatRules) -> Character {
    let mut next = target.clone();
    if target.is_mook() || amount <= 0 {
        return next;
    }
    let old = stats::wounds(target);
    let new = old.saturating_sub(amount).max(0);
    let crossed = tiers_crossed(old, new, rules.thresholds_for(target.entity_class));
    next.impairments = target.impairments.saturating_sub(crossed);
    next.action_values.set_number(keys::WOUNDS, new);
    tracing::debug!(
        character = %target.name,
        old,
        new,
        impairments = next.impairments,
        "wounds healed"
    );
    next
}

/// Reset wounds, marks of death, and impairment, and refill fortune.
/// Mooks are returned unchanged.
pub fn full_heal(target: &Character) -> Character {
    let mut next = target.clone();
    if target.is_mook() {
        return next;
    }
    next.action_values.set_number(keys::WOUNDS, 0);
    next.action_values.set_number(keys::MARKS_OF_DEATH, 0);
    if target.action_values.get(keys::MAX_FORTUNE).is_some()
        || target.action_values.get(keys::FORTUNE).is_some()
    {
        next.action_values
            .set_number(keys::FORTUNE, stats::max_fortune(target));
    }
    next.impairments = 0;
    next
}

/// Remove up to `count` mooks from a mook group. Other classes are
/// returned unchanged.
pub fn kill_mooks(target: &Character, count: u32) -> Character {
    let mut next = target.clone();
    if !target.is_mook() {
        return next;
    }
    next.count = target.count.saturating_sub(count);
    tracing::debug!(
        group = %target.name,
        before = target.count,
        after = next.count,
        "mooks defeated"
    );
    next
}

/// Add (or with a negative `delta`, remove) marks of death, never below 0.
pub fn add_death_marks(target: &Character, delta: i32) -> Character {
    let marks = stats::marks_of_death(target).saturating_add(delta).max(0);
    set_death_marks(target, marks)
}

/// Set marks of death, clamped at 0.
pub fn set_death_marks(target: &Character, marks: i32) -> Character {
    let mut next = target.clone();
    next.action_values
        .set_number(keys::MARKS_OF_DEATH, marks.max(0));
    next
}

/// Deduct one point from the stored fortune pool if any is left.
pub fn spend_fortune(target: &Character) -> Character {
    let mut next = target.clone();
    let current = stats::raw_action_value(target, keys::FORTUNE);
    if current > 0 {
        next.action_values.set_number(keys::FORTUNE, current - 1);
    }
    next
}
