//! Pre-configured combat rules.
//!
//! These produce the same [`CombatRules`] that loading an empty JSON
//! document would.

use crate::rules::{CombatRules, ImpairmentThresholds};

/// Standard rules.
///
/// PCs and most NPCs gain a point of impairment at 25 and 30 wounds,
/// Bosses and Uber-Bosses at 40 and 45. Unlisted skills are 7, unarmed
/// damage is 7, a kachunk hits for 14. Attacks cost 3 shots; chase actions
/// cost 3, or 2 for Boss drivers.
pub fn standard() -> CombatRules {
    CombatRules {
        impairment_thresholds: ImpairmentThresholds {
            standard: vec![25, 30],
            boss: vec![40, 45],
        },
        default_skill: 7,
        unarmed_damage: 7,
        kachunk_damage: 14,
        attack_shot_cost: 3,
        chase_shot_cost: 3,
        boss_chase_shot_cost: 2,
        default_main_attack: "Guns".to_string(),
        default_fortune_type: "Fortune".to_string(),
        chase_point_limit: 35,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_preset() {
        let rules = standard();
        assert_eq!(rules.default_skill, 7);
        assert_eq!(rules.kachunk_damage, 14);
        assert_eq!(rules.default_main_attack, "Guns");
        assert_eq!(rules.impairment_thresholds, ImpairmentThresholds::default());
    }

    #[test]
    fn standard_preset_is_already_normalized() {
        let rules = standard();
        assert_eq!(rules.clone().normalized().unwrap(), rules);
    }
}
