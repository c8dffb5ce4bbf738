//! Combat rules: the design data the engine is parameterized by.
//!
//! A [`CombatRules`] holds impairment thresholds, default values, and shot
//! costs. It can be loaded from JSON via [`CombatRules::from_json`], where
//! every field is optional, or constructed with [`preset::standard`].

pub mod preset;

use cw_core::EntityClass;
use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Wound totals at which a character gains a point of impairment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpairmentThresholds {
    /// Thresholds for PCs, Allies, NPCs, and Featured Foes.
    pub standard: Vec<i32>,
    /// Thresholds for Bosses and Uber-Bosses.
    pub boss: Vec<i32>,
}

impl Default for ImpairmentThresholds {
    fn default() -> Self {
        Self {
            standard: vec![25, 30],
            boss: vec![40, 45],
        }
    }
}

impl ImpairmentThresholds {
    /// The sorted thresholds that apply to a class. Mooks have none.
    pub fn for_class(&self, class: EntityClass) -> &[i32] {
        if class.is_mook() {
            &[]
        } else if class.is_boss_tier() {
            &self.boss
        } else {
            &self.standard
        }
    }
}

/// The complete set of tunable combat values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatRules {
    /// Impairment thresholds per class tier.
    pub impairment_thresholds: ImpairmentThresholds,
    /// Value of a skill the character has no entry for.
    pub default_skill: i32,
    /// Damage dealt without a weapon when the character has no Damage value.
    pub unarmed_damage: i32,
    /// Fixed damage of a kachunk attack, before modifiers.
    pub kachunk_damage: i32,
    /// Shot cost of a standard attack.
    pub attack_shot_cost: i32,
    /// Shot cost of a chase action.
    pub chase_shot_cost: i32,
    /// Shot cost of a chase action for Boss and Uber-Boss drivers.
    pub boss_chase_shot_cost: i32,
    /// Attack skill used when a character has no `MainAttack`.
    pub default_main_attack: String,
    /// Pool name used when a character has no `FortuneType`.
    pub default_fortune_type: String,
    /// Chase points at which a vehicle drops out of a chase.
    pub chase_point_limit: i32,
}

impl Default for CombatRules {
    fn default() -> Self {
        preset::standard()
    }
}

impl CombatRules {
    /// Load rules from JSON. Missing fields take the standard values.
    pub fn from_json(raw: &str) -> MechResult<Self> {
        let rules: Self = serde_json::from_str(raw)?;
        rules.normalized()
    }

    /// Sort and de-duplicate thresholds, and reject values the engine
    /// cannot work with.
    pub fn normalized(mut self) -> MechResult<Self> {
        for list in [
            &mut self.impairment_thresholds.standard,
            &mut self.impairment_thresholds.boss,
        ] {
            if let Some(bad) = list.iter().find(|t| **t <= 0) {
                tracing::warn!(threshold = *bad, "rejecting non-positive impairment threshold");
                return Err(MechError::InvalidConfig(format!(
                    "impairment threshold {bad} must be positive"
                )));
            }
            list.sort_unstable();
            list.dedup();
        }

        let costs = [
            ("attack_shot_cost", self.attack_shot_cost),
            ("chase_shot_cost", self.chase_shot_cost),
            ("boss_chase_shot_cost", self.boss_chase_shot_cost),
        ];
        for (name, cost) in costs {
            if cost <= 0 {
                tracing::warn!(field = name, cost, "rejecting non-positive shot cost");
                return Err(MechError::InvalidConfig(format!(
                    "{name} must be positive, got {cost}"
                )));
            }
        }

        if self.default_main_attack.trim().is_empty() {
            return Err(MechError::InvalidConfig(
                "default_main_attack must not be empty".to_string(),
            ));
        }

        Ok(self)
    }

    /// The impairment thresholds for a class.
    pub fn thresholds_for(&self, class: EntityClass) -> &[i32] {
        self.impairment_thresholds.for_class(class)
    }

    /// Default shot cost of a chase action for a driver of the given class.
    pub fn chase_cost_for(&self, driver: EntityClass) -> i32 {
        if driver.is_boss_tier() {
            self.boss_chase_shot_cost
        } else {
            self.chase_shot_cost
        }
    }
}

/// Normalize a shot cost from form input: anything not positive becomes
/// `default`.
pub fn normalize_shot_cost(cost: i32, default: i32) -> i32 {
    if cost > 0 { cost } else { default }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_standard_rules() {
        let rules = CombatRules::from_json("{}").unwrap();
        assert_eq!(rules, preset::standard());
    }

    #[test]
    fn partial_json_overrides_fields() {
        let rules = CombatRules::from_json(
            r#"{"kachunk_damage": 15, "impairment_thresholds": {"standard": [30, 20, 30]}}"#,
        )
        .unwrap();
        assert_eq!(rules.kachunk_damage, 15);
        assert_eq!(rules.impairment_thresholds.standard, vec![20, 30]);
        assert_eq!(rules.impairment_thresholds.boss, vec![40, 45]);
        assert_eq!(rules.unarmed_damage, 7);
    }

    #[test]
    fn non_positive_threshold_rejected() {
        let err = CombatRules::from_json(r#"{"impairment_thresholds": {"boss": [0, 45]}}"#)
            .unwrap_err();
        assert!(matches!(err, MechError::InvalidConfig(_)));
    }

    #[test]
    fn non_positive_shot_cost_rejected() {
        assert!(CombatRules::from_json(r#"{"chase_shot_cost": 0}"#).is_err());
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(
            CombatRules::from_json("[1, 2"),
            Err(MechError::MalformedConfig(_))
        ));
    }

    #[test]
    fn thresholds_by_class() {
        let rules = preset::standard();
        assert_eq!(rules.thresholds_for(EntityClass::Pc), &[25, 30]);
        assert_eq!(rules.thresholds_for(EntityClass::FeaturedFoe), &[25, 30]);
        assert_eq!(rules.thresholds_for(EntityClass::Boss), &[40, 45]);
        assert_eq!(rules.thresholds_for(EntityClass::UberBoss), &[40, 45]);
        assert!(rules.thresholds_for(EntityClass::Mook).is_empty());
    }

    #[test]
    fn chase_cost_by_driver() {
        let rules = preset::standard();
        assert_eq!(rules.chase_cost_for(EntityClass::Boss), 2);
        assert_eq!(rules.chase_cost_for(EntityClass::UberBoss), 2);
        assert_eq!(rules.chase_cost_for(EntityClass::Pc), 3);
    }

    #[test]
    fn normalize_shot_cost_resets_non_positive() {
        assert_eq!(normalize_shot_cost(4, 3), 4);
        assert_eq!(normalize_shot_cost(0, 3), 3);
        assert_eq!(normalize_shot_cost(-2, 2), 2);
    }
}
