//! Consistency checks for rules and character snapshots.
//!
//! Nothing here is fatal to the engine, which clamps and defaults its way
//! through bad data. These checks exist so a host can show the user what
//! it is about to silently correct.

use cw_core::{Character, Fight, keys};

use crate::rules::CombatRules;
use crate::stats;

/// A warning or error found during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Name of the character or rule set the issue belongs to.
    pub entity: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl ValidationIssue {
    fn error(entity: &str, message: String) -> Self {
        Self {
            entity: entity.to_string(),
            message,
            is_error: true,
        }
    }

    fn warning(entity: &str, message: String) -> Self {
        Self {
            entity: entity.to_string(),
            message,
            is_error: false,
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.entity, self.message)
    }
}

const RULES: &str = "combat rules";

/// Check a rule set for values the engine would reject or misread.
pub fn validate_rules(rules: &CombatRules) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let tiers = [
        ("standard", &rules.impairment_thresholds.standard),
        ("boss", &rules.impairment_thresholds.boss),
    ];
    for (tier, thresholds) in tiers {
        if thresholds.windows(2).any(|w| w[0] >= w[1]) {
            issues.push(ValidationIssue::warning(
                RULES,
                format!("{tier} impairment thresholds {thresholds:?} are not strictly ascending"),
            ));
        }
        if thresholds.iter().any(|t| *t <= 0) {
            issues.push(ValidationIssue::error(
                RULES,
                format!("{tier} impairment thresholds must be positive"),
            ));
        }
    }

    for (name, cost) in [
        ("attack_shot_cost", rules.attack_shot_cost),
        ("chase_shot_cost", rules.chase_shot_cost),
        ("boss_chase_shot_cost", rules.boss_chase_shot_cost),
    ] {
        if cost <= 0 {
            issues.push(ValidationIssue::error(
                RULES,
                format!("{name} must be positive, got {cost}"),
            ));
        }
    }

    if rules.default_skill <= 0 {
        issues.push(ValidationIssue::warning(
            RULES,
            format!("default_skill is {}", rules.default_skill),
        ));
    }

    issues
}

/// Check a character snapshot against the rules.
pub fn validate_character(character: &Character, rules: &CombatRules) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let name = character.name.as_str();

    for (key, value) in character.action_values.iter() {
        if let Some(n) = value.as_number().filter(|n| *n < 0) {
            issues.push(ValidationIssue::error(
                name,
                format!("action value '{key}' is negative ({n})"),
            ));
        }
    }

    if character.is_mook() {
        if stats::wounds(character) > 0 {
            issues.push(ValidationIssue::warning(
                name,
                "mooks are tracked by count; stored wounds are ignored".to_string(),
            ));
        }
        if character.impairments > 0 {
            issues.push(ValidationIssue::warning(
                name,
                "mooks never take impairment".to_string(),
            ));
        }
    } else if character.count > 0 {
        issues.push(ValidationIssue::warning(
            name,
            format!("count {} is only used for mooks", character.count),
        ));
    }

    let main = stats::main_attack(character, rules);
    if character.action_values.number(&main).is_none() {
        issues.push(ValidationIssue::warning(
            name,
            format!("main attack '{main}' has no value"),
        ));
    }
    let secondary = stats::secondary_attack(character);
    if !secondary.is_empty() && character.action_values.number(&secondary).is_none() {
        issues.push(ValidationIssue::warning(
            name,
            format!("secondary attack '{secondary}' has no value"),
        ));
    }

    if stats::raw_action_value(character, keys::FORTUNE) > stats::max_fortune(character)
        && character.action_values.get(keys::MAX_FORTUNE).is_some()
    {
        issues.push(ValidationIssue::warning(
            name,
            format!(
                "{} exceeds its maximum",
                stats::fortune_type(character, rules)
            ),
        ));
    }

    for (skill, value) in &character.skills {
        if *value < 0 {
            issues.push(ValidationIssue::error(
                name,
                format!("skill '{skill}' is negative ({value})"),
            ));
        }
    }

    for (i, weapon) in character.weapons.iter().enumerate() {
        if weapon.damage <= 0 {
            issues.push(ValidationIssue::warning(
                name,
                format!("weapon #{i} '{}' deals no damage", weapon.name),
            ));
        }
    }

    issues
}

/// Check the rules and every character in a fight.
pub fn validate_fight(fight: &Fight, rules: &CombatRules) -> Vec<ValidationIssue> {
    let mut issues = validate_rules(rules);
    for shot in &fight.shots {
        if let Some(character) = shot.as_character() {
            issues.extend(validate_character(character, rules));
        }
    }
    issues
}
