//! Derived stats: effective action values, attacks, fortune, and skills.
//!
//! Every function here is a pure read of a character snapshot. Values that
//! are sensitive to impairment are reduced by the character's impairment
//! tier and never drop below 0. Toughness, Speed, Max Fortune, Damage, and
//! the bookkeeping counters are read raw.

use cw_core::{Character, Fight, keys};

use crate::rules::CombatRules;

/// Keys whose stored value is never reduced by impairment.
const UNIMPAIRED: &[&str] = &[
    keys::TOUGHNESS,
    keys::SPEED,
    keys::MAX_FORTUNE,
    keys::DAMAGE,
    keys::WOUNDS,
    keys::MARKS_OF_DEATH,
    keys::ACCELERATION,
    keys::HANDLING,
    keys::SQUEAL,
    keys::FRAME,
    keys::CRUNCH,
    keys::CHASE_POINTS,
    keys::CONDITION_POINTS,
];

/// Returns true if impairment reduces the action value stored under `key`.
pub fn is_impairment_sensitive(key: &str) -> bool {
    !UNIMPAIRED.iter().any(|k| *k == key)
}

/// The stored value with no impairment adjustment, 0 if unset.
pub fn raw_action_value(character: &Character, key: &str) -> i32 {
    character.action_values.number(key).unwrap_or(0)
}

/// The effective value of `key`: reduced by impairment when the key is
/// impairment-sensitive. Unset keys are 0.
pub fn action_value(character: &Character, key: &str) -> i32 {
    match character.action_values.number(key) {
        None => 0,
        Some(value) if is_impairment_sensitive(key) => impaired(value, character.impairments),
        Some(value) => value,
    }
}

fn impaired(value: i32, impairments: u32) -> i32 {
    let penalty = i32::try_from(impairments).unwrap_or(i32::MAX);
    value.saturating_sub(penalty).max(0)
}

/// Toughness, unaffected by impairment.
pub fn toughness(character: &Character) -> i32 {
    raw_action_value(character, keys::TOUGHNESS)
}

/// Speed, unaffected by impairment.
pub fn speed(character: &Character) -> i32 {
    raw_action_value(character, keys::SPEED)
}

/// Defense, reduced by impairment.
pub fn defense(character: &Character) -> i32 {
    action_value(character, keys::DEFENSE)
}

/// Stored Damage value, unaffected by impairment.
pub fn damage(character: &Character) -> i32 {
    raw_action_value(character, keys::DAMAGE)
}

/// Wound points taken, never negative.
pub fn wounds(character: &Character) -> i32 {
    raw_action_value(character, keys::WOUNDS).max(0)
}

/// Marks of death, never negative.
pub fn marks_of_death(character: &Character) -> i32 {
    raw_action_value(character, keys::MARKS_OF_DEATH).max(0)
}

/// Name of the main attack skill.
pub fn main_attack(character: &Character, rules: &CombatRules) -> String {
    pointer(character, keys::MAIN_ATTACK).unwrap_or_else(|| rules.default_main_attack.clone())
}

/// Name of the secondary attack skill, empty if unset.
pub fn secondary_attack(character: &Character) -> String {
    pointer(character, keys::SECONDARY_ATTACK).unwrap_or_default()
}

fn pointer(character: &Character, key: &str) -> Option<String> {
    character
        .action_values
        .text(key)
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .map(str::to_string)
}

/// Effective value of the main attack.
pub fn main_attack_value(character: &Character, rules: &CombatRules) -> i32 {
    action_value(character, &main_attack(character, rules))
}

/// Effective value of the secondary attack, if the character has one.
pub fn secondary_attack_value(character: &Character) -> Option<i32> {
    let skill = secondary_attack(character);
    if skill.is_empty() {
        None
    } else {
        Some(action_value(character, &skill))
    }
}

/// Current fortune, reduced by impairment.
pub fn fortune(character: &Character) -> i32 {
    action_value(character, keys::FORTUNE)
}

/// Maximum fortune, unaffected by impairment.
pub fn max_fortune(character: &Character) -> i32 {
    raw_action_value(character, keys::MAX_FORTUNE)
}

/// Name of the fortune pool, e.g. "Fortune", "Chi", or "Magic".
pub fn fortune_type(character: &Character, rules: &CombatRules) -> String {
    pointer(character, keys::FORTUNE_TYPE).unwrap_or_else(|| rules.default_fortune_type.clone())
}

/// Effective skill value. Skills without a positive entry use the default
/// value; the result is reduced by impairment.
pub fn skill(character: &Character, name: &str, rules: &CombatRules) -> i32 {
    let base = character
        .skills
        .get(name)
        .copied()
        .filter(|v| *v > 0)
        .unwrap_or(rules.default_skill);
    impaired(base, character.impairments)
}

/// All skills with a positive stored value, resolved through [`skill`].
pub fn known_skills(character: &Character, rules: &CombatRules) -> Vec<(String, i32)> {
    character
        .skills
        .iter()
        .filter(|(_, v)| **v > 0)
        .map(|(name, _)| (name.clone(), skill(character, name, rules)))
        .collect()
}

/// The speed used for initiative: the driven vehicle's Acceleration when
/// the character is driving a vehicle in this fight, otherwise Speed.
pub fn initiative_speed(character: &Character, fight: &Fight) -> i32 {
    character
        .driving
        .and_then(|id| fight.vehicle(id))
        .map(|v| v.acceleration())
        .unwrap_or_else(|| speed(character))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::preset;
    use cw_core::{EntityClass, Shot, Vehicle};

    fn hero() -> Character {
        Character::new(EntityClass::Pc, "Johnny")
            .with_action_value("Guns", 13)
            .with_action_value(keys::DEFENSE, 14)
            .with_action_value(keys::TOUGHNESS, 7)
            .with_action_value(keys::SPEED, 6)
            .with_action_value(keys::FORTUNE, 5)
            .with_action_value(keys::MAX_FORTUNE, 7)
            .with_action_text(keys::MAIN_ATTACK, "Guns")
    }

    #[test]
    fn unimpaired_values() {
        let c = hero();
        assert_eq!(action_value(&c, "Guns"), 13);
        assert_eq!(defense(&c), 14);
        assert_eq!(toughness(&c), 7);
    }

    #[test]
    fn impairment_reduces_sensitive_values_only() {
        let c = hero().with_impairments(2);
        assert_eq!(action_value(&c, "Guns"), 11);
        assert_eq!(defense(&c), 12);
        assert_eq!(fortune(&c), 3);
        assert_eq!(toughness(&c), 7);
        assert_eq!(speed(&c), 6);
        assert_eq!(max_fortune(&c), 7);
        assert_eq!(raw_action_value(&c, "Guns"), 13);
    }

    #[test]
    fn impaired_values_floor_at_zero() {
        let c = hero().with_impairments(20);
        assert_eq!(fortune(&c), 0);
        assert_eq!(defense(&c), 0);
    }

    #[test]
    fn unset_values_are_zero_even_when_impaired() {
        let c = hero().with_impairments(1);
        assert_eq!(action_value(&c, "Sorcery"), 0);
        assert_eq!(damage(&c), 0);
    }

    #[test]
    fn main_attack_defaults_to_guns() {
        let rules = preset::standard();
        let c = Character::new(EntityClass::Npc, "Goon").with_action_value("Guns", 9);
        assert_eq!(main_attack(&c, &rules), "Guns");
        assert_eq!(main_attack_value(&c, &rules), 9);
    }

    #[test]
    fn main_attack_follows_pointer() {
        let rules = preset::standard();
        let c = hero()
            .with_action_value("Martial Arts", 15)
            .with_action_text(keys::MAIN_ATTACK, "Martial Arts");
        assert_eq!(main_attack(&c, &rules), "Martial Arts");
        assert_eq!(main_attack_value(&c, &rules), 15);
    }

    #[test]
    fn secondary_attack_empty_when_unset_or_null() {
        let c = hero();
        assert_eq!(secondary_attack(&c), "");
        assert_eq!(secondary_attack_value(&c), None);
        let c = c.with_action_text(keys::SECONDARY_ATTACK, "null");
        assert_eq!(secondary_attack(&c), "");
        let c = c
            .with_action_text(keys::SECONDARY_ATTACK, "Sorcery")
            .with_action_value("Sorcery", 12)
            .with_impairments(1);
        assert_eq!(secondary_attack(&c), "Sorcery");
        assert_eq!(secondary_attack_value(&c), Some(11));
    }

    #[test]
    fn fortune_type_defaults() {
        let rules = preset::standard();
        assert_eq!(fortune_type(&hero(), &rules), "Fortune");
        let c = hero().with_action_text(keys::FORTUNE_TYPE, "Chi");
        assert_eq!(fortune_type(&c, &rules), "Chi");
    }

    #[test]
    fn skills_default_and_impair() {
        let rules = preset::standard();
        let c = hero()
            .with_skill("Driving", 12)
            .with_skill("Sabotage", 0)
            .with_impairments(1);
        assert_eq!(skill(&c, "Driving", &rules), 11);
        assert_eq!(skill(&c, "Sabotage", &rules), 6);
        assert_eq!(skill(&c, "Medicine", &rules), 6);
    }

    #[test]
    fn known_skills_lists_positive_entries() {
        let rules = preset::standard();
        let c = hero()
            .with_skill("Driving", 12)
            .with_skill("Intrusion", 10)
            .with_skill("Sabotage", 0)
            .with_impairments(2);
        let known = known_skills(&c, &rules);
        assert_eq!(
            known,
            vec![("Driving".to_string(), 10), ("Intrusion".to_string(), 8)]
        );
    }

    #[test]
    fn initiative_speed_uses_driven_vehicle() {
        let car = Vehicle::new("Muscle Car").with_action_value(keys::ACCELERATION, 9);
        let car_id = car.id;
        let driver = hero().driving(car_id);
        let fight = Fight::new("Chase")
            .with_shot(Shot::vehicle(car))
            .with_shot(Shot::character(driver.clone()));
        assert_eq!(initiative_speed(&driver, &fight), 9);
        assert_eq!(initiative_speed(&hero(), &fight), 6);
    }

    #[test]
    fn initiative_speed_falls_back_when_vehicle_missing() {
        let driver = hero().driving(cw_core::EntityId::new());
        let fight = Fight::new("No cars");
        assert_eq!(initiative_speed(&driver, &fight), 6);
    }

    #[test]
    fn sensitivity_table() {
        assert!(is_impairment_sensitive("Guns"));
        assert!(is_impairment_sensitive(keys::DEFENSE));
        assert!(is_impairment_sensitive(keys::FORTUNE));
        assert!(!is_impairment_sensitive(keys::TOUGHNESS));
        assert!(!is_impairment_sensitive(keys::MAX_FORTUNE));
    }
}
