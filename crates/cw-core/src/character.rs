use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::{ActionValues, EntityClass, EntityId};

/// A weapon owned by a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    /// Unique identifier for this weapon.
    #[serde(default)]
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Damage added to the action result on a hit.
    pub damage: i32,
    /// Concealment rating.
    #[serde(default)]
    pub concealment: i32,
    /// Reload rating.
    #[serde(default)]
    pub reload: i32,
    /// Attack bonus that only applies against mooks.
    #[serde(default)]
    pub mook_bonus: i32,
    /// Whether the weapon supports the kachunk reload.
    #[serde(default)]
    pub kachunk: bool,
}

impl Weapon {
    /// Create a weapon with the given damage and no special traits.
    pub fn new(name: impl Into<String>, damage: i32) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            damage,
            concealment: 0,
            reload: 0,
            mook_bonus: 0,
            kachunk: false,
        }
    }

    /// Set the mook bonus.
    pub fn with_mook_bonus(mut self, bonus: i32) -> Self {
        self.mook_bonus = bonus;
        self
    }

    /// Mark the weapon as kachunk-capable.
    pub fn with_kachunk(mut self) -> Self {
        self.kachunk = true;
        self
    }
}

/// A character snapshot as supplied by the data layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Unique identifier.
    #[serde(default)]
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// PC, NPC, Mook, Boss, and so on.
    #[serde(default)]
    pub entity_class: EntityClass,
    /// Sparse map of named action values.
    #[serde(default)]
    pub action_values: ActionValues,
    /// Skill name to proficiency. Missing skills use the default value.
    #[serde(default)]
    pub skills: BTreeMap<String, i32>,
    /// Current impairment tier.
    #[serde(default)]
    pub impairments: u32,
    /// Mooks remaining. Unused for every other class.
    #[serde(default)]
    pub count: u32,
    /// Owned weapons, in display order.
    #[serde(default)]
    pub weapons: Vec<Weapon>,
    /// The vehicle this character is currently driving.
    #[serde(default)]
    pub driving: Option<EntityId>,
}

impl Character {
    /// Create an empty character of the given class.
    pub fn new(entity_class: EntityClass, name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            entity_class,
            action_values: ActionValues::new(),
            skills: BTreeMap::new(),
            impairments: 0,
            count: 0,
            weapons: Vec::new(),
            driving: None,
        }
    }

    /// Set a numeric action value.
    pub fn with_action_value(mut self, key: impl Into<String>, value: i32) -> Self {
        self.action_values.set_number(key, value);
        self
    }

    /// Set a text action value.
    pub fn with_action_text(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.action_values.set_text(key, value);
        self
    }

    /// Set a skill proficiency.
    pub fn with_skill(mut self, name: impl Into<String>, value: i32) -> Self {
        self.skills.insert(name.into(), value);
        self
    }

    /// Add a weapon.
    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapons.push(weapon);
        self
    }

    /// Set the impairment tier.
    pub fn with_impairments(mut self, impairments: u32) -> Self {
        self.impairments = impairments;
        self
    }

    /// Set the mook headcount.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Put the character behind the wheel of a vehicle.
    pub fn driving(mut self, vehicle: EntityId) -> Self {
        self.driving = Some(vehicle);
        self
    }

    /// Returns true if this character is a mook.
    pub fn is_mook(&self) -> bool {
        self.entity_class.is_mook()
    }
}
