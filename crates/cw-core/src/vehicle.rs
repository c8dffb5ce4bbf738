use serde::{Deserialize, Serialize};

use crate::entity::{ActionValues, EntityClass, EntityId, keys};

/// A vehicle snapshot. Parallel to a character but keyed by driving stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique identifier.
    #[serde(default)]
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Class of the vehicle, normally mirroring its driver.
    #[serde(default)]
    pub entity_class: EntityClass,
    /// Acceleration, Handling, Squeal, Frame, Crunch, chase state, and so on.
    #[serde(default)]
    pub action_values: ActionValues,
    /// The character currently driving this vehicle.
    #[serde(default)]
    pub driver: Option<EntityId>,
}

impl Vehicle {
    /// Create an empty vehicle.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            entity_class: EntityClass::default(),
            action_values: ActionValues::new(),
            driver: None,
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

    /// Set the vehicle class.
    pub fn with_class(mut self, class: EntityClass) -> Self {
        self.entity_class = class;
        self
    }

    /// Assign a driver.
    pub fn driven_by(mut self, driver: EntityId) -> Self {
        self.driver = Some(driver);
        self
    }

    /// Raw acceleration, 0 if unset.
    pub fn acceleration(&self) -> i32 {
        self.action_values.number(keys::ACCELERATION).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acceleration_defaults_to_zero() {
        let v = Vehicle::new("Taxi");
        assert_eq!(v.acceleration(), 0);
        let v = v.with_action_value(keys::ACCELERATION, 8);
        assert_eq!(v.acceleration(), 8);
    }

    #[test]
    fn deserializes_with_string_flags() {
        let json = r#"{"name": "Sedan", "action_values": {"Pursuer": "true", "Position": "far", "Handling": 9}}"#;
        let v: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(v.action_values.text(keys::PURSUER), Some("true"));
        assert_eq!(v.action_values.number(keys::HANDLING), Some(9));
    }
}
