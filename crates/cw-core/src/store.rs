//! Data-access seam and an in-memory implementation.
//!
//! The engine never performs I/O. Callers read snapshots through a
//! [`DataAccess`] implementation, run engine functions, and write the
//! results back. Every write is checked against the version the caller
//! based it on.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::entity::EntityId;
use crate::error::{CwError, CwResult};
use crate::fight::Fight;
use crate::sync::Versioned;
use crate::vehicle::Vehicle;

/// The `{ "data": ... }` envelope the backend wraps every response in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    /// The payload.
    pub data: T,
}

/// Read/write access to the records the combat engine needs.
pub trait DataAccess {
    /// Fetch a character.
    fn get_character(&self, id: EntityId) -> CwResult<Versioned<Character>>;
    /// Store a new character at version 1.
    fn create_character(&mut self, character: Character) -> CwResult<Versioned<Character>>;
    /// Replace a character. `base_version` must match the stored version.
    fn update_character(
        &mut self,
        base_version: u64,
        character: Character,
    ) -> CwResult<Versioned<Character>>;

    /// Fetch a vehicle.
    fn get_vehicle(&self, id: EntityId) -> CwResult<Versioned<Vehicle>>;
    /// Store a new vehicle at version 1.
    fn create_vehicle(&mut self, vehicle: Vehicle) -> CwResult<Versioned<Vehicle>>;
    /// Replace a vehicle. `base_version` must match the stored version.
    fn update_vehicle(&mut self, base_version: u64, vehicle: Vehicle)
    -> CwResult<Versioned<Vehicle>>;

    /// Fetch a fight with its shots.
    fn get_fight(&self, id: EntityId) -> CwResult<Versioned<Fight>>;
    /// Store a new fight at version 1.
    fn create_fight(&mut self, fight: Fight) -> CwResult<Versioned<Fight>>;
    /// Replace a fight. `base_version` must match the stored version.
    fn update_fight(&mut self, base_version: u64, fight: Fight) -> CwResult<Versioned<Fight>>;
}

trait Record: Clone {
    fn record_id(&self) -> EntityId;
}

impl Record for Character {
    fn record_id(&self) -> EntityId {
        self.id
    }
}

impl Record for Vehicle {
    fn record_id(&self) -> EntityId {
        self.id
    }
}

impl Record for Fight {
    fn record_id(&self) -> EntityId {
        self.id
    }
}

#[derive(Debug, Clone)]
struct Table<T> {
    rows: HashMap<EntityId, Versioned<T>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
        }
    }
}

impl<T: Record> Table<T> {
    fn get(&self, id: EntityId) -> Option<Versioned<T>> {
        self.rows.get(&id).cloned()
    }

    fn create(&mut self, value: T) -> Versioned<T> {
        let row = Versioned::new(1, value);
        self.rows.insert(row.value.record_id(), row.clone());
        row
    }

    fn update(&mut self, base_version: u64, value: T) -> Option<CwResult<Versioned<T>>> {
        let row = self.rows.get_mut(&value.record_id())?;
        if row.version != base_version {
            return Some(Err(CwError::StaleVersion {
                held: base_version,
                current: row.version,
            }));
        }
        *row = Versioned::new(row.version + 1, value);
        Some(Ok(row.clone()))
    }
}

/// An in-memory [`DataAccess`] store. Useful for tests and offline play.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    characters: Table<Character>,
    vehicles: Table<Vehicle>,
    fights: Table<Fight>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataAccess for MemoryStore {
    fn get_character(&self, id: EntityId) -> CwResult<Versioned<Character>> {
        self.characters
            .get(id)
            .ok_or(CwError::CharacterNotFound(id))
    }

    fn create_character(&mut self, character: Character) -> CwResult<Versioned<Character>> {
        Ok(self.characters.create(character))
    }

    fn update_character(
        &mut self,
        base_version: u64,
        character: Character,
    ) -> CwResult<Versioned<Character>> {
        let id = character.id;
        self.characters
            .update(base_version, character)
            .unwrap_or(Err(CwError::CharacterNotFound(id)))
    }

    fn get_vehicle(&self, id: EntityId) -> CwResult<Versioned<Vehicle>> {
        self.vehicles.get(id).ok_or(CwError::VehicleNotFound(id))
    }

    fn create_vehicle(&mut self, vehicle: Vehicle) -> CwResult<Versioned<Vehicle>> {
        Ok(self.vehicles.create(vehicle))
    }

    fn update_vehicle(
        &mut self,
        base_version: u64,
        vehicle: Vehicle,
    ) -> CwResult<Versioned<Vehicle>> {
        let id = vehicle.id;
        self.vehicles
            .update(base_version, vehicle)
            .unwrap_or(Err(CwError::VehicleNotFound(id)))
    }

    fn get_fight(&self, id: EntityId) -> CwResult<Versioned<Fight>> {
        self.fights.get(id).ok_or(CwError::FightNotFound(id))
    }

    fn create_fight(&mut self, fight: Fight) -> CwResult<Versioned<Fight>> {
        Ok(self.fights.create(fight))
    }

    fn update_fight(&mut self, base_version: u64, fight: Fight) -> CwResult<Versioned<Fight>> {
        let id = fight.id;
        self.fights
            .update(base_version, fight)
            .unwrap_or(Err(CwError::FightNotFound(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityClass;

    #[test]
    fn create_then_get() {
        let mut store = MemoryStore::new();
        let c = Character::new(EntityClass::Pc, "Alice");
        let id = c.id;
        let created = store.create_character(c).unwrap();
        assert_eq!(created.version, 1);
        assert_eq!(store.get_character(id).unwrap().value.name, "Alice");
    }

    #[test]
    fn update_bumps_version() {
        let mut store = MemoryStore::new();
        let fight = store.create_fight(Fight::new("Docks")).unwrap();
        let mut next = fight.value.clone();
        next.sequence = 1;
        let updated = store.update_fight(fight.version, next).unwrap();
        assert_eq!(updated.version, 2);
        assert_eq!(store.get_fight(fight.value.id).unwrap().value.sequence, 1);
    }

    #[test]
    fn stale_update_rejected() {
        let mut store = MemoryStore::new();
        let v = store.create_vehicle(Vehicle::new("Taxi")).unwrap();
        store.update_vehicle(1, v.value.clone()).unwrap();
        let err = store.update_vehicle(1, v.value).unwrap_err();
        assert!(matches!(
            err,
            CwError::StaleVersion {
                held: 1,
                current: 2
            }
        ));
    }

    #[test]
    fn missing_records() {
        let mut store = MemoryStore::new();
        let id = EntityId::new();
        assert!(matches!(
            store.get_character(id),
            Err(CwError::CharacterNotFound(_))
        ));
        assert!(matches!(
            store.update_fight(1, Fight::new("Ghost")),
            Err(CwError::FightNotFound(_))
        ));
    }

    #[test]
    fn envelope_decodes_lists() {
        let env: DataEnvelope<Vec<Vehicle>> =
            serde_json::from_str(r#"{"data": [{"name": "Taxi"}, {"name": "Van"}]}"#).unwrap();
        assert_eq!(env.data.len(), 2);
    }
}
