use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::entity::EntityId;
use crate::vehicle::Vehicle;

/// Who occupies a shot entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Combatant {
    /// A character entry.
    Character(Character),
    /// A vehicle entry.
    Vehicle(Vehicle),
}

impl Combatant {
    /// Display name of the occupant.
    pub fn name(&self) -> &str {
        match self {
            Self::Character(c) => &c.name,
            Self::Vehicle(v) => &v.name,
        }
    }

    /// Identifier of the occupant.
    pub fn entity_id(&self) -> EntityId {
        match self {
            Self::Character(c) => c.id,
            Self::Vehicle(v) => v.id,
        }
    }
}

/// A combatant's position in the shot sequence of a fight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shot {
    /// Unique identifier of the shot entry.
    #[serde(default)]
    pub id: EntityId,
    /// Current shot. `None` until the combatant enters the sequence;
    /// negative when shots are owed from a previous sequence.
    #[serde(default)]
    pub current_shot: Option<i32>,
    /// The character or vehicle on this shot.
    pub combatant: Combatant,
}

impl Shot {
    /// A shot entry for a character that has not entered the sequence yet.
    pub fn character(character: Character) -> Self {
        Self {
            id: EntityId::new(),
            current_shot: None,
            combatant: Combatant::Character(character),
        }
    }

    /// A shot entry for a vehicle that has not entered the sequence yet.
    pub fn vehicle(vehicle: Vehicle) -> Self {
        Self {
            id: EntityId::new(),
            current_shot: None,
            combatant: Combatant::Vehicle(vehicle),
        }
    }

    /// Place the entry on a shot.
    pub fn at(mut self, shot: i32) -> Self {
        self.current_shot = Some(shot);
        self
    }

    /// The character on this entry, if it is a character entry.
    pub fn as_character(&self) -> Option<&Character> {
        match &self.combatant {
            Combatant::Character(c) => Some(c),
            Combatant::Vehicle(_) => None,
        }
    }

    /// The vehicle on this entry, if it is a vehicle entry.
    pub fn as_vehicle(&self) -> Option<&Vehicle> {
        match &self.combatant {
            Combatant::Vehicle(v) => Some(v),
            Combatant::Character(_) => None,
        }
    }

    /// Returns true for vehicle entries.
    pub fn is_vehicle(&self) -> bool {
        matches!(self.combatant, Combatant::Vehicle(_))
    }
}

/// An encounter: an ordered collection of shots and the active sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fight {
    /// Unique identifier.
    #[serde(default)]
    pub id: EntityId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Which combat sequence is active (0 before the first one starts).
    #[serde(default)]
    pub sequence: u32,
    /// Shot entries in insertion order.
    #[serde(default)]
    pub shots: Vec<Shot>,
}

impl Fight {
    /// Create an empty fight.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            sequence: 0,
            shots: Vec::new(),
        }
    }

    /// Builder form of adding a shot entry.
    pub fn with_shot(mut self, shot: Shot) -> Self {
        self.shots.push(shot);
        self
    }

    /// Look up a shot entry by its id.
    pub fn shot(&self, id: EntityId) -> Option<&Shot> {
        self.shots.iter().find(|s| s.id == id)
    }

    /// Mutable lookup of a shot entry by its id.
    pub fn shot_mut(&mut self, id: EntityId) -> Option<&mut Shot> {
        self.shots.iter_mut().find(|s| s.id == id)
    }

    /// Find a vehicle taking part in this fight by the vehicle's id.
    pub fn vehicle(&self, id: EntityId) -> Option<&Vehicle> {
        self.shots
            .iter()
            .filter_map(Shot::as_vehicle)
            .find(|v| v.id == id)
    }

    /// Find a character taking part in this fight by the character's id.
    pub fn character(&self, id: EntityId) -> Option<&Character> {
        self.shots
            .iter()
            .filter_map(Shot::as_character)
            .find(|c| c.id == id)
    }

    /// Shot entries in acting order: highest shot first, entries that have
    /// not entered the sequence last. Ties keep insertion order.
    pub fn acting_order(&self) -> Vec<&Shot> {
        let mut order: Vec<&Shot> = self.shots.iter().collect();
        order.sort_by(|a, b| match (a.current_shot, b.current_shot) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        order
    }
}
