use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for characters, vehicles, shots, and fights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Generate a new random entity ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Well-known action value keys used by the backend records.
pub mod keys {
    /// Wound points taken.
    pub const WOUNDS: &str = "Wounds";
    /// Defense value.
    pub const DEFENSE: &str = "Defense";
    /// Toughness value (subtracted from a smackdown).
    pub const TOUGHNESS: &str = "Toughness";
    /// Speed value (added to the initiative die).
    pub const SPEED: &str = "Speed";
    /// Current fortune pool.
    pub const FORTUNE: &str = "Fortune";
    /// Maximum fortune pool.
    pub const MAX_FORTUNE: &str = "Max Fortune";
    /// Name of the fortune pool ("Fortune", "Chi", "Magic", ...).
    pub const FORTUNE_TYPE: &str = "FortuneType";
    /// Marks of death.
    pub const MARKS_OF_DEATH: &str = "Marks of Death";
    /// Pointer to the action value used as the main attack.
    pub const MAIN_ATTACK: &str = "MainAttack";
    /// Pointer to the action value used as the secondary attack.
    pub const SECONDARY_ATTACK: &str = "SecondaryAttack";
    /// Base damage without a weapon.
    pub const DAMAGE: &str = "Damage";
    /// Entity class ("PC", "Mook", ...).
    pub const TYPE: &str = "Type";
    /// The default main attack skill.
    pub const GUNS: &str = "Guns";

    /// Vehicle acceleration (replaces Speed for a driver's initiative).
    pub const ACCELERATION: &str = "Acceleration";
    /// Vehicle handling (subtracted from chase smackdowns).
    pub const HANDLING: &str = "Handling";
    /// Vehicle squeal.
    pub const SQUEAL: &str = "Squeal";
    /// Vehicle frame (subtracted from ram smackdowns).
    pub const FRAME: &str = "Frame";
    /// Vehicle crunch.
    pub const CRUNCH: &str = "Crunch";
    /// Chase points taken by a vehicle.
    pub const CHASE_POINTS: &str = "Chase Points";
    /// Condition points taken by a vehicle.
    pub const CONDITION_POINTS: &str = "Condition Points";
    /// Whether the vehicle is pursuing ("true") or evading ("false").
    pub const PURSUER: &str = "Pursuer";
    /// Chase position, "near" or "far".
    pub const POSITION: &str = "Position";
}

/// The class of a character, which decides wound tracking and thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityClass {
    /// A player character.
    Pc,
    /// A generic non-player character.
    #[default]
    Npc,
    /// An allied non-player character.
    Ally,
    /// A disposable foe tracked by headcount.
    Mook,
    /// A named opponent.
    FeaturedFoe,
    /// A major opponent.
    Boss,
    /// A campaign-level opponent.
    UberBoss,
}

impl EntityClass {
    /// Parse the backend spelling. Unknown strings are treated as NPCs.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "PC" => Self::Pc,
            "Ally" => Self::Ally,
            "Mook" => Self::Mook,
            "Featured Foe" => Self::FeaturedFoe,
            "Boss" => Self::Boss,
            "Uber-Boss" => Self::UberBoss,
            _ => Self::Npc,
        }
    }

    /// The backend spelling of this class.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pc => "PC",
            Self::Npc => "NPC",
            Self::Ally => "Ally",
            Self::Mook => "Mook",
            Self::FeaturedFoe => "Featured Foe",
            Self::Boss => "Boss",
            Self::UberBoss => "Uber-Boss",
        }
    }

    /// Returns true for player characters.
    pub fn is_pc(self) -> bool {
        self == Self::Pc
    }

    /// Returns true for mooks.
    pub fn is_mook(self) -> bool {
        self == Self::Mook
    }

    /// Returns true for Boss and Uber-Boss.
    pub fn is_boss_tier(self) -> bool {
        matches!(self, Self::Boss | Self::UberBoss)
    }

    /// Returns true for the heroes' side of a fight (PCs and Allies).
    pub fn is_hero_side(self) -> bool {
        matches!(self, Self::Pc | Self::Ally)
    }
}

impl From<String> for EntityClass {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<EntityClass> for String {
    fn from(class: EntityClass) -> Self {
        class.as_str().to_string()
    }
}

impl fmt::Display for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single stored action value: numbers for stats, text for pointers and flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionValue {
    /// A numeric stat.
    Number(i32),
    /// A text value, e.g. `MainAttack: "Martial Arts"`.
    Text(String),
}

impl ActionValue {
    /// The numeric value. Text that parses as an integer counts as a number.
    pub fn as_number(&self) -> Option<i32> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    /// The text value, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }
}

impl fmt::Display for ActionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A sparse, string-keyed map of action values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionValues(BTreeMap<String, ActionValue>);

impl ActionValues {
    /// Create an empty map.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Raw access to a stored value.
    pub fn get(&self, key: &str) -> Option<&ActionValue> {
        self.0.get(key)
    }

    /// The numeric value stored under `key`, if any.
    pub fn number(&self, key: &str) -> Option<i32> {
        self.0.get(key).and_then(ActionValue::as_number)
    }

    /// The text value stored under `key`, if any.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(ActionValue::as_text)
    }

    /// Store a number.
    pub fn set_number(&mut self, key: impl Into<String>, value: i32) {
        self.0.insert(key.into(), ActionValue::Number(value));
    }

    /// Store a text value.
    pub fn set_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), ActionValue::Text(value.into()));
    }

    /// Builder form of [`ActionValues::set_number`].
    pub fn with_number(mut self, key: impl Into<String>, value: i32) -> Self {
        self.set_number(key, value);
        self
    }

    /// Builder form of [`ActionValues::set_text`].
    pub fn with_text(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_text(key, value);
        self
    }

    /// Iterate over all stored entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ActionValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
