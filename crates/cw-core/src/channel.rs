//! Message shapes for the realtime campaign channel.
//!
//! The transport is not implemented here. These types describe what the
//! engine consumes from the channel: committed combat state, tagged by
//! `status`, plus a few notification kinds it ignores.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::character::Character;
use crate::entity::EntityId;
use crate::error::CwResult;
use crate::fight::Fight;
use crate::sync::Versioned;
use crate::vehicle::Vehicle;

/// Name of the campaign-wide channel.
pub const CAMPAIGN_CHANNEL: &str = "CampaignChannel";

/// Address of a publish/subscribe channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelAddress {
    /// Channel name.
    pub channel: String,
    /// Campaign the channel belongs to.
    pub id: EntityId,
}

impl ChannelAddress {
    /// The campaign channel for a campaign.
    pub fn campaign(id: EntityId) -> Self {
        Self {
            channel: CAMPAIGN_CHANNEL.to_string(),
            id,
        }
    }
}

/// An inbound channel message, tagged by its `status` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChannelMessage {
    /// A generated preview is ready. Not combat state.
    PreviewReady {
        /// Remaining payload fields.
        #[serde(flatten)]
        payload: Map<String, Value>,
    },
    /// The backend reported an error.
    Error {
        /// Human-readable message.
        #[serde(default)]
        error: String,
    },
    /// A committed fight snapshot.
    FightUpdated {
        /// The fight.
        fight: Fight,
        /// Snapshot version.
        #[serde(default)]
        version: u64,
    },
    /// A committed character snapshot.
    CharacterUpdated {
        /// The character.
        character: Character,
        /// Snapshot version.
        #[serde(default)]
        version: u64,
    },
    /// A committed vehicle snapshot.
    VehicleUpdated {
        /// The vehicle.
        vehicle: Vehicle,
        /// Snapshot version.
        #[serde(default)]
        version: u64,
    },
    /// Any status the engine does not consume.
    #[serde(other)]
    Other,
}

impl ChannelMessage {
    /// Decode a raw JSON message.
    pub fn parse(raw: &str) -> CwResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The fight snapshot carried by this message, if any.
    pub fn fight_snapshot(self) -> Option<Versioned<Fight>> {
        match self {
            Self::FightUpdated { fight, version } => Some(Versioned::new(version, fight)),
            _ => None,
        }
    }

    /// The character snapshot carried by this message, if any.
    pub fn character_snapshot(self) -> Option<Versioned<Character>> {
        match self {
            Self::CharacterUpdated { character, version } => {
                Some(Versioned::new(version, character))
            }
            _ => None,
        }
    }

    /// The vehicle snapshot carried by this message, if any.
    pub fn vehicle_snapshot(self) -> Option<Versioned<Vehicle>> {
        match self {
            Self::VehicleUpdated { vehicle, version } => Some(Versioned::new(version, vehicle)),
            _ => None,
        }
    }
}
