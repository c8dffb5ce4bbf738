//! Error types for the combat engine.

use cw_core::EntityId;

/// Errors that can occur during engine operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// The combat rules are malformed or inconsistent.
    #[error("invalid combat rules: {0}")]
    InvalidConfig(String),

    /// The combat rules could not be decoded.
    #[error("malformed combat rules: {0}")]
    MalformedConfig(#[from] serde_json::Error),

    /// A shot entry referenced by id is not part of the fight.
    #[error("shot {0} is not part of this fight")]
    UnknownShot(EntityId),

    /// Initiative cannot be applied until every eligible entry has a value.
    #[error("initiative incomplete: {missing} entries still need a value")]
    InitiativeIncomplete {
        /// Number of eligible entries without an initiative value.
        missing: usize,
    },

    /// A weapon index does not exist on the attacker.
    #[error("weapon index {0} out of bounds")]
    InvalidWeapon(usize),
}

/// Convenience result type for engine operations.
pub type MechResult<T> = Result<T, MechError>;
