use crate::entity::EntityId;

/// Alias for `Result<T, CwError>`.
pub type CwResult<T> = Result<T, CwError>;

/// Errors raised by the data-access and sync seams.
#[derive(Debug, thiserror::Error)]
pub enum CwError {
    /// The requested character does not exist.
    #[error("character not found: {0}")]
    CharacterNotFound(EntityId),

    /// The requested vehicle does not exist.
    #[error("vehicle not found: {0}")]
    VehicleNotFound(EntityId),

    /// The requested fight does not exist.
    #[error("fight not found: {0}")]
    FightNotFound(EntityId),

    /// An update was based on an older version than the one stored.
    #[error("stale version: held {held}, current {current}")]
    StaleVersion {
        /// The version the writer based its update on.
        held: u64,
        /// The version currently stored.
        current: u64,
    },

    /// An inbound payload could not be decoded.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}
