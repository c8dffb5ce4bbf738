//! Core types for Chi War: characters, vehicles, weapons, and fights.
//!
//! This crate holds the snapshots the combat engine reads and returns, and
//! the seams to the outside world: a data-access trait, realtime channel
//! messages, and versioned optimistic updates. It performs no I/O.

/// Realtime channel message shapes.
pub mod channel;
/// Characters and their weapons.
pub mod character;
/// Identifiers, entity classes, and action values.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// Shots, combatants, and fights.
pub mod fight;
/// Data-access trait and in-memory store.
pub mod store;
/// Versioned snapshots and optimistic updates.
pub mod sync;
/// Vehicles.
pub mod vehicle;

/// Re-export channel types.
pub use channel::{ChannelAddress, ChannelMessage};
/// Re-export character types.
pub use character::{Character, Weapon};
/// Re-export entity types.
pub use entity::{ActionValue, ActionValues, EntityClass, EntityId, keys};
/// Re-export error types.
pub use error::{CwError, CwResult};
/// Re-export fight types.
pub use fight::{Combatant, Fight, Shot};
/// Re-export data-access types.
pub use store::{DataAccess, DataEnvelope, MemoryStore};
/// Re-export sync types.
pub use sync::{OptimisticSlot, PendingToken, Versioned};
/// Re-export vehicle types.
pub use vehicle::Vehicle;
