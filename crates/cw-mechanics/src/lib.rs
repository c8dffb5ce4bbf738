//! Combat resolution and turn scheduling for Chi War.
//!
//! Provides exploding dice and the swerve, derived stats with impairment,
//! wounds and mook elimination, attack setup and resolution, shot-based
//! initiative, and the vehicle chase state machine. Every operation takes
//! a snapshot from `cw-core` and returns a new one; nothing here performs
//! I/O or installs a logging subscriber.

pub mod attack;
pub mod chase;
pub mod damage;
pub mod dice;
pub mod error;
pub mod initiative;
pub mod rules;
pub mod stats;
pub mod validate;

pub use attack::{
    AttackChange, AttackOutcome, AttackSetup, AttackTarget, commit_attack, resolve_attack,
    roll_attack,
};
pub use chase::{ChaseMethod, ChasePosition, ChaseRole, ChaseState, resolve_chase_action};
pub use damage::{
    Smackdown, full_heal, heal_wounds, kill_mooks, take_smackdown, tiers_crossed,
};
pub use dice::{ExplodingRoll, Swerve, roll_die, roll_exploding, roll_swerve};
pub use error::{MechError, MechResult};
pub use initiative::{InitiativeDraft, InitiativeEntry, Side, begin_sequence, spend_shots};
pub use rules::CombatRules;
pub use validate::{ValidationIssue, validate_character, validate_fight, validate_rules};
