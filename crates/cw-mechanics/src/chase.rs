//! Vehicle chases.
//!
//! A vehicle is either the pursuer or the evader, and either near or far
//! from its opponent. That pair decides which chase methods are legal:
//!
//! | role     | position | legal                        | default        |
//! |----------|----------|------------------------------|----------------|
//! | pursuer  | near     | RAM_SIDESWIPE, EVADE         | RAM_SIDESWIPE  |
//! | pursuer  | far      | NARROW_THE_GAP               | NARROW_THE_GAP |
//! | evader   | near     | WIDEN_THE_GAP, RAM_SIDESWIPE | WIDEN_THE_GAP  |
//! | evader   | far      | EVADE                        | EVADE          |

use std::fmt;

use cw_core::{EntityClass, Vehicle, keys};
use serde::{Deserialize, Serialize};

use crate::damage;
use crate::rules::{CombatRules, normalize_shot_cost};

/// Whether a vehicle is chasing or being chased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChaseRole {
    /// Chasing.
    Pursuer,
    /// Being chased.
    Evader,
}

/// Distance between a vehicle and its opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChasePosition {
    /// Close enough to ram.
    Near,
    /// Out of reach.
    Far,
}

impl ChasePosition {
    /// The stored form, "near" or "far".
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Near => "near",
            Self::Far => "far",
        }
    }
}

/// A chase action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChaseMethod {
    /// Hit the other vehicle.
    RamSideswipe,
    /// Shake off pursuit, or dodge a rammer.
    Evade,
    /// Close the distance.
    NarrowTheGap,
    /// Open the distance.
    WidenTheGap,
}

impl ChaseMethod {
    /// The wire name, e.g. `"RAM_SIDESWIPE"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RamSideswipe => "RAM_SIDESWIPE",
            Self::Evade => "EVADE",
            Self::NarrowTheGap => "NARROW_THE_GAP",
            Self::WidenTheGap => "WIDEN_THE_GAP",
        }
    }
}

impl fmt::Display for ChaseMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Methods allowed for a role and position. The first is the default.
pub fn legal_methods(role: ChaseRole, position: ChasePosition) -> &'static [ChaseMethod] {
    use ChaseMethod::*;
    match (role, position) {
        (ChaseRole::Pursuer, ChasePosition::Near) => &[RamSideswipe, Evade],
        (ChaseRole::Pursuer, ChasePosition::Far) => &[NarrowTheGap],
        (ChaseRole::Evader, ChasePosition::Near) => &[WidenTheGap, RamSideswipe],
        (ChaseRole::Evader, ChasePosition::Far) => &[Evade],
    }
}

/// The method selected when nothing legal is selected.
pub fn default_method(role: ChaseRole, position: ChasePosition) -> ChaseMethod {
    match (role, position) {
        (ChaseRole::Pursuer, ChasePosition::Near) => ChaseMethod::RamSideswipe,
        (ChaseRole::Pursuer, ChasePosition::Far) => ChaseMethod::NarrowTheGap,
        (ChaseRole::Evader, ChasePosition::Near) => ChaseMethod::WidenTheGap,
        (ChaseRole::Evader, ChasePosition::Far) => ChaseMethod::Evade,
    }
}

/// Keep `method` if it is legal for the role and position, otherwise fall
/// back to the default.
pub fn resolve_chase_action(role: ChaseRole, position: ChasePosition, method: ChaseMethod) -> ChaseMethod {
    if legal_methods(role, position).contains(&method) {
        method
    } else {
        default_method(role, position)
    }
}

/// The state of a chase action form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaseState {
    /// Pursuer or evader.
    pub role: ChaseRole,
    /// Near or far.
    pub position: ChasePosition,
    /// Selected method, always legal for `role` and `position`.
    pub method: ChaseMethod,
    /// Shots the action costs, always positive.
    pub shot_cost: i32,
    /// Cost restored when a non-positive cost is entered.
    pub default_shot_cost: i32,
}

impl ChaseState {
    /// A fresh state with the default method and the driver's default cost.
    pub fn new(role: ChaseRole, position: ChasePosition, driver: EntityClass, rules: &CombatRules) -> Self {
        let cost = rules.chase_cost_for(driver);
        Self {
            role,
            position,
            method: default_method(role, position),
            shot_cost: cost,
            default_shot_cost: cost,
        }
    }

    /// Read role and position from a vehicle's `Pursuer` and `Position`
    /// values. A vehicle not marked as pursuer is the evader; anything but
    /// "near" is far.
    pub fn from_vehicle(vehicle: &Vehicle, driver: EntityClass, rules: &CombatRules) -> Self {
        let text = |key| vehicle.action_values.text(key).map(str::trim);
        let role = if text(keys::PURSUER).is_some_and(|s| s.eq_ignore_ascii_case("true")) {
            ChaseRole::Pursuer
        } else {
            ChaseRole::Evader
        };
        let position = if text(keys::POSITION).is_some_and(|s| s.eq_ignore_ascii_case("near")) {
            ChasePosition::Near
        } else {
            ChasePosition::Far
        };
        Self::new(role, position, driver, rules)
    }

    /// Change role, resetting the method if it is no longer legal.
    pub fn with_role(self, role: ChaseRole) -> Self {
        self.moved(role, self.position)
    }

    /// Change position, resetting the method if it is no longer legal.
    pub fn with_position(self, position: ChasePosition) -> Self {
        self.moved(self.role, position)
    }

    /// Select a method. Illegal selections fall back to the default.
    pub fn with_method(mut self, method: ChaseMethod) -> Self {
        self.method = resolve_chase_action(self.role, self.position, method);
        self
    }

    /// Set the shot cost. Non-positive input resets to the default.
    pub fn with_shot_cost(mut self, cost: i32) -> Self {
        self.shot_cost = normalize_shot_cost(cost, self.default_shot_cost);
        self
    }

    fn moved(mut self, role: ChaseRole, position: ChasePosition) -> Self {
        let method = resolve_chase_action(role, position, self.method);
        if method != self.method {
            tracing::debug!(from = %self.method, to = %method, "chase method reset to default");
        }
        self.role = role;
        self.position = position;
        self.method = method;
        self
    }
}

/// Apply a chase action's result to both vehicles.
///
/// On a hit the target takes chase points from the smackdown. Ramming also
/// deals condition points. Narrowing the gap leaves both vehicles near and
/// widening it leaves both far. A miss changes nothing.
pub fn apply_chase_outcome(
    actor: &Vehicle,
    target: &Vehicle,
    method: ChaseMethod,
    hit: bool,
    smackdown: i32,
) -> (Vehicle, Vehicle) {
    if !hit {
        return (actor.clone(), target.clone());
    }
    let mut actor = actor.clone();
    let mut target = damage::take_chase_points(target, smackdown);
    if method == ChaseMethod::RamSideswipe {
        target = damage::take_condition_points(&target, smackdown);
    }
    let position = match method {
        ChaseMethod::NarrowTheGap => Some(ChasePosition::Near),
        ChaseMethod::WidenTheGap => Some(ChasePosition::Far),
        ChaseMethod::RamSideswipe | ChaseMethod::Evade => None,
    };
    if let Some(position) = position {
        actor.action_values.set_text(keys::POSITION, position.as_str());
        target.action_values.set_text(keys::POSITION, position.as_str());
    }
    tracing::debug!(
        actor = %actor.name,
        target = %target.name,
        %method,
        smackdown,
        "chase action landed"
    );
    (actor, target)
}
