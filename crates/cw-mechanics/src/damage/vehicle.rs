//! Chase and condition points for vehicles.

use cw_core::{Vehicle, keys};

use crate::rules::CombatRules;

fn raw(vehicle: &Vehicle, key: &str) -> i32 {
    vehicle.action_values.number(key).unwrap_or(0)
}

fn add_points(vehicle: &Vehicle, key: &str, smackdown: i32, resist: i32) -> Vehicle {
    let mut next = vehicle.clone();
    let points = smackdown.saturating_sub(resist).max(0);
    if points > 0 {
        let total = raw(vehicle, key).max(0).saturating_add(points);
        next.action_values.set_number(key, total);
        tracing::debug!(vehicle = %vehicle.name, key, points, total, "vehicle points taken");
    }
    next
}

/// Add `max(0, smackdown - Handling)` chase points.
pub fn take_chase_points(vehicle: &Vehicle, smackdown: i32) -> Vehicle {
    add_points(
        vehicle,
        keys::CHASE_POINTS,
        smackdown,
        raw(vehicle, keys::HANDLING),
    )
}

/// Add `max(0, smackdown - Frame)` condition points.
pub fn take_condition_points(vehicle: &Vehicle, smackdown: i32) -> Vehicle {
    add_points(
        vehicle,
        keys::CONDITION_POINTS,
        smackdown,
        raw(vehicle, keys::FRAME),
    )
}

/// Returns true once a vehicle's chase points reach the configured limit.
pub fn is_out_of_chase(vehicle: &Vehicle, rules: &CombatRules) -> bool {
    raw(vehicle, keys::CHASE_POINTS) >= rules.chase_point_limit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::preset;

    fn car() -> Vehicle {
        Vehicle::new("Sedan")
            .with_action_value(keys::HANDLING, 8)
            .with_action_value(keys::FRAME, 7)
    }

    #[test]
    fn chase_points_subtract_handling() {
        let hit = take_chase_points(&car(), 15);
        assert_eq!(hit.action_values.number(keys::CHASE_POINTS), Some(7));
        let hit = take_chase_points(&hit, 10);
        assert_eq!(hit.action_values.number(keys::CHASE_POINTS), Some(9));
    }

    #[test]
    fn condition_points_subtract_frame() {
        let hit = take_condition_points(&car(), 15);
        assert_eq!(hit.action_values.number(keys::CONDITION_POINTS), Some(8));
    }

    #[test]
    fn weak_hits_leave_vehicle_unchanged() {
        let v = car();
        assert_eq!(take_chase_points(&v, 8), v);
        assert_eq!(take_condition_points(&v, 3), v);
    }

    #[test]
    fn out_of_chase_at_limit() {
        let rules = preset::standard();
        let v = car().with_action_value(keys::CHASE_POINTS, 34);
        assert!(!is_out_of_chase(&v, &rules));
        let v = take_chase_points(&v, 9);
        assert!(is_out_of_chase(&v, &rules));
    }
}
