use std::f64::consts::PI;

use nalgebra::Vector3;

use crate::dynamics::state::{ParachuteStatus, EXOSPHERE};
use crate::physics::vector::direction;
use crate::vehicle::Lander;

/// Quadratic drag force opposing velocity: 0.5 * rho * Cd * A * |v|^2.
///
/// Zero velocity gives an exact zero vector.
pub fn drag_force(vel: &Vector3<f64>, density: f64, cd: f64, area: f64) -> Vector3<f64> {
    match direction(vel) {
        Some(v_hat) => -0.5 * density * cd * area * vel.norm_squared() * v_hat,
        None => Vector3::zeros(),
    }
}

/// Frontal area of the lander body (a disc of the lander radius).
pub fn lander_area(size: f64) -> f64 {
    PI * size * size
}

/// Canopy area. Five squares of side 2 * size.
pub fn parachute_area(size: f64) -> f64 {
    5.0 * (2.0 * size).powi(2)
}

/// Drag on the parachute alone. Zero unless it is deployed.
pub fn parachute_drag(
    vel: &Vector3<f64>,
    density: f64,
    lander: &Lander,
    parachute: ParachuteStatus,
) -> Vector3<f64> {
    if !parachute.is_deployed() {
        return Vector3::zeros();
    }
    drag_force(vel, density, lander.drag_coef_chute, parachute_area(lander.size))
}

/// Body drag plus parachute drag, as a force.
pub fn total_drag(
    vel: &Vector3<f64>,
    density: f64,
    lander: &Lander,
    parachute: ParachuteStatus,
) -> Vector3<f64> {
    let body = drag_force(vel, density, lander.drag_coef_lander, lander_area(lander.size));
    body + parachute_drag(vel, density, lander, parachute)
}

/// True when an open canopy would be torn off at this velocity and density:
/// its drag exceeds the rated load, or the lander is inside the atmosphere
/// faster than the rated deployment speed.
pub fn parachute_overloaded(
    vel: &Vector3<f64>,
    density: f64,
    altitude: f64,
    lander: &Lander,
) -> bool {
    let load = parachute_drag(vel, density, lander, ParachuteStatus::Deployed).norm();
    let inside = altitude < EXOSPHERE;
    load > lander.max_parachute_drag || (inside && vel.norm() > lander.max_parachute_speed)
}
