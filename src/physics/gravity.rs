use nalgebra::Vector3;

use crate::dynamics::state::MU_MARS;
use crate::physics::vector::direction;

/// Inverse-square point-mass gravity, planet-centred frame.
///
/// `pos` must not be the planet centre. The session rejects such states
/// before stepping; here the centre maps to zero so the function stays total.
pub fn gravity_accel(pos: &Vector3<f64>) -> Vector3<f64> {
    match direction(pos) {
        Some(up) => -(MU_MARS / pos.norm_squared()) * up,
        None => Vector3::zeros(),
    }
}

/// Gravitational force on a body of the given mass.
pub fn gravity_force(pos: &Vector3<f64>, mass: f64) -> Vector3<f64> {
    gravity_accel(pos) * mass
}
