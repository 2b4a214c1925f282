use nalgebra::Vector3;

use crate::physics::attitude::euler_to_rotation;

/// Engine thrust in the world frame, N.
///
/// The engine fires along the body +z axis. Throttle is clamped to 0..=1 and
/// an empty tank produces no thrust.
pub fn thrust_wrt_world(
    throttle: f64,
    orientation: &Vector3<f64>,
    fuel: f64,
    max_thrust: f64,
) -> Vector3<f64> {
    if fuel <= 0.0 {
        return Vector3::zeros();
    }
    let throttle = throttle.clamp(0.0, 1.0);
    euler_to_rotation(orientation) * Vector3::new(0.0, 0.0, max_thrust * throttle)
}

/// Propellant burned over `dt` at the given throttle, l.
pub fn fuel_burned(throttle: f64, rate_at_max_thrust: f64, dt: f64) -> f64 {
    dt * rate_at_max_thrust * throttle.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn full_throttle_along_body_axis() {
        let f = thrust_wrt_world(1.0, &Vector3::new(0.0, 90.0, 0.0), 50.0, 1000.0);
        assert_relative_eq!(f, Vector3::new(1000.0, 0.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn no_thrust_without_fuel() {
        let f = thrust_wrt_world(1.0, &Vector3::zeros(), 0.0, 1000.0);
        assert_eq!(f, Vector3::zeros());
    }

    #[test]
    fn throttle_is_clamped() {
        let over = thrust_wrt_world(3.0, &Vector3::zeros(), 1.0, 1000.0);
        let under = thrust_wrt_world(-1.0, &Vector3::zeros(), 1.0, 1000.0);
        assert_relative_eq!(over.norm(), 1000.0);
        assert_eq!(under.norm(), 0.0);
    }

    #[test]
    fn burn_rate_scales_with_throttle() {
        assert_relative_eq!(fuel_burned(0.5, 0.5, 0.1), 0.025);
        assert_eq!(fuel_burned(0.0, 0.5, 0.1), 0.0);
    }
}
