use std::f64::consts::PI;

use nalgebra::Vector3;

use crate::dynamics::state::MU_MARS;

/// Specific orbital energy (J/kg): v²/2 - mu/r.
pub fn specific_energy(pos: &Vector3<f64>, vel: &Vector3<f64>, mu: f64) -> f64 {
    0.5 * vel.norm_squared() - mu / pos.norm()
}

/// Specific angular momentum vector h = r x v.
pub fn angular_momentum(pos: &Vector3<f64>, vel: &Vector3<f64>) -> Vector3<f64> {
    pos.cross(vel)
}

pub fn circular_speed(r: f64, mu: f64) -> f64 {
    (mu / r).sqrt()
}

/// Period of an ellipse with semi-major axis `sma` (s).
pub fn period(sma: f64, mu: f64) -> f64 {
    2.0 * PI * (sma.powi(3) / mu).sqrt()
}

/// Semi-major axis from the vis-viva relation. `None` for escape
/// trajectories (non-negative energy).
pub fn semi_major_axis(pos: &Vector3<f64>, vel: &Vector3<f64>, mu: f64) -> Option<f64> {
    let energy = specific_energy(pos, vel, mu);
    (energy < 0.0).then(|| -mu / (2.0 * energy))
}

/// Magnitude of the eccentricity vector.
pub fn eccentricity(pos: &Vector3<f64>, vel: &Vector3<f64>, mu: f64) -> f64 {
    let r = pos.norm();
    let v = vel.norm();
    let e_vec = ((v * v - mu / r) * pos - pos.dot(vel) * vel) / mu;
    e_vec.norm()
}

/// Closest-approach radius of a bound orbit about Mars.
pub fn periapsis_radius(pos: &Vector3<f64>, vel: &Vector3<f64>) -> Option<f64> {
    let sma = semi_major_axis(pos, vel, MU_MARS)?;
    Some(sma * (1.0 - eccentricity(pos, vel, MU_MARS)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::MARS_RADIUS;
    use approx::assert_relative_eq;

    #[test]
    fn circular_orbit_elements() {
        let r = 1.2 * MARS_RADIUS;
        let pos = Vector3::new(r, 0.0, 0.0);
        let vel = Vector3::new(0.0, -circular_speed(r, MU_MARS), 0.0);

        assert_relative_eq!(semi_major_axis(&pos, &vel, MU_MARS).unwrap(), r, max_relative = 1e-9);
        assert!(eccentricity(&pos, &vel, MU_MARS) < 1e-9);
        assert_relative_eq!(
            specific_energy(&pos, &vel, MU_MARS),
            -MU_MARS / (2.0 * r),
            max_relative = 1e-9
        );
    }

    #[test]
    fn low_orbit_period() {
        // 1.2 planet radii: a little over two hours
        let t = period(1.2 * MARS_RADIUS, MU_MARS);
        assert!(t > 7800.0 && t < 7900.0, "period should be ~7862 s, got {:.0} s", t);
    }

    #[test]
    fn angular_momentum_is_perpendicular() {
        let pos = Vector3::new(0.0, 0.0, 1.2 * MARS_RADIUS);
        let vel = Vector3::new(3500.0, 0.0, 0.0);
        let h = angular_momentum(&pos, &vel);
        assert_relative_eq!(h.dot(&pos), 0.0);
        assert_relative_eq!(h.norm(), 1.2 * MARS_RADIUS * 3500.0);
    }

    #[test]
    fn escape_has_no_semi_major_axis() {
        let r = MARS_RADIUS;
        let pos = Vector3::new(0.0, 0.0, r);
        let escape = (2.0 * MU_MARS / r).sqrt();
        let vel = Vector3::new(0.0, 0.0, escape * 1.01);
        assert!(semi_major_axis(&pos, &vel, MU_MARS).is_none());
        assert!(periapsis_radius(&pos, &vel).is_none());
    }

    #[test]
    fn aerobraking_orbit_dips_into_atmosphere() {
        let pos = Vector3::new(0.0, 0.0, MARS_RADIUS + 100_000.0);
        let vel = Vector3::new(4000.0, 0.0, 0.0);
        let rp = periapsis_radius(&pos, &vel).unwrap();
        assert!(rp <= pos.norm() + 1.0);
    }
}
