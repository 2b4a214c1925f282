pub mod state;

use nalgebra::Vector3;

use crate::physics::aerodynamics;
use crate::physics::atmosphere::Atmosphere;
use crate::physics::gravity::gravity_accel;
use crate::vehicle::Lander;
use state::LanderState;

// ---------------------------------------------------------------------------
// Force model (3DOF point mass)
// ---------------------------------------------------------------------------

/// Lander mass including propellant on board.
pub fn total_mass(state: &LanderState, lander: &Lander) -> f64 {
    lander.mass(state.fuel)
}

/// Net acceleration on the lander for the current state.
///
/// `thrust` is the engine force already expressed in the world frame.
///
/// Forces modeled:
///   1. Gravity: inverse-square, towards the planet centre
///   2. Thrust: as supplied, divided by the fuelled mass
///   3. Drag: quadratic on the body plus the parachute when deployed
pub fn acceleration(
    state: &LanderState,
    lander: &Lander,
    atmosphere: &Atmosphere,
    thrust: &Vector3<f64>,
) -> Vector3<f64> {
    let mass = total_mass(state, lander);

    let a_gravity = gravity_accel(&state.pos);
    let a_thrust = thrust / mass;

    let density = atmosphere.density(&state.pos);
    let a_drag = aerodynamics::total_drag(&state.vel, density, lander, state.parachute) / mass;

    a_gravity + a_thrust + a_drag
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::{ParachuteStatus, MARS_RADIUS};
    use approx::assert_relative_eq;

    fn descending(vel: Vector3<f64>) -> LanderState {
        let mut s = LanderState::new(100.0);
        s.pos = Vector3::new(0.0, -(MARS_RADIUS + 5_000.0), 0.0);
        s.vel = vel;
        s
    }

    #[test]
    fn vacuum_coast_is_pure_gravity() {
        let s = descending(Vector3::new(0.0, -100.0, 0.0));
        let a = acceleration(&s, &Lander::default(), &Atmosphere::vacuum(), &Vector3::zeros());
        assert_relative_eq!(a, gravity_accel(&s.pos), epsilon = 1e-15);
    }

    #[test]
    fn zero_velocity_has_no_drag_and_no_nan() {
        let mut s = descending(Vector3::zeros());
        s.parachute = ParachuteStatus::Deployed;
        let a = acceleration(&s, &Lander::default(), &Atmosphere::default(), &Vector3::zeros());
        assert!(a.iter().all(|c| c.is_finite()));
        assert_relative_eq!(a, gravity_accel(&s.pos), epsilon = 1e-15);
    }

    #[test]
    fn deploying_parachute_increases_drag() {
        let lander = Lander::default();
        let atm = Atmosphere::default();
        let g = gravity_accel(&descending(Vector3::zeros()).pos);

        let closed = descending(Vector3::new(0.0, 80.0, 0.0));
        let mut open = closed.clone();
        open.parachute = ParachuteStatus::Deployed;

        let drag_closed = (acceleration(&closed, &lander, &atm, &Vector3::zeros()) - g).norm();
        let drag_open = (acceleration(&open, &lander, &atm, &Vector3::zeros()) - g).norm();
        assert!(drag_closed > 0.0);
        assert!(drag_open > drag_closed);
    }

    #[test]
    fn more_fuel_means_less_thrust_acceleration() {
        let lander = Lander::default();
        let atm = Atmosphere::vacuum();
        let thrust = Vector3::new(0.0, -lander.max_thrust, 0.0);

        let mut light = descending(Vector3::zeros());
        light.fuel = 20.0;
        let mut heavy = light.clone();
        heavy.fuel = 40.0;

        let g = gravity_accel(&light.pos);
        let a_light = (acceleration(&light, &lander, &atm, &thrust) - g).norm();
        let a_heavy = (acceleration(&heavy, &lander, &atm, &thrust) - g).norm();
        assert!(a_heavy < a_light);
        assert_relative_eq!(a_light, lander.max_thrust / 120.0, epsilon = 1e-12);
    }

    #[test]
    fn drag_uses_fuelled_mass() {
        let lander = Lander::default();
        let atm = Atmosphere::default();
        let s = descending(Vector3::new(0.0, 100.0, 0.0));
        let drag = aerodynamics::total_drag(&s.vel, atm.density(&s.pos), &lander, s.parachute);
        let a = acceleration(&s, &lander, &atm, &Vector3::zeros());
        assert_relative_eq!(a - gravity_accel(&s.pos), drag / 200.0, epsilon = 1e-12);
    }
}
