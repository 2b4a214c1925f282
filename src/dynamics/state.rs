use nalgebra::{Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use crate::physics::attitude;

// ---------------------------------------------------------------------------
// Planetary constants (Mars)
// ---------------------------------------------------------------------------

pub const GRAVITY: f64 = 6.673e-11;        // gravitational constant, m^3/(kg s^2)
pub const MARS_MASS: f64 = 6.42e23;        // kg
pub const MARS_RADIUS: f64 = 3_386_000.0;  // m
pub const EXOSPHERE: f64 = 200_000.0;      // edge of the atmosphere, m

/// Gravitational parameter of Mars, m^3/s^2.
pub const MU_MARS: f64 = GRAVITY * MARS_MASS;

// ---------------------------------------------------------------------------
// Parachute
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParachuteStatus {
    #[default]
    NotDeployed,
    Deployed,
    /// Torn off by excessive load. Cannot be redeployed.
    Lost,
}

impl ParachuteStatus {
    pub fn is_deployed(self) -> bool {
        self == ParachuteStatus::Deployed
    }
}

// ---------------------------------------------------------------------------
// Lander state
// ---------------------------------------------------------------------------

/// Everything that changes from tick to tick.
/// Frame: planet-centred Cartesian, origin at the centre of Mars.
#[derive(Debug, Clone, PartialEq)]
pub struct LanderState {
    pub time: f64,                   // s since reset
    pub pos: Vector3<f64>,           // m
    pub vel: Vector3<f64>,           // m/s
    pub orientation: Vector3<f64>,   // xyz Euler angles, degrees
    pub fuel: f64,                   // l of propellant remaining
    pub throttle: f64,               // 0..=1
    pub parachute: ParachuteStatus,
    pub landed: bool,
    pub crashed: bool,
}

impl LanderState {
    /// Lander at rest one planet radius out on +x, nothing else set.
    pub fn new(fuel: f64) -> Self {
        Self {
            time: 0.0,
            pos: Vector3::new(MARS_RADIUS, 0.0, 0.0),
            vel: Vector3::zeros(),
            orientation: Vector3::zeros(),
            fuel,
            throttle: 0.0,
            parachute: ParachuteStatus::NotDeployed,
            landed: false,
            crashed: false,
        }
    }

    /// Height above the mean surface.
    pub fn altitude(&self) -> f64 {
        self.pos.norm() - MARS_RADIUS
    }

    /// Velocity component along the local vertical. Negative while descending.
    pub fn climb_speed(&self) -> f64 {
        match crate::physics::vector::direction(&self.pos) {
            Some(up) => self.vel.dot(&up),
            None => 0.0,
        }
    }

    /// Velocity component tangential to the surface.
    pub fn ground_speed(&self) -> f64 {
        let climb = self.climb_speed();
        (self.vel.norm_squared() - climb * climb).max(0.0).sqrt()
    }

    /// Body to world rotation.
    pub fn attitude(&self) -> Rotation3<f64> {
        attitude::euler_to_rotation(&self.orientation)
    }

    /// Body +z axis (thrust direction) in the world frame.
    pub fn body_z(&self) -> Vector3<f64> {
        self.attitude() * Vector3::z()
    }
}

// ---------------------------------------------------------------------------
// Run configuration
// ---------------------------------------------------------------------------

/// Per-scenario run settings. Written by the scenario loader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    pub dt: f64,                     // fixed integration timestep, s
    pub stabilized_attitude: bool,
    pub autopilot_enabled: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.1,
            stabilized_attitude: false,
            autopilot_enabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn altitude_zero_on_surface() {
        let s = LanderState::new(100.0);
        assert_relative_eq!(s.altitude(), 0.0);
    }

    #[test]
    fn climb_and_ground_speed_split_velocity() {
        let mut s = LanderState::new(100.0);
        s.pos = Vector3::new(0.0, -(MARS_RADIUS + 1000.0), 0.0);
        s.vel = Vector3::new(3.0, 4.0, 0.0); // +y is downward here
        assert_relative_eq!(s.climb_speed(), -4.0, epsilon = 1e-12);
        assert_relative_eq!(s.ground_speed(), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_orientation_thrusts_along_world_z() {
        let s = LanderState::new(100.0);
        assert_relative_eq!(s.body_z(), Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn only_deployed_counts_as_deployed() {
        assert!(ParachuteStatus::Deployed.is_deployed());
        assert!(!ParachuteStatus::Lost.is_deployed());
        assert!(!ParachuteStatus::NotDeployed.is_deployed());
    }
}
