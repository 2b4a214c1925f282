use log::info;
use serde::Serialize;

use crate::dynamics::state::{LanderState, ParachuteStatus};
use crate::dynamics::total_mass;
use crate::physics::aerodynamics::parachute_overloaded;
use crate::physics::atmosphere::Atmosphere;
use crate::physics::gravity::gravity_force;
use crate::physics::vector::direction;
use crate::vehicle::Lander;
use super::{Autopilot, Pid};

// ---------------------------------------------------------------------------
// Proportional descent-rate autopilot
// ---------------------------------------------------------------------------

/// One tick of controller telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AutopilotSample {
    pub altitude: f64,     // m
    pub error: f64,        // m/s
    pub descent_rate: f64, // m/s, positive while descending
}

/// Tracks a target descent rate that shrinks linearly with altitude:
/// `v_target = -(v_touchdown + kh * h)`.
///
/// Throttle is the hover throttle plus `kp * error`, saturated to 0..=1.
/// The parachute opens once the lander is low enough and the canopy would
/// survive.
#[derive(Debug, Clone)]
pub struct ProportionalAutopilot {
    pub kh: f64,
    pub touchdown_speed: f64,       // m/s
    pub parachute_altitude: f64,    // m, open the canopy below this
    pid: Pid,
    samples: Vec<AutopilotSample>,
}

impl ProportionalAutopilot {
    pub fn new(kh: f64, kp: f64) -> Self {
        Self {
            kh,
            touchdown_speed: 0.5,
            parachute_altitude: 30_000.0,
            pid: Pid::proportional(kp),
            samples: Vec::new(),
        }
    }

    /// Per-tick (altitude, error, descent rate) history since the last reset.
    pub fn samples(&self) -> &[AutopilotSample] {
        &self.samples
    }

    /// Throttle that exactly balances weight at the current mass.
    fn hover_throttle(state: &LanderState, lander: &Lander) -> f64 {
        if lander.max_thrust <= 0.0 {
            return 0.0;
        }
        let weight = gravity_force(&state.pos, total_mass(state, lander)).norm();
        (weight / lander.max_thrust).clamp(0.0, 1.0)
    }
}

impl Default for ProportionalAutopilot {
    fn default() -> Self {
        Self::new(0.03, 0.9)
    }
}

impl Autopilot for ProportionalAutopilot {
    fn update(
        &mut self,
        state: &mut LanderState,
        lander: &Lander,
        atmosphere: &Atmosphere,
        dt: f64,
    ) {
        let Some(up) = direction(&state.pos) else {
            return;
        };
        let altitude = state.altitude();
        let climb = state.vel.dot(&up);
        let error = -(self.touchdown_speed + self.kh * altitude + climb);

        let delta = Self::hover_throttle(state, lander);
        let p_out = self.pid.update(error, dt);
        state.throttle = (delta + p_out).clamp(0.0, 1.0);

        if state.parachute == ParachuteStatus::NotDeployed
            && altitude < self.parachute_altitude
            && climb < 0.0
            && !parachute_overloaded(&state.vel, atmosphere.density(&state.pos), altitude, lander)
        {
            info!("autopilot deploying parachute at {:.0} m", altitude);
            state.parachute = ParachuteStatus::Deployed;
        }

        self.samples.push(AutopilotSample {
            altitude,
            error,
            descent_rate: -climb,
        });
    }

    fn reset(&mut self) {
        self.pid.reset();
        self.samples.clear();
    }

    fn name(&self) -> &str {
        "proportional"
    }
}
