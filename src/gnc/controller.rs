use crate::dynamics::state::LanderState;
use crate::physics::atmosphere::Atmosphere;
use crate::vehicle::Lander;

/// Throttle and parachute policy, invoked once per tick when the scenario
/// enables it.
///
/// Implementations may write `throttle`, `parachute` and `orientation`.
/// Position and velocity belong to the integrator and must be left alone.
pub trait Autopilot {
    fn update(
        &mut self,
        state: &mut LanderState,
        lander: &Lander,
        atmosphere: &Atmosphere,
        dt: f64,
    );

    /// Reset internal state (e.g., PID integrators). Batch runs call this
    /// before their first tick.
    fn reset(&mut self) {}

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}

/// Attitude policy. Overwrites `orientation` once per tick when the
/// scenario enables stabilization.
pub trait AttitudeControl {
    fn stabilize(&mut self, state: &mut LanderState);

    fn name(&self) -> &str {
        "unnamed"
    }
}

/// Leaves throttle and parachute untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAutopilot;

impl Autopilot for NoAutopilot {
    fn update(&mut self, _: &mut LanderState, _: &Lander, _: &Atmosphere, _: f64) {}

    fn name(&self) -> &str {
        "none"
    }
}

/// Leaves orientation untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoldAttitude;

impl AttitudeControl for HoldAttitude {
    fn stabilize(&mut self, _: &mut LanderState) {}

    fn name(&self) -> &str {
        "hold"
    }
}
