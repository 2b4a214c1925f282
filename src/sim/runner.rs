use log::{debug, info, trace, warn};

use crate::dynamics;
use crate::dynamics::state::{LanderState, ParachuteStatus, SimConfig, MARS_RADIUS};
use crate::error::SimError;
use crate::gnc::{AttitudeControl, Autopilot, NoAutopilot, RadialStabilizer};
use crate::physics::aerodynamics::parachute_overloaded;
use crate::physics::atmosphere::Atmosphere;
use crate::physics::propulsion::{fuel_burned, thrust_wrt_world};
use crate::physics::vector::direction;
use crate::scenario::ScenarioTable;
use crate::vehicle::Lander;
use super::event::{default_detectors, EventDetector, SimEvent};
use super::integrator::{Integrator, Mode};

// ---------------------------------------------------------------------------
// Simulation session
// ---------------------------------------------------------------------------

/// Flight phase after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Flying,
    Landed,
    Crashed,
}

/// One independent lander simulation: state, run flags, vehicle, planet
/// atmosphere, integrator history and the scenario table.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub state: LanderState,
    pub config: SimConfig,
    pub lander: Lander,
    pub atmosphere: Atmosphere,
    scenarios: ScenarioTable,
    integrator: Integrator,
    scenario: Option<usize>,
}

impl Simulation {
    pub fn new(lander: Lander, atmosphere: Atmosphere, scenarios: ScenarioTable) -> Self {
        Self {
            state: LanderState::new(lander.fuel_capacity),
            config: SimConfig::default(),
            lander,
            atmosphere,
            scenarios,
            integrator: Integrator::new(),
            scenario: None,
        }
    }

    /// Default lander, exponential atmosphere, built-in scenarios.
    pub fn with_defaults() -> Self {
        let lander = Lander::default();
        let scenarios = ScenarioTable::builtin(&lander);
        Self::new(lander, Atmosphere::default(), scenarios)
    }

    pub fn scenarios(&self) -> &ScenarioTable {
        &self.scenarios
    }

    /// Index of the last selected scenario.
    pub fn scenario(&self) -> Option<usize> {
        self.scenario
    }

    pub fn integrator_mode(&self) -> Mode {
        self.integrator.mode()
    }

    /// Apply scenario `index` to the session and return the integrator to
    /// bootstrap mode. A defined preset also clears a previous touchdown so
    /// the next tick flies again. Clock and fuel are left alone.
    pub fn load_scenario(&mut self, index: usize) -> Result<bool, SimError> {
        let applied = self.scenarios.load(
            index,
            &mut self.state,
            &mut self.config,
            &mut self.integrator,
        )?;
        self.scenario = Some(index);
        Ok(applied)
    }

    /// Start a fresh run of scenario `index`: clock to zero, full tank,
    /// engine off, touchdown flags cleared, then [`Self::load_scenario`].
    pub fn reset(&mut self, index: usize) -> Result<bool, SimError> {
        if index >= crate::scenario::SCENARIO_COUNT {
            return Err(SimError::UnknownScenario(index));
        }
        self.state.time = 0.0;
        self.state.fuel = self.lander.fuel_capacity;
        self.state.throttle = 0.0;
        self.state.landed = false;
        self.state.crashed = false;
        self.load_scenario(index)
    }

    pub fn phase(&self) -> Phase {
        match (self.state.landed, self.state.crashed) {
            (_, true) => Phase::Crashed,
            (true, false) => Phase::Landed,
            (false, false) => Phase::Flying,
        }
    }

    fn check_preconditions(&self) -> Result<(), SimError> {
        let dt = self.config.dt;
        if dt <= 0.0 || !dt.is_finite() {
            return Err(SimError::InvalidTimestep(dt));
        }
        if self.state.pos.norm() == 0.0 {
            return Err(SimError::DegeneratePosition);
        }
        Ok(())
    }

    /// Advance one tick.
    ///
    /// Order: force model and integrator, autopilot (if enabled), attitude
    /// stabilization (if enabled), clock, fuel burn, parachute load check,
    /// touchdown check. After touchdown further calls change nothing.
    pub fn step(
        &mut self,
        autopilot: &mut dyn Autopilot,
        attitude: &mut dyn AttitudeControl,
    ) -> Result<Phase, SimError> {
        if self.state.landed {
            return Ok(self.phase());
        }
        self.check_preconditions()?;
        let dt = self.config.dt;

        let thrust = thrust_wrt_world(
            self.state.throttle,
            &self.state.orientation,
            self.state.fuel,
            self.lander.max_thrust,
        );
        let accel = dynamics::acceleration(&self.state, &self.lander, &self.atmosphere, &thrust);
        self.integrator.advance(&mut self.state, &accel, dt);

        if self.config.autopilot_enabled {
            autopilot.update(&mut self.state, &self.lander, &self.atmosphere, dt);
        }
        if self.config.stabilized_attitude {
            attitude.stabilize(&mut self.state);
        }

        self.state.time += dt;
        self.burn_fuel(dt);
        self.check_parachute();
        self.check_touchdown();

        trace!(
            "t={:.1} alt={:.1} speed={:.2} fuel={:.2}",
            self.state.time,
            self.state.altitude(),
            self.state.vel.norm(),
            self.state.fuel
        );
        Ok(self.phase())
    }

    fn burn_fuel(&mut self, dt: f64) {
        if self.state.fuel <= 0.0 {
            return;
        }
        let burned = fuel_burned(self.state.throttle, self.lander.fuel_rate_at_max_thrust, dt);
        self.state.fuel = (self.state.fuel - burned).max(0.0);
        if self.state.fuel == 0.0 {
            info!("fuel exhausted at t={:.1}s", self.state.time);
        }
    }

    fn check_parachute(&mut self) {
        if self.state.parachute != ParachuteStatus::Deployed {
            return;
        }
        let density = self.atmosphere.density(&self.state.pos);
        if parachute_overloaded(&self.state.vel, density, self.state.altitude(), &self.lander) {
            warn!(
                "parachute lost at alt={:.0}m speed={:.1}m/s",
                self.state.altitude(),
                self.state.vel.norm()
            );
            self.state.parachute = ParachuteStatus::Lost;
        }
    }

    fn check_touchdown(&mut self) {
        let contact = self.lander.size / 2.0;
        if self.state.altitude() >= contact {
            return;
        }
        let climb = self.state.climb_speed();
        let ground = self.state.ground_speed();

        self.state.landed = true;
        self.state.crashed = climb < -self.lander.max_impact_descent_rate
            || ground > self.lander.max_impact_ground_speed;

        // Rest on the surface, base down.
        if let Some(up) = direction(&self.state.pos) {
            self.state.pos = up * (MARS_RADIUS + contact);
        }
        self.state.vel = nalgebra::Vector3::zeros();
        self.state.throttle = 0.0;

        if self.state.crashed {
            warn!(
                "crashed at t={:.1}s: descent {:.2}m/s, ground speed {:.2}m/s",
                self.state.time, -climb, ground
            );
        } else {
            info!(
                "landed at t={:.1}s: descent {:.2}m/s, ground speed {:.2}m/s",
                self.state.time, -climb, ground
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Batch runs
// ---------------------------------------------------------------------------

/// Result of a batch run.
#[derive(Debug, Clone)]
pub struct Flight {
    pub trajectory: Vec<LanderState>,
    pub events: Vec<SimEvent>,
}

impl Flight {
    pub fn final_state(&self) -> Option<&LanderState> {
        self.trajectory.last()
    }
}

/// Run the session from its current state until touchdown or `max_time`
/// with the given policies. Returns every tick plus detected events.
///
/// The autopilot is reset first, so samples and controller memory cover
/// this run only.
pub fn simulate_with(
    sim: &mut Simulation,
    max_time: f64,
    autopilot: &mut dyn Autopilot,
    attitude: &mut dyn AttitudeControl,
) -> Result<Flight, SimError> {
    let capacity = (max_time / sim.config.dt.max(1e-9)) as usize + 1;
    let mut trajectory = Vec::with_capacity(capacity.min(200_000));
    let mut events = Vec::new();
    let mut detectors: Vec<Box<dyn EventDetector>> = default_detectors();

    debug!(
        "batch run: autopilot={} attitude={} max_time={:.0}s",
        autopilot.name(),
        attitude.name(),
        max_time
    );

    autopilot.reset();
    trajectory.push(sim.state.clone());
    while sim.state.time < max_time {
        let prev = sim.state.clone();
        let phase = sim.step(autopilot, attitude)?;

        for det in detectors.iter_mut() {
            if let Some(kind) = det.check(&prev, &sim.state) {
                events.push(SimEvent {
                    time: sim.state.time,
                    kind,
                    state: sim.state.clone(),
                });
            }
        }
        trajectory.push(sim.state.clone());

        if phase != Phase::Flying {
            break;
        }
    }

    Ok(Flight { trajectory, events })
}

/// Batch run with no autopilot and radial attitude stabilization.
pub fn simulate(sim: &mut Simulation, max_time: f64) -> Result<Flight, SimError> {
    simulate_with(sim, max_time, &mut NoAutopilot, &mut RadialStabilizer)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
