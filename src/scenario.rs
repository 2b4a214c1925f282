use log::{info, warn};
use nalgebra::Vector3;

use crate::dynamics::state::{
    LanderState, ParachuteStatus, SimConfig, EXOSPHERE, MARS_RADIUS,
};
use crate::error::SimError;
use crate::sim::integrator::Integrator;
use crate::vehicle::Lander;

/// Number of selectable scenario slots.
pub const SCENARIO_COUNT: usize = 10;

// ---------------------------------------------------------------------------
// Scenario preset
// ---------------------------------------------------------------------------

/// Initial conditions and run flags for one scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioPreset {
    pub description: String,
    pub pos: Vector3<f64>,
    pub vel: Vector3<f64>,
    pub orientation: Vector3<f64>,
    pub dt: f64,
    pub parachute: ParachuteStatus,
    pub stabilized_attitude: bool,
    pub autopilot_enabled: bool,
}

impl ScenarioPreset {
    /// Rejects presets the integrator cannot start from.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.dt <= 0.0 || !self.dt.is_finite() {
            return Err(SimError::InvalidTimestep(self.dt));
        }
        if self.pos.norm() == 0.0 {
            return Err(SimError::DegeneratePosition);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Scenario table
// ---------------------------------------------------------------------------

/// Indexed presets 0..=9. Empty slots are placeholders: loading one only
/// resets the integrator.
#[derive(Debug, Clone)]
pub struct ScenarioTable {
    slots: [Option<ScenarioPreset>; SCENARIO_COUNT],
}

impl Default for ScenarioTable {
    fn default() -> Self {
        Self::builtin(&Lander::default())
    }
}

impl ScenarioTable {
    /// Table with every slot empty.
    pub fn empty() -> Self {
        Self {
            slots: Default::default(),
        }
    }

    /// The six built-in scenarios. Slots 6..=9 are left empty.
    pub fn builtin(lander: &Lander) -> Self {
        let mut table = Self::empty();
        for (index, preset) in presets::all(lander).into_iter().enumerate() {
            table.slots[index] = Some(preset);
        }
        table
    }

    /// Fill or replace a slot.
    pub fn set(&mut self, index: usize, preset: ScenarioPreset) -> Result<(), SimError> {
        preset.validate()?;
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(SimError::UnknownScenario(index))?;
        *slot = Some(preset);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&ScenarioPreset> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Display text for a slot. Empty slots have an empty description.
    pub fn description(&self, index: usize) -> &str {
        self.get(index).map_or("", |p| p.description.as_str())
    }

    /// Seed the session from slot `index` and put the integrator back into
    /// bootstrap mode.
    ///
    /// A defined preset overwrites position, velocity, orientation, timestep,
    /// parachute status and both policy flags, and clears any touchdown. An
    /// empty slot changes nothing but the integrator mode. Returns whether a
    /// preset was applied.
    pub fn load(
        &self,
        index: usize,
        state: &mut LanderState,
        config: &mut SimConfig,
        integrator: &mut Integrator,
    ) -> Result<bool, SimError> {
        let slot = self
            .slots
            .get(index)
            .ok_or(SimError::UnknownScenario(index))?;

        integrator.reset();

        let Some(preset) = slot else {
            warn!("scenario {index} is empty, only the integrator was reset");
            return Ok(false);
        };

        state.pos = preset.pos;
        state.vel = preset.vel;
        state.orientation = preset.orientation;
        state.parachute = preset.parachute;
        state.landed = false;
        state.crashed = false;
        config.dt = preset.dt;
        config.stabilized_attitude = preset.stabilized_attitude;
        config.autopilot_enabled = preset.autopilot_enabled;

        info!("loaded scenario {index}: {}", preset.description);
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Built-in presets
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    /// Speed of the circular equatorial orbit at 1.2 planet radii.
    pub const CIRCULAR_ORBIT_SPEED: f64 = 3247.087385863725;

    fn preset(
        description: &str,
        pos: Vector3<f64>,
        vel: Vector3<f64>,
        orientation: Vector3<f64>,
        stabilized_attitude: bool,
    ) -> ScenarioPreset {
        ScenarioPreset {
            description: description.into(),
            pos,
            vel,
            orientation,
            dt: 0.1,
            parachute: ParachuteStatus::NotDeployed,
            stabilized_attitude,
            autopilot_enabled: false,
        }
    }

    pub fn circular_orbit() -> ScenarioPreset {
        preset(
            "circular orbit",
            Vector3::new(1.2 * MARS_RADIUS, 0.0, 0.0),
            Vector3::new(0.0, -CIRCULAR_ORBIT_SPEED, 0.0),
            Vector3::new(0.0, 90.0, 0.0),
            false,
        )
    }

    pub fn descent_from_10km() -> ScenarioPreset {
        preset(
            "descent from 10km",
            Vector3::new(0.0, -(MARS_RADIUS + 10_000.0), 0.0),
            Vector3::zeros(),
            Vector3::new(0.0, 0.0, 90.0),
            true,
        )
    }

    pub fn elliptical_polar_orbit() -> ScenarioPreset {
        preset(
            "elliptical orbit, thrust changes orbital plane",
            Vector3::new(0.0, 0.0, 1.2 * MARS_RADIUS),
            Vector3::new(3500.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 90.0),
            false,
        )
    }

    pub fn polar_launch(lander: &Lander) -> ScenarioPreset {
        preset(
            "polar launch at escape velocity (but drag prevents escape)",
            Vector3::new(0.0, 0.0, MARS_RADIUS + lander.size / 2.0),
            Vector3::new(0.0, 0.0, 5027.0),
            Vector3::zeros(),
            false,
        )
    }

    pub fn aerobraking_orbit() -> ScenarioPreset {
        preset(
            "elliptical orbit that clips the atmosphere and decays",
            Vector3::new(0.0, 0.0, MARS_RADIUS + 100_000.0),
            Vector3::new(4000.0, 0.0, 0.0),
            Vector3::new(0.0, 90.0, 0.0),
            false,
        )
    }

    pub fn descent_from_exosphere() -> ScenarioPreset {
        preset(
            "descent from 200km",
            Vector3::new(0.0, -(MARS_RADIUS + EXOSPHERE), 0.0),
            Vector3::zeros(),
            Vector3::new(0.0, 0.0, 90.0),
            true,
        )
    }

    /// Built-ins in slot order 0..=5.
    pub fn all(lander: &Lander) -> Vec<ScenarioPreset> {
        vec![
            circular_orbit(),
            descent_from_10km(),
            elliptical_polar_orbit(),
            polar_launch(lander),
            aerobraking_orbit(),
            descent_from_exosphere(),
        ]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
