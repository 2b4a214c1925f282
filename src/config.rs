//! TOML run configuration: lander overrides, atmosphere model and extra
//! scenario slots.

use std::path::Path;

use nalgebra::Vector3;
use serde::Deserialize;
use thiserror::Error;

use crate::dynamics::state::ParachuteStatus;
use crate::error::SimError;
use crate::physics::atmosphere::Atmosphere;
use crate::scenario::{ScenarioPreset, ScenarioTable, SCENARIO_COUNT};
use crate::vehicle::{Lander, LanderBuilder};

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("scenario index {0} is out of range (0..=9)")]
    ScenarioIndex(usize),
    #[error("invalid value for {field}: {value}")]
    Invalid { field: &'static str, value: f64 },
}

/// Top-level run configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub lander: LanderConfig,
    pub atmosphere: Atmosphere,
    pub scenario: Vec<ScenarioConfig>,
}

/// Overrides for the default lander. Unset fields keep their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LanderConfig {
    pub size: Option<f64>,
    pub unloaded_mass: Option<f64>,
    pub fuel_capacity: Option<f64>,
    pub fuel_density: Option<f64>,
    pub fuel_rate_at_max_thrust: Option<f64>,
    pub max_thrust: Option<f64>,
    pub drag_coef_lander: Option<f64>,
    pub drag_coef_chute: Option<f64>,
    pub max_parachute_drag: Option<f64>,
    pub max_parachute_speed: Option<f64>,
    pub max_impact_descent_rate: Option<f64>,
    pub max_impact_ground_speed: Option<f64>,
}

/// One `[[scenario]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioConfig {
    pub index: usize,
    #[serde(default)]
    pub description: String,
    pub position: [f64; 3],
    #[serde(default)]
    pub velocity: [f64; 3],
    #[serde(default)]
    pub orientation: [f64; 3], // degrees
    #[serde(default = "default_dt")]
    pub dt: f64,
    #[serde(default)]
    pub parachute: ParachuteStatus,
    #[serde(default)]
    pub stabilized_attitude: bool,
    #[serde(default)]
    pub autopilot_enabled: bool,
}

fn default_dt() -> f64 {
    0.1
}

impl ScenarioConfig {
    pub fn to_preset(&self) -> ScenarioPreset {
        ScenarioPreset {
            description: self.description.clone(),
            pos: Vector3::from(self.position),
            vel: Vector3::from(self.velocity),
            orientation: Vector3::from(self.orientation),
            dt: self.dt,
            parachute: self.parachute,
            stabilized_attitude: self.stabilized_attitude,
            autopilot_enabled: self.autopilot_enabled,
        }
    }
}

impl RunConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let l = &self.lander;
        let positive = [
            ("lander.size", l.size),
            ("lander.unloaded_mass", l.unloaded_mass),
            ("lander.fuel_density", l.fuel_density),
        ];
        for (field, value) in positive {
            if let Some(v) = value.filter(|v| *v <= 0.0 || !v.is_finite()) {
                return Err(ConfigError::Invalid { field, value: v });
            }
        }
        let non_negative = [
            ("lander.fuel_capacity", l.fuel_capacity),
            ("lander.fuel_rate_at_max_thrust", l.fuel_rate_at_max_thrust),
            ("lander.max_thrust", l.max_thrust),
        ];
        for (field, value) in non_negative {
            if let Some(v) = value.filter(|v| *v < 0.0 || !v.is_finite()) {
                return Err(ConfigError::Invalid { field, value: v });
            }
        }
        if self.atmosphere.scale_height <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "atmosphere.scale_height",
                value: self.atmosphere.scale_height,
            });
        }
        if let Some(s) = self.scenario.iter().find(|s| s.index >= SCENARIO_COUNT) {
            return Err(ConfigError::ScenarioIndex(s.index));
        }
        Ok(())
    }

    /// The default lander with this file's overrides applied.
    pub fn build_lander(&self) -> Lander {
        let l = &self.lander;
        let mut b = LanderBuilder::new();
        if let Some(v) = l.size { b = b.size(v); }
        if let Some(v) = l.unloaded_mass { b = b.unloaded_mass(v); }
        if let Some(v) = l.fuel_capacity { b = b.fuel_capacity(v); }
        if let Some(v) = l.fuel_density { b = b.fuel_density(v); }
        if let Some(v) = l.fuel_rate_at_max_thrust { b = b.fuel_rate_at_max_thrust(v); }
        if let Some(v) = l.max_thrust { b = b.max_thrust(v); }
        if let Some(v) = l.drag_coef_lander { b = b.drag_coef_lander(v); }
        if let Some(v) = l.drag_coef_chute { b = b.drag_coef_chute(v); }
        if let Some(v) = l.max_parachute_drag { b = b.max_parachute_drag(v); }
        if let Some(v) = l.max_parachute_speed { b = b.max_parachute_speed(v); }
        if let Some(v) = l.max_impact_descent_rate { b = b.max_impact_descent_rate(v); }
        if let Some(v) = l.max_impact_ground_speed { b = b.max_impact_ground_speed(v); }
        b.build()
    }

    /// Built-in scenarios with `[[scenario]]` entries layered on top.
    pub fn build_scenarios(&self, lander: &Lander) -> Result<ScenarioTable, SimError> {
        let mut table = ScenarioTable::builtin(lander);
        for entry in &self.scenario {
            table.set(entry.index, entry.to_preset())?;
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = RunConfig::parse("").unwrap();
        assert_eq!(cfg.build_lander(), Lander::default());
        assert_eq!(cfg.atmosphere, Atmosphere::default());
        assert!(cfg.scenario.is_empty());
    }

    #[test]
    fn lander_overrides_recompute_thrust() {
        let cfg = RunConfig::parse(
            r#"
            [lander]
            unloaded_mass = 200.0
            max_impact_descent_rate = 2.0
            "#,
        )
        .unwrap();
        let lander = cfg.build_lander();
        assert_relative_eq!(lander.unloaded_mass, 200.0);
        assert_relative_eq!(lander.max_impact_descent_rate, 2.0);
        assert_relative_eq!(lander.twr(), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn partial_atmosphere_section() {
        let cfg = RunConfig::parse(
            r#"
            [atmosphere]
            surface_density = 0.02
            "#,
        )
        .unwrap();
        assert_relative_eq!(cfg.atmosphere.surface_density, 0.02);
        assert_relative_eq!(cfg.atmosphere.scale_height, 11_000.0);
    }

    #[test]
    fn scenario_fills_placeholder_slot() {
        let cfg = RunConfig::parse(
            r#"
            [[scenario]]
            index = 7
            description = "hover test"
            position = [0.0, 0.0, 3387000.0]
            orientation = [0.0, 0.0, 0.0]
            parachute = "deployed"
            autopilot_enabled = true
            "#,
        )
        .unwrap();
        let lander = cfg.build_lander();
        let table = cfg.build_scenarios(&lander).unwrap();
        let p = table.get(7).unwrap();
        assert_eq!(p.description, "hover test");
        assert_eq!(p.parachute, ParachuteStatus::Deployed);
        assert_relative_eq!(p.dt, 0.1);
        assert!(p.autopilot_enabled);
        assert!(!p.stabilized_attitude);
        assert_eq!(table.description(0), "circular orbit");
    }

    #[test]
    fn rejects_out_of_range_index() {
        let err = RunConfig::parse(
            r#"
            [[scenario]]
            index = 10
            position = [1.0, 0.0, 0.0]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ScenarioIndex(10)));
    }

    #[test]
    fn rejects_bad_dt_when_building() {
        let cfg = RunConfig::parse(
            r#"
            [[scenario]]
            index = 6
            position = [3400000.0, 0.0, 0.0]
            dt = -0.5
            "#,
        )
        .unwrap();
        let err = cfg.build_scenarios(&Lander::default()).unwrap_err();
        assert!(matches!(err, SimError::InvalidTimestep(_)));
    }

    #[test]
    fn rejects_negative_mass() {
        let err = RunConfig::parse("[lander]\nunloaded_mass = -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "lander.unloaded_mass", .. }));
    }

    #[test]
    fn malformed_toml_is_reported() {
        assert!(matches!(RunConfig::parse("[lander"), Err(ConfigError::Toml(_))));
    }
}
