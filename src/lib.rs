//! Translational dynamics of a Mars lander: gravity, thrust and drag, a
//! Euler-bootstrapped position Verlet integrator, scenario presets and
//! pluggable autopilot and attitude policies.

pub mod config;
pub mod dynamics;
pub mod error;
pub mod gnc;
pub mod io;
pub mod orbital;
pub mod physics;
pub mod scenario;
pub mod sim;
pub mod vehicle;

pub use config::RunConfig;
pub use dynamics::state::{LanderState, ParachuteStatus, SimConfig};
pub use error::SimError;
pub use scenario::{ScenarioPreset, ScenarioTable};
pub use sim::{simulate, simulate_with, Flight, Phase, Simulation};
pub use vehicle::{Lander, LanderBuilder};
