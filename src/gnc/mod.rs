pub mod controller;
pub mod pid;
pub mod autopilot;
pub mod stabilizer;

pub use controller::{AttitudeControl, Autopilot, HoldAttitude, NoAutopilot};
pub use pid::Pid;
pub use autopilot::{AutopilotSample, ProportionalAutopilot};
pub use stabilizer::RadialStabilizer;
