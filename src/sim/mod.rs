pub mod integrator;
pub mod runner;
pub mod event;

pub use integrator::{Integrator, Mode};
pub use runner::{simulate, simulate_with, Flight, Phase, Simulation};
pub use event::{EventKind, SimEvent};
