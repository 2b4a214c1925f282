use mars_lander::dynamics::state::{LanderState, MU_MARS, MARS_RADIUS};
use mars_lander::gnc::{Autopilot, RadialStabilizer};
use mars_lander::physics::atmosphere::Atmosphere;
use mars_lander::vehicle::Lander;
use mars_lander::{simulate_with, Simulation};

/// A bang-bang "suicide burn": engine off until the stopping distance at
/// full thrust reaches the current altitude, then full throttle until the
/// descent rate drops below the target.
struct SuicideBurn {
    margin: f64,
    target_descent: f64,
}

impl Autopilot for SuicideBurn {
    fn update(&mut self, state: &mut LanderState, lander: &Lander, _atm: &Atmosphere, _dt: f64) {
        let descent = -state.climb_speed();
        let g = MU_MARS / (MARS_RADIUS * MARS_RADIUS);
        let decel = lander.max_thrust / lander.mass(state.fuel) - g;
        if descent <= self.target_descent || decel <= 0.0 {
            state.throttle = 0.0;
            return;
        }
        let stopping = descent * descent / (2.0 * decel);
        state.throttle = if stopping * self.margin >= state.altitude() { 1.0 } else { 0.0 };
    }

    fn name(&self) -> &str {
        "SuicideBurn"
    }
}

fn main() {
    let mut sim = Simulation::with_defaults();
    if let Err(e) = sim.reset(1) {
        eprintln!("cannot load scenario: {e}");
        return;
    }
    sim.config.autopilot_enabled = true;

    let mut autopilot = SuicideBurn { margin: 1.3, target_descent: 0.8 };

    println!("Simulating with {} autopilot...", autopilot.name());
    let flight = match simulate_with(&mut sim, 3_000.0, &mut autopilot, &mut RadialStabilizer) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("simulation failed: {e}");
            return;
        }
    };

    let max_speed = flight.trajectory.iter().map(|s| s.vel.norm()).fold(0.0_f64, f64::max);
    let Some(last) = flight.final_state() else { return };

    println!("Max speed: {:.1} m/s", max_speed);
    println!("Fuel used: {:.1} l", sim.lander.fuel_capacity - last.fuel);
    println!("Flight time: {:.1} s", last.time);
    println!(
        "Outcome: {}",
        match (last.landed, last.crashed) {
            (_, true) => "crashed",
            (true, false) => "landed",
            _ => "still flying",
        }
    );
    for e in &flight.events {
        println!("  {:>7.1}s  {:?}", e.time, e.kind);
    }
}
