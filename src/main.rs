use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;

use mars_lander::dynamics::state::{LanderState, MU_MARS};
use mars_lander::gnc::{
    AttitudeControl, Autopilot, HoldAttitude, NoAutopilot, ProportionalAutopilot, RadialStabilizer,
};
use mars_lander::io::csv::{write_autopilot_log, write_trajectory};
use mars_lander::io::json::{event_name, write_summary, FlightSummary};
use mars_lander::io::writer_for_path;
use mars_lander::orbital;
use mars_lander::{simulate_with, RunConfig, Simulation};

/// Batch-run a Mars lander scenario and report the flight.
#[derive(Parser, Debug)]
#[command(author, version, about = "Mars lander dynamics simulator")]
struct Cli {
    /// Scenario slot to run (0..=9)
    #[arg(short, long, default_value_t = 1)]
    scenario: usize,

    /// Stop after this many simulated seconds
    #[arg(long, default_value_t = 10_000.0)]
    max_time: f64,

    /// TOML run configuration (lander overrides, atmosphere, extra scenarios)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fly with the proportional descent autopilot regardless of the scenario flag
    #[arg(long, default_value_t = false)]
    autopilot: bool,

    /// Trajectory CSV output (use '-' for stdout)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Flight summary JSON output (use '-' for stdout)
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Autopilot analysis log (altitude, error, descent rate)
    #[arg(long)]
    analysis: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace). RUST_LOG wins when set.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let run_config = match &cli.config {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RunConfig::default(),
    };
    let lander = run_config.build_lander();
    let scenarios = run_config.build_scenarios(&lander)?;
    let mut sim = Simulation::new(lander, run_config.atmosphere, scenarios);

    let applied = sim
        .reset(cli.scenario)
        .with_context(|| format!("selecting scenario {}", cli.scenario))?;
    if !applied {
        anyhow::bail!("scenario {} is empty", cli.scenario);
    }
    if cli.autopilot {
        sim.config.autopilot_enabled = true;
    }

    let description = sim.scenarios().description(cli.scenario).to_string();
    let mut proportional = ProportionalAutopilot::default();
    let mut passive = NoAutopilot;
    let mut radial = RadialStabilizer;
    let mut hold = HoldAttitude;

    let autopilot: &mut dyn Autopilot = if sim.config.autopilot_enabled {
        &mut proportional
    } else {
        &mut passive
    };
    let attitude: &mut dyn AttitudeControl = if sim.config.stabilized_attitude {
        &mut radial
    } else {
        &mut hold
    };

    let flight = simulate_with(&mut sim, cli.max_time, autopilot, attitude)
        .context("simulation failed")?;
    let summary = FlightSummary::from_flight(&flight, Some(cli.scenario), &description)
        .context("empty trajectory")?;

    // -----------------------------------------------------------------------
    // Print results
    // -----------------------------------------------------------------------
    let lander = &sim.lander;
    println!();
    println!("====================================================================");
    println!("  MARS LANDER: scenario {} ({})", cli.scenario, description);
    println!("====================================================================");
    println!();
    println!("  Lander Parameters");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Dry mass:      {:>8.1} kg    Fuel:         {:>8.1} l",
        lander.unloaded_mass, lander.fuel_capacity
    );
    println!(
        "  Wet mass:      {:>8.1} kg    TWR:          {:>8.2}",
        lander.wet_mass(),
        lander.twr()
    );
    println!(
        "  Max thrust:    {:>8.0} N     Burn time:    {:>8.0} s",
        lander.max_thrust,
        lander.burn_time()
    );
    println!(
        "  Timestep:      {:>8.3} s     Autopilot:    {:>8}",
        sim.config.dt,
        if sim.config.autopilot_enabled { "on" } else { "off" }
    );
    println!();

    println!("  Flight Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    if flight.events.is_empty() {
        println!("  (none)");
    }
    for e in &flight.events {
        println!(
            "  {:<20} t={:>8.1}s   alt={:>9.0}m   vel={:>7.1}m/s",
            event_name(&e.kind).to_uppercase(),
            e.time,
            e.state.altitude(),
            e.state.vel.norm()
        );
    }
    println!();

    println!("  Performance Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Flight time:   {:>8.1} s     Max speed:    {:>8.1} m/s",
        summary.flight_time_s, summary.max_speed_ms
    );
    println!(
        "  Final alt:     {:>8.0} m     Min alt:      {:>8.0} m",
        summary.final_altitude_m, summary.min_altitude_m
    );
    println!(
        "  Fuel used:     {:>8.2} l     Energy:       {:>8.3e} J/kg",
        summary.fuel_used_l, summary.specific_energy_j_kg
    );
    if let Some(last) = flight.final_state().filter(|s| !s.landed) {
        print_orbit(last);
    }
    let outcome = match (summary.landed, summary.crashed) {
        (_, true) => "CRASHED",
        (true, false) => "LANDED",
        (false, false) => "IN FLIGHT",
    };
    println!("  Outcome:       {}", outcome);
    println!();
    println!("  Simulation: {} steps, dt={} s", flight.trajectory.len(), sim.config.dt);
    println!("====================================================================");
    println!();

    // -----------------------------------------------------------------------
    // Output files
    // -----------------------------------------------------------------------
    if let Some(path) = &cli.csv {
        let w = writer_for_path(path)?;
        write_trajectory(w, &flight.trajectory)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &cli.summary {
        let w = writer_for_path(path)?;
        write_summary(w, &summary).with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &cli.analysis {
        let w = writer_for_path(path)?;
        write_autopilot_log(w, proportional.samples())
            .with_context(|| format!("writing {}", path.display()))?;
    }

    Ok(())
}

fn print_orbit(state: &LanderState) {
    let r = state.pos.norm();
    let ecc = orbital::eccentricity(&state.pos, &state.vel, MU_MARS);
    match orbital::semi_major_axis(&state.pos, &state.vel, MU_MARS) {
        Some(sma) => println!(
            "  Orbit:         a={:.0} km   e={:.4}   T={:.0} s   v_circ={:.1} m/s",
            sma / 1000.0,
            ecc,
            orbital::period(sma, MU_MARS),
            orbital::circular_speed(r, MU_MARS)
        ),
        None => println!("  Orbit:         escape trajectory (e={:.4})", ecc),
    }
}
