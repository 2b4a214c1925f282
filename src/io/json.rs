use std::io::Write;

use serde::Serialize;

use crate::dynamics::state::{ParachuteStatus, MU_MARS};
use crate::error::SimError;
use crate::orbital;
use crate::sim::{EventKind, Flight};

/// Summary statistics computed from a flight.
#[derive(Debug, Clone, Serialize)]
pub struct FlightSummary {
    pub scenario: Option<usize>,
    pub description: String,
    pub flight_time_s: f64,
    pub final_altitude_m: f64,
    pub final_speed_ms: f64,
    pub max_speed_ms: f64,
    pub min_altitude_m: f64,
    pub fuel_used_l: f64,
    pub parachute: ParachuteStatus,
    pub landed: bool,
    pub crashed: bool,
    pub specific_energy_j_kg: f64,
    pub events: Vec<EventRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventRecord {
    pub time_s: f64,
    pub kind: String,
    pub altitude_m: f64,
}

impl FlightSummary {
    /// Compute summary from a batch run. `None` for an empty trajectory.
    pub fn from_flight(flight: &Flight, scenario: Option<usize>, description: &str) -> Option<Self> {
        let first = flight.trajectory.first()?;
        let last = flight.final_state()?;

        let max_speed = flight
            .trajectory
            .iter()
            .map(|s| s.vel.norm())
            .fold(0.0_f64, f64::max);
        let min_altitude = flight
            .trajectory
            .iter()
            .map(|s| s.altitude())
            .fold(f64::INFINITY, f64::min);

        let events = flight
            .events
            .iter()
            .map(|e| EventRecord {
                time_s: e.time,
                kind: event_name(&e.kind).into(),
                altitude_m: e.state.altitude(),
            })
            .collect();

        Some(FlightSummary {
            scenario,
            description: description.into(),
            flight_time_s: last.time - first.time,
            final_altitude_m: last.altitude(),
            final_speed_ms: last.vel.norm(),
            max_speed_ms: max_speed,
            min_altitude_m: min_altitude,
            fuel_used_l: first.fuel - last.fuel,
            parachute: last.parachute,
            landed: last.landed,
            crashed: last.crashed,
            specific_energy_j_kg: orbital::specific_energy(&last.pos, &last.vel, MU_MARS),
            events,
        })
    }
}

pub fn event_name(kind: &EventKind) -> &'static str {
    match kind {
        EventKind::AtmosphereEntry => "atmosphere_entry",
        EventKind::ParachuteDeployed => "parachute_deployed",
        EventKind::ParachuteLost => "parachute_lost",
        EventKind::FuelExhausted => "fuel_exhausted",
        EventKind::Touchdown => "touchdown",
        EventKind::Crash => "crash",
    }
}

/// Write flight summary as pretty-printed JSON.
pub fn write_summary<W: Write>(mut writer: W, summary: &FlightSummary) -> Result<(), SimError> {
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{simulate, Simulation};

    fn crash_flight() -> (Simulation, Flight) {
        let mut sim = Simulation::with_defaults();
        sim.reset(1).unwrap();
        let flight = simulate(&mut sim, 1_000.0).unwrap();
        (sim, flight)
    }

    #[test]
    fn summary_of_free_fall() {
        let (sim, flight) = crash_flight();
        let s = FlightSummary::from_flight(&flight, Some(1), "descent from 10km").unwrap();
        assert!(s.crashed && s.landed);
        assert_eq!(s.fuel_used_l, 0.0);
        assert_eq!(s.final_speed_ms, 0.0);
        assert!(s.max_speed_ms > 100.0);
        assert!(s.min_altitude_m <= sim.lander.size / 2.0 + 1e-6);
        assert!(s.events.iter().any(|e| e.kind == "crash"));
    }

    #[test]
    fn json_output_is_valid() {
        let (_, flight) = crash_flight();
        let summary = FlightSummary::from_flight(&flight, Some(1), "descent from 10km").unwrap();

        let mut buf = Vec::new();
        write_summary(&mut buf, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["scenario"], 1);
        assert_eq!(value["description"], "descent from 10km");
        assert_eq!(value["crashed"], true);
        assert_eq!(value["parachute"], "not_deployed");
    }

    struct FailingFlush;

    impl Write for FailingFlush {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::other("disk full"))
        }
    }

    #[test]
    fn flush_failure_is_reported() {
        let (_, flight) = crash_flight();
        let summary = FlightSummary::from_flight(&flight, Some(1), "").unwrap();
        let err = write_summary(FailingFlush, &summary).unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }

    #[test]
    fn empty_flight_has_no_summary() {
        let flight = Flight { trajectory: Vec::new(), events: Vec::new() };
        assert!(FlightSummary::from_flight(&flight, None, "").is_none());
    }
}
