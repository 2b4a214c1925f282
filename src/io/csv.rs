use std::io::Write;

use ::csv::WriterBuilder;
use serde::Serialize;

use crate::dynamics::state::{LanderState, ParachuteStatus};
use crate::error::SimError;
use crate::gnc::AutopilotSample;

#[derive(Serialize)]
struct TrajectoryRow {
    time: f64,
    pos_x: f64,
    pos_y: f64,
    pos_z: f64,
    vel_x: f64,
    vel_y: f64,
    vel_z: f64,
    altitude: f64,
    speed: f64,
    fuel: f64,
    throttle: f64,
    parachute: ParachuteStatus,
}

impl From<&LanderState> for TrajectoryRow {
    fn from(s: &LanderState) -> Self {
        Self {
            time: s.time,
            pos_x: s.pos.x,
            pos_y: s.pos.y,
            pos_z: s.pos.z,
            vel_x: s.vel.x,
            vel_y: s.vel.y,
            vel_z: s.vel.z,
            altitude: s.altitude(),
            speed: s.vel.norm(),
            fuel: s.fuel,
            throttle: s.throttle,
            parachute: s.parachute,
        }
    }
}

/// Write trajectory data to CSV format.
///
/// Columns: time, pos_x, pos_y, pos_z, vel_x, vel_y, vel_z,
///          altitude, speed, fuel, throttle, parachute
pub fn write_trajectory<W: Write>(writer: W, trajectory: &[LanderState]) -> Result<(), SimError> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    for s in trajectory {
        wtr.serialize(TrajectoryRow::from(s))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Autopilot samples as whitespace-separated `altitude error descent_rate`
/// rows, no header. Plots directly in gnuplot.
pub fn write_autopilot_log<W: Write>(writer: W, samples: &[AutopilotSample]) -> Result<(), SimError> {
    let mut wtr = WriterBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .from_writer(writer);
    for s in samples {
        wtr.serialize(s)?;
    }
    wtr.flush()?;
    Ok(())
}
