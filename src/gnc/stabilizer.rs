use log::trace;

use crate::dynamics::state::LanderState;
use crate::physics::attitude::radial_orientation;
use super::AttitudeControl;

/// Keeps the lander base facing the planet by pointing the body +z axis
/// along the local vertical every tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct RadialStabilizer;

impl AttitudeControl for RadialStabilizer {
    fn stabilize(&mut self, state: &mut LanderState) {
        match radial_orientation(&state.pos) {
            Some(orientation) => state.orientation = orientation,
            None => trace!("no local vertical at the planet centre, attitude unchanged"),
        }
    }

    fn name(&self) -> &str {
        "radial"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn body_axis_points_away_from_planet() {
        let mut s = LanderState::new(100.0);
        s.pos = Vector3::new(1.0e6, -3.0e6, 0.5e6);
        s.orientation = Vector3::new(12.0, 34.0, 56.0);
        RadialStabilizer.stabilize(&mut s);
        assert_relative_eq!(s.body_z(), s.pos.normalize(), epsilon = 1e-6);
    }

    #[test]
    fn orientation_kept_at_centre() {
        let mut s = LanderState::new(100.0);
        s.pos = Vector3::zeros();
        s.orientation = Vector3::new(1.0, 2.0, 3.0);
        RadialStabilizer.stabilize(&mut s);
        assert_eq!(s.orientation, Vector3::new(1.0, 2.0, 3.0));
    }
}
