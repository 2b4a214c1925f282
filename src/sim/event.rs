use crate::dynamics::state::{LanderState, ParachuteStatus, EXOSPHERE};

// ---------------------------------------------------------------------------
// Simulation events
// ---------------------------------------------------------------------------

/// Kinds of simulation events.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    AtmosphereEntry,
    ParachuteDeployed,
    ParachuteLost,
    FuelExhausted,
    Touchdown,
    Crash,
}

/// A discrete event that occurred during simulation.
#[derive(Debug, Clone)]
pub struct SimEvent {
    pub time: f64,
    pub kind: EventKind,
    pub state: LanderState,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive states and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &LanderState, current: &LanderState) -> Option<EventKind>;
}

/// Fires each time the lander descends through the exosphere boundary.
pub struct AtmosphereEntryDetector;

impl EventDetector for AtmosphereEntryDetector {
    fn check(&mut self, prev: &LanderState, current: &LanderState) -> Option<EventKind> {
        (prev.altitude() > EXOSPHERE && current.altitude() <= EXOSPHERE)
            .then_some(EventKind::AtmosphereEntry)
    }
}

/// Parachute status transitions.
pub struct ParachuteDetector;

impl EventDetector for ParachuteDetector {
    fn check(&mut self, prev: &LanderState, current: &LanderState) -> Option<EventKind> {
        match (prev.parachute, current.parachute) {
            (ParachuteStatus::NotDeployed, ParachuteStatus::Deployed) => {
                Some(EventKind::ParachuteDeployed)
            }
            (ParachuteStatus::Deployed, ParachuteStatus::Lost) => Some(EventKind::ParachuteLost),
            _ => None,
        }
    }
}

pub struct FuelDetector;

impl EventDetector for FuelDetector {
    fn check(&mut self, prev: &LanderState, current: &LanderState) -> Option<EventKind> {
        (prev.fuel > 0.0 && current.fuel <= 0.0).then_some(EventKind::FuelExhausted)
    }
}

/// Reports the tick the lander reaches the ground, soft or not.
pub struct TouchdownDetector;

impl EventDetector for TouchdownDetector {
    fn check(&mut self, prev: &LanderState, current: &LanderState) -> Option<EventKind> {
        if prev.landed || !current.landed {
            return None;
        }
        Some(if current.crashed {
            EventKind::Crash
        } else {
            EventKind::Touchdown
        })
    }
}

/// Every detector above, in a fresh state.
pub fn default_detectors() -> Vec<Box<dyn EventDetector>> {
    vec![
        Box::new(AtmosphereEntryDetector),
        Box::new(ParachuteDetector),
        Box::new(FuelDetector),
        Box::new(TouchdownDetector),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::state::MARS_RADIUS;
    use nalgebra::Vector3;

    fn make_state(alt: f64) -> LanderState {
        let mut s = LanderState::new(50.0);
        s.pos = Vector3::new(0.0, 0.0, MARS_RADIUS + alt);
        s
    }

    #[test]
    fn atmosphere_entry_detected_once_per_crossing() {
        let mut det = AtmosphereEntryDetector;
        let prev = make_state(EXOSPHERE + 10.0);
        let curr = make_state(EXOSPHERE - 10.0);
        assert_eq!(det.check(&prev, &curr), Some(EventKind::AtmosphereEntry));
        assert_eq!(det.check(&curr, &make_state(EXOSPHERE - 20.0)), None);
    }

    #[test]
    fn parachute_transitions() {
        let mut det = ParachuteDetector;
        let closed = make_state(5_000.0);
        let mut open = closed.clone();
        open.parachute = ParachuteStatus::Deployed;
        let mut lost = closed.clone();
        lost.parachute = ParachuteStatus::Lost;

        assert_eq!(det.check(&closed, &open), Some(EventKind::ParachuteDeployed));
        assert_eq!(det.check(&open, &lost), Some(EventKind::ParachuteLost));
        assert_eq!(det.check(&open, &open), None);
    }

    #[test]
    fn fuel_exhaustion() {
        let mut det = FuelDetector;
        let prev = make_state(100.0);
        let mut empty = prev.clone();
        empty.fuel = 0.0;
        assert_eq!(det.check(&prev, &empty), Some(EventKind::FuelExhausted));
        assert_eq!(det.check(&empty, &empty), None);
    }

    #[test]
    fn touchdown_versus_crash() {
        let mut det = TouchdownDetector;
        let flying = make_state(1.0);
        let mut down = make_state(0.5);
        down.landed = true;
        assert_eq!(det.check(&flying, &down), Some(EventKind::Touchdown));
        down.crashed = true;
        assert_eq!(det.check(&flying, &down), Some(EventKind::Crash));
        assert_eq!(det.check(&down, &down), None);
    }
}
