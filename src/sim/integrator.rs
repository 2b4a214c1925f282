use log::debug;
use nalgebra::Vector3;

use crate::dynamics::state::LanderState;

// ---------------------------------------------------------------------------
// Position history: fixed 2-slot ring buffer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
struct PositionHistory {
    slots: [Vector3<f64>; 2],
    newest: usize,
    len: usize,
}

impl PositionHistory {
    fn push(&mut self, pos: Vector3<f64>) {
        self.newest = (self.newest + 1) % 2;
        self.slots[self.newest] = pos;
        self.len = (self.len + 1).min(2);
    }

    /// Sample before the newest one, if two have been recorded.
    fn previous(&self) -> Option<&Vector3<f64>> {
        (self.len == 2).then(|| &self.slots[1 - self.newest])
    }

    fn clear(&mut self) {
        self.len = 0;
    }
}

// ---------------------------------------------------------------------------
// Euler-bootstrapped position Verlet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No history yet. The next step is a single forward-Euler step.
    Bootstrap,
    /// Two positions recorded. Steps use the Verlet recurrence.
    Steady,
}

/// Fixed-step integrator for position and velocity.
///
/// The first step after a reset is explicit Euler, which supplies the two
/// position samples the Verlet recurrence needs. Every later step is
/// `x' = 2x - x_prev + dt^2 a` with velocity from the backward difference.
#[derive(Debug, Clone, Default)]
pub struct Integrator {
    history: PositionHistory,
}

impl Integrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        match self.history.previous() {
            Some(_) => Mode::Steady,
            None => Mode::Bootstrap,
        }
    }

    /// Forget all history. Only a scenario (re)selection should do this.
    pub fn reset(&mut self) {
        if self.mode() == Mode::Steady {
            debug!("integrator reset to bootstrap");
        }
        self.history.clear();
    }

    /// Advance `state.pos` and `state.vel` by one step of `dt`.
    ///
    /// `accel` must be evaluated at the current (pre-step) state. `dt` must
    /// be positive; the caller guarantees it.
    pub fn advance(&mut self, state: &mut LanderState, accel: &Vector3<f64>, dt: f64) {
        match self.history.previous().copied() {
            None => {
                self.history.clear();
                self.history.push(state.pos);

                state.pos += dt * state.vel;
                state.vel += dt * accel;
                self.history.push(state.pos);

                debug!("integrator bootstrapped, switching to verlet");
            }
            Some(prev) => {
                let current = state.pos;
                let next = 2.0 * current - prev + dt * dt * accel;

                state.vel = (next - current) / dt;
                state.pos = next;
                self.history.push(next);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
