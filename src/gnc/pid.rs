// ---------------------------------------------------------------------------
// PID Controller (single axis)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Pid {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    integral: f64,
    prev_error: Option<f64>,
}

impl Pid {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd, integral: 0.0, prev_error: None }
    }

    /// Pure proportional controller.
    pub fn proportional(kp: f64) -> Self {
        Self::new(kp, 0.0, 0.0)
    }

    pub fn update(&mut self, error: f64, dt: f64) -> f64 {
        self.integral += error * dt;
        // Anti-windup
        self.integral = self.integral.clamp(-1.0, 1.0);
        let derivative = match self.prev_error {
            Some(prev) if dt > 0.0 => (error - prev) / dt,
            _ => 0.0,
        };
        self.prev_error = Some(error);
        self.kp * error + self.ki * self.integral + self.kd * derivative
    }

    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.prev_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pid_proportional() {
        let mut pid = Pid::proportional(1.5);
        assert_relative_eq!(pid.update(0.5, 0.1), 0.75);
    }

    #[test]
    fn pid_integral_accumulates() {
        let mut pid = Pid::new(0.0, 1.0, 0.0);
        pid.update(1.0, 0.1);
        let out = pid.update(1.0, 0.1);
        assert_relative_eq!(out, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn no_derivative_kick_on_first_update() {
        let mut pid = Pid::new(0.0, 0.0, 1.0);
        assert_eq!(pid.update(10.0, 0.1), 0.0);
        assert_relative_eq!(pid.update(11.0, 0.1), 10.0, epsilon = 1e-9);
        pid.reset();
        assert_eq!(pid.update(5.0, 0.1), 0.0);
    }
}
