use crate::dynamics::state::{MARS_RADIUS, MU_MARS};

// ---------------------------------------------------------------------------
// Lander definition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Lander {
    pub size: f64,                     // body radius, m
    pub unloaded_mass: f64,            // kg, structure without propellant
    pub fuel_capacity: f64,            // l
    pub fuel_density: f64,             // kg/l
    pub fuel_rate_at_max_thrust: f64,  // l/s
    pub max_thrust: f64,               // N
    pub drag_coef_lander: f64,
    pub drag_coef_chute: f64,
    pub max_parachute_drag: f64,       // N, canopy tears beyond this
    pub max_parachute_speed: f64,      // m/s, inside the atmosphere
    pub max_impact_descent_rate: f64,  // m/s
    pub max_impact_ground_speed: f64,  // m/s
}

impl Default for Lander {
    fn default() -> Self {
        LanderBuilder::new().build()
    }
}

impl Lander {
    /// Total mass with `fuel` litres on board.
    pub fn mass(&self, fuel: f64) -> f64 {
        self.unloaded_mass + fuel * self.fuel_density
    }

    /// Mass with a full tank.
    pub fn wet_mass(&self) -> f64 {
        self.mass(self.fuel_capacity)
    }

    /// Thrust-to-weight ratio on the surface with a full tank.
    pub fn twr(&self) -> f64 {
        let g_surface = MU_MARS / (MARS_RADIUS * MARS_RADIUS);
        self.max_thrust / (self.wet_mass() * g_surface)
    }

    /// Seconds of burn at full throttle.
    pub fn burn_time(&self) -> f64 {
        if self.fuel_rate_at_max_thrust > 0.0 {
            self.fuel_capacity / self.fuel_rate_at_max_thrust
        } else {
            0.0
        }
    }
}

// ---------------------------------------------------------------------------
// Lander builder
// ---------------------------------------------------------------------------

pub struct LanderBuilder {
    size: f64,
    unloaded_mass: f64,
    fuel_capacity: f64,
    fuel_density: f64,
    fuel_rate_at_max_thrust: f64,
    max_thrust: Option<f64>,
    drag_coef_lander: f64,
    drag_coef_chute: f64,
    max_parachute_drag: f64,
    max_parachute_speed: f64,
    max_impact_descent_rate: f64,
    max_impact_ground_speed: f64,
}

impl LanderBuilder {
    pub fn new() -> Self {
        Self {
            size: 1.0,
            unloaded_mass: 100.0,
            fuel_capacity: 100.0,
            fuel_density: 1.0,
            fuel_rate_at_max_thrust: 0.5,
            max_thrust: None,
            drag_coef_lander: 1.0,
            drag_coef_chute: 2.0,
            max_parachute_drag: 20_000.0,
            max_parachute_speed: 500.0,
            max_impact_descent_rate: 1.0,
            max_impact_ground_speed: 1.0,
        }
    }

    pub fn size(mut self, v: f64) -> Self { self.size = v; self }
    pub fn unloaded_mass(mut self, v: f64) -> Self { self.unloaded_mass = v; self }
    pub fn fuel_capacity(mut self, v: f64) -> Self { self.fuel_capacity = v; self }
    pub fn fuel_density(mut self, v: f64) -> Self { self.fuel_density = v; self }
    pub fn fuel_rate_at_max_thrust(mut self, v: f64) -> Self { self.fuel_rate_at_max_thrust = v; self }
    pub fn max_thrust(mut self, v: f64) -> Self { self.max_thrust = Some(v); self }
    pub fn drag_coef_lander(mut self, v: f64) -> Self { self.drag_coef_lander = v; self }
    pub fn drag_coef_chute(mut self, v: f64) -> Self { self.drag_coef_chute = v; self }
    pub fn max_parachute_drag(mut self, v: f64) -> Self { self.max_parachute_drag = v; self }
    pub fn max_parachute_speed(mut self, v: f64) -> Self { self.max_parachute_speed = v; self }
    pub fn max_impact_descent_rate(mut self, v: f64) -> Self { self.max_impact_descent_rate = v; self }
    pub fn max_impact_ground_speed(mut self, v: f64) -> Self { self.max_impact_ground_speed = v; self }

    pub fn build(self) -> Lander {
        // Unless set explicitly, the engine can lift 1.5x the fully fuelled
        // weight at the surface.
        let max_thrust = self.max_thrust.unwrap_or_else(|| {
            let g_surface = MU_MARS / (MARS_RADIUS * MARS_RADIUS);
            1.5 * (self.fuel_density * self.fuel_capacity + self.unloaded_mass) * g_surface
        });
        Lander {
            size: self.size,
            unloaded_mass: self.unloaded_mass,
            fuel_capacity: self.fuel_capacity,
            fuel_density: self.fuel_density,
            fuel_rate_at_max_thrust: self.fuel_rate_at_max_thrust,
            max_thrust,
            drag_coef_lander: self.drag_coef_lander,
            drag_coef_chute: self.drag_coef_chute,
            max_parachute_drag: self.max_parachute_drag,
            max_parachute_speed: self.max_parachute_speed,
            max_impact_descent_rate: self.max_impact_descent_rate,
            max_impact_ground_speed: self.max_impact_ground_speed,
        }
    }
}

impl Default for LanderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_lander_lifts_off_with_full_tank() {
        let l = Lander::default();
        assert_relative_eq!(l.twr(), 1.5, epsilon = 1e-12);
        assert_relative_eq!(l.wet_mass(), 200.0);
    }

    #[test]
    fn mass_includes_fuel() {
        let l = Lander::default();
        assert_relative_eq!(l.mass(0.0), l.unloaded_mass);
        assert!(l.mass(50.0) > l.mass(0.0));
    }

    #[test]
    fn builder_overrides() {
        let l = LanderBuilder::new().size(2.0).max_thrust(5000.0).build();
        assert_relative_eq!(l.size, 2.0);
        assert_relative_eq!(l.max_thrust, 5000.0);
        assert_relative_eq!(l.burn_time(), 200.0);
    }
}
