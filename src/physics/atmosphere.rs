use nalgebra::Vector3;
use serde::Deserialize;

use crate::dynamics::state::{EXOSPHERE, MARS_RADIUS};

// ---------------------------------------------------------------------------
// Exponential Mars atmosphere
// ---------------------------------------------------------------------------

/// Isothermal exponential atmosphere, cut off at the exosphere.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Atmosphere {
    pub surface_density: f64, // kg/m^3
    pub scale_height: f64,    // m
    pub exosphere: f64,       // m above the surface, density is zero beyond
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self {
            surface_density: 0.017,
            scale_height: 11_000.0,
            exosphere: EXOSPHERE,
        }
    }
}

impl Atmosphere {
    /// No atmosphere at all. Drag is always zero.
    pub fn vacuum() -> Self {
        Self {
            surface_density: 0.0,
            ..Self::default()
        }
    }

    /// Density at a planet-centred position. Zero underground and above
    /// the exosphere.
    pub fn density(&self, pos: &Vector3<f64>) -> f64 {
        let alt = pos.norm() - MARS_RADIUS;
        if !(0.0..=self.exosphere).contains(&alt) {
            return 0.0;
        }
        (self.surface_density * (-alt / self.scale_height).exp()).max(0.0)
    }
}
