use nalgebra::Vector3;

/// Unit vector along `v`, or `None` when `v` has zero magnitude.
///
/// `Vector3::normalize` divides by the norm unconditionally, so every
/// direction taken from state (position, velocity) goes through here.
pub fn direction(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    let mag = v.norm();
    if mag > 0.0 {
        Some(v / mag)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_vector_has_no_direction() {
        assert!(direction(&Vector3::zeros()).is_none());
    }

    #[test]
    fn direction_is_unit_length() {
        let d = direction(&Vector3::new(3.0, 0.0, 4.0)).unwrap();
        assert_relative_eq!(d.norm(), 1.0, epsilon = 1e-15);
        assert_relative_eq!(d, Vector3::new(0.6, 0.0, 0.8), epsilon = 1e-15);
    }
}
