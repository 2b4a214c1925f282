use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::physics::vector::direction;

// ---------------------------------------------------------------------------
// xyz Euler angles (degrees) <-> body-to-world rotation
// ---------------------------------------------------------------------------
//
// The lander orientation (x, y, z) composes as Rz(x) * Ry(y) * Rx(z), which
// is nalgebra's roll/pitch/yaw order with roll = z, pitch = y, yaw = x.

/// Body-to-world rotation for an orientation in degrees.
pub fn euler_to_rotation(orientation: &Vector3<f64>) -> Rotation3<f64> {
    Rotation3::from_euler_angles(
        orientation.z.to_radians(),
        orientation.y.to_radians(),
        orientation.x.to_radians(),
    )
}

/// Inverse of [`euler_to_rotation`]. Gimbal-locked rotations map to one of
/// the equivalent angle sets.
pub fn rotation_to_euler(rotation: &Rotation3<f64>) -> Vector3<f64> {
    let (roll, pitch, yaw) = rotation.euler_angles();
    Vector3::new(yaw.to_degrees(), pitch.to_degrees(), roll.to_degrees())
}

const SMALL_NUM: f64 = 1e-7;

/// Orientation that points the body +z axis radially outward from the
/// planet, so the lander base faces the ground.
///
/// Returns `None` at the planet centre where "up" is undefined.
pub fn radial_orientation(pos: &Vector3<f64>) -> Option<Vector3<f64>> {
    let up = direction(pos)?;

    // Any axis perpendicular to up. Fall back to the xz-plane near the poles.
    let mut left = Vector3::new(-up.y, up.x, 0.0);
    if left.norm() < SMALL_NUM {
        left = Vector3::new(-up.z, 0.0, up.x);
    }
    let left = direction(&left)?;
    let out = left.cross(&up);

    let basis = Matrix3::from_columns(&[out, left, up]);
    Some(rotation_to_euler(&Rotation3::from_matrix_unchecked(basis)))
}
