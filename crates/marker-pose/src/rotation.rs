//! Conversions between Euler angles and 3x3 rotation matrices.
//!
//! All routines assume the composition order `Rz * Ry * Rx` (intrinsic
//! Z-Y-X, equivalently extrinsic X-Y-Z). Callers must construct and
//! interpret matrices consistently with that order; mixing orders produces
//! silently wrong angles with no numerical symptom.
//!
//! Angles are radians everywhere in this module. Degrees appear only at the
//! public pose boundary.

use glam::{DMat3, DVec3};

/// Threshold on `sqrt(r00^2 + r10^2)` below which Euler extraction is
/// treated as gimbal locked (pitch within ~1e-6 rad of +/-90 degrees).
pub const GIMBAL_EPS: f64 = 1e-6;

/// Build the rotation matrix `Rz * Ry * Rx` from radian Euler angles
/// `(x, y, z)`.
pub fn euler_to_matrix(angles: DVec3) -> DMat3 {
    let (sx, cx) = angles.x.sin_cos();
    let (sy, cy) = angles.y.sin_cos();
    let (sz, cz) = angles.z.sin_cos();

    // Product written out row by row, stored column-major for glam.
    DMat3::from_cols(
        DVec3::new(cz * cy, sz * cy, -sy),
        DVec3::new(cz * sy * sx - sz * cx, sz * sy * sx + cz * cx, cy * sx),
        DVec3::new(cz * sy * cx + sz * sx, sz * sy * cx - cz * sx, cy * cx),
    )
}

/// Extract radian Euler angles `(x, y, z)` from a rotation matrix built in
/// `Rz * Ry * Rx` order.
///
/// Near gimbal lock (`|pitch|` within [`GIMBAL_EPS`] of 90 degrees) yaw and
/// roll are indistinguishable; `z` is then fixed to zero by convention
/// rather than solved.
pub fn matrix_to_euler(r: &DMat3) -> DVec3 {
    let r00 = r.col(0).x;
    let r10 = r.col(0).y;
    let r20 = r.col(0).z;
    let sy = (r00 * r00 + r10 * r10).sqrt();

    if sy >= GIMBAL_EPS {
        DVec3::new(
            r.col(1).z.atan2(r.col(2).z),
            (-r20).atan2(sy),
            r10.atan2(r00),
        )
    } else {
        DVec3::new((-r.col(2).y).atan2(r.col(1).y), (-r20).atan2(sy), 0.0)
    }
}

/// Convert a radian Euler triple to degrees.
pub fn euler_to_degrees(angles: DVec3) -> DVec3 {
    DVec3::new(
        angles.x.to_degrees(),
        angles.y.to_degrees(),
        angles.z.to_degrees(),
    )
}
