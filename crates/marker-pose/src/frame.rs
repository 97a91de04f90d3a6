//! Conversions between the marker-local, world, and camera frame
//! conventions.
//!
//! Two camera conventions are involved: the optical convention used by PnP
//! solvers (X-right, Y-down, Z-forward along the view direction) and the
//! render convention expected by consumers of the fused pose (X-right, Y-up,
//! Z-backward).

use glam::{DMat3, DVec3};

use crate::rotation::euler_to_matrix;

/// Axis flip carrying the optical camera convention into the render
/// convention: Y-down/Z-forward becomes Y-up/Z-backward.
const OPTICAL_TO_RENDER: DVec3 = DVec3::new(1.0, -1.0, -1.0);

/// Transform a marker-local point into world coordinates given the marker's
/// world center and its `rotation_to_world` Euler angles (radians).
///
/// For a zero rotation the result is exactly `p + center`.
pub fn point_marker_to_world(p: DVec3, center: DVec3, rotation: DVec3) -> DVec3 {
    euler_to_matrix(rotation) * p + center
}

/// Convert a marker-to-camera rotation (optical convention, as produced by
/// a PnP solve) into the camera's orientation in world axes, render
/// convention.
///
/// The composition order is load-bearing: the marker-to-world rotation is
/// applied on the left of the inverted, axis-flipped camera rotation.
/// Reversing it yields a pose rotated into the wrong frame with no
/// numerical symptom.
pub fn camera_rotation_in_world(r_marker_to_camera: &DMat3, marker_rotation: DVec3) -> DMat3 {
    // Transposing inverts marker->camera; the diagonal flip re-expresses it
    // in the render convention, still in marker-local axes.
    let r_camera_to_marker =
        r_marker_to_camera.transpose() * DMat3::from_diagonal(OPTICAL_TO_RENDER);
    euler_to_matrix(marker_rotation) * r_camera_to_marker
}
