//! Capability traits for the numerical routines the resolver depends on.
//!
//! The PnP solve and the axis-angle conversion are modeled as traits so
//! production wiring can plug in a real solver ([`crate::IppeSquare`],
//! [`Rodrigues`]) while tests substitute deterministic stubs.

use glam::{DMat3, DQuat, DVec3};
use thiserror::Error;

use crate::camera::{CameraError, CameraModel};

/// Error types for PnP solvers.
#[derive(Debug, Error)]
pub enum PnpError {
    /// The corner geometry admits no usable pose (near-collinear corners,
    /// rank-deficient homography, near-zero depth).
    #[error("degenerate corner geometry: {0}")]
    DegenerateGeometry(&'static str),

    /// The object points do not lie on the z = 0 plane required by a
    /// planar-square solver.
    #[error("object points are not coplanar on z = 0")]
    NonPlanarObject,

    /// Camera model error
    #[error(transparent)]
    Camera(#[from] CameraError),
}

/// Rotation and translation carrying marker-local points into the optical
/// camera frame, as returned by a PnP solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PnpSolution {
    /// Axis-angle (Rodrigues) rotation vector.
    pub rvec: [f64; 3],
    /// Translation vector, meters.
    pub tvec: [f64; 3],
}

/// A Perspective-n-Point solver specialized for a 4-corner square planar
/// target.
///
/// Object and image points correspond by index, not by any label; both
/// lists use the fixed corner order top-left, top-right, bottom-right,
/// bottom-left.
pub trait SquarePnpSolver {
    /// Solve for the marker-to-camera transform from the four object/image
    /// corner correspondences.
    fn solve_square(
        &self,
        object: &[[f64; 3]; 4],
        image: &[[f64; 2]; 4],
        camera: &CameraModel,
    ) -> Result<PnpSolution, PnpError>;
}

/// Conversion from an axis-angle rotation vector to a rotation matrix.
pub trait RotationConverter {
    /// Build the 3x3 rotation matrix for `rvec`.
    fn to_matrix(&self, rvec: [f64; 3]) -> DMat3;
}

/// Axis-angle conversion via the quaternion exponential map.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rodrigues;

impl RotationConverter for Rodrigues {
    fn to_matrix(&self, rvec: [f64; 3]) -> DMat3 {
        let v = DVec3::from_array(rvec);
        let theta = v.length();
        if theta < f64::EPSILON {
            return DMat3::IDENTITY;
        }
        DMat3::from_quat(DQuat::from_axis_angle(v / theta, theta))
    }
}

/// The inverse axis-angle conversion (rotation matrix log-map).
pub(crate) fn matrix_to_rvec(r: &DMat3) -> [f64; 3] {
    let (axis, angle) = DQuat::from_mat3(r).normalize().to_axis_angle();
    (axis * angle).to_array()
}

/// The four marker-local object corners for a square of side `size`
/// centered at the origin on the z = 0 plane, in the canonical order
/// top-left, top-right, bottom-right, bottom-left.
pub fn square_object_points(size: f64) -> [[f64; 3]; 4] {
    let h = size / 2.0;
    [
        [-h, h, 0.0],
        [h, h, 0.0],
        [h, -h, 0.0],
        [-h, -h, 0.0],
    ]
}
