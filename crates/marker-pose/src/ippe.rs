//! Planar-square PnP solving via homography decomposition.
//!
//! Estimates the marker-to-camera transform for a 4-corner square target by
//! computing the object-plane to normalized-image homography and
//! decomposing it into a rotation and translation, following the
//! plane-based pose estimation family of methods.
//!
//! References:
//! - T. Collins and A. Bartoli, "Infinitesimal Plane-based Pose Estimation"

use glam::{DMat3, DQuat, DVec3};

use crate::camera::CameraModel;
use crate::solver::{matrix_to_rvec, PnpError, PnpSolution, SquarePnpSolver};

/// Planar-square PnP solver backed by 4-point homography decomposition.
#[derive(Debug, Clone, Copy, Default)]
pub struct IppeSquare;

impl SquarePnpSolver for IppeSquare {
    fn solve_square(
        &self,
        object: &[[f64; 3]; 4],
        image: &[[f64; 2]; 4],
        camera: &CameraModel,
    ) -> Result<PnpSolution, PnpError> {
        // The homography model is only valid for a planar target on z = 0.
        if object.iter().any(|p| p[2].abs() > 1e-9) {
            return Err(PnpError::NonPlanarObject);
        }
        let src = [
            [object[0][0], object[0][1]],
            [object[1][0], object[1][1]],
            [object[2][0], object[2][1]],
            [object[3][0], object[3][1]],
        ];

        // Undistorted, normalized image coordinates (K^-1 premultiplied), so
        // the decomposition below can assume K = I.
        let mut dst = [[0.0f64; 2]; 4];
        for (d, p) in dst.iter_mut().zip(image.iter()) {
            let (ux, uy) = camera.undistort_point(p[0], p[1]);
            let (xn, yn) = camera.intrinsics.normalize(ux, uy);
            *d = [xn, yn];
        }

        let h = homography_4pt(&src, &dst)?;
        let (r, t) = decompose_h_normalized(&h)?;

        Ok(PnpSolution {
            rvec: matrix_to_rvec(&r),
            tvec: t.to_array(),
        })
    }
}

/// Homography mapping four 2d source points to four 2d destination points,
/// solved as the null vector of the stacked 8x9 DLT system.
fn homography_4pt(src: &[[f64; 2]; 4], dst: &[[f64; 2]; 4]) -> Result<DMat3, PnpError> {
    let mut mat_a = faer::Mat::<f64>::zeros(8, 9);
    for i in 0..4 {
        let (s, d) = (src[i], dst[i]);
        unsafe {
            mat_a.write_unchecked(2 * i, 0, s[0]);
            mat_a.write_unchecked(2 * i, 1, s[1]);
            mat_a.write_unchecked(2 * i, 2, 1.0);
            mat_a.write_unchecked(2 * i, 6, -d[0] * s[0]);
            mat_a.write_unchecked(2 * i, 7, -d[0] * s[1]);
            mat_a.write_unchecked(2 * i, 8, -d[0]);

            mat_a.write_unchecked(2 * i + 1, 3, s[0]);
            mat_a.write_unchecked(2 * i + 1, 4, s[1]);
            mat_a.write_unchecked(2 * i + 1, 5, 1.0);
            mat_a.write_unchecked(2 * i + 1, 6, -d[1] * s[0]);
            mat_a.write_unchecked(2 * i + 1, 7, -d[1] * s[1]);
            mat_a.write_unchecked(2 * i + 1, 8, -d[1]);
        }
    }

    // The null vector is the right singular vector of the smallest singular
    // value.
    let svd = mat_a.svd();
    let h = svd.v().col(8);

    // h holds the homography rows; glam stores columns.
    let homo = DMat3::from_cols(
        DVec3::new(h[0], h[3], h[6]),
        DVec3::new(h[1], h[4], h[7]),
        DVec3::new(h[2], h[5], h[8]),
    );

    if homo.determinant().abs() < 1e-12 {
        return Err(PnpError::DegenerateGeometry("homography is rank deficient"));
    }

    Ok(homo)
}

/// Decompose a plane-to-image homography into (R, t) assuming normalized
/// image coordinates (K = I).
fn decompose_h_normalized(h: &DMat3) -> Result<(DMat3, DVec3), PnpError> {
    let h1 = h.col(0);
    let h2 = h.col(1);
    let h3 = h.col(2);

    let scale = h1.length() * h2.length();
    if scale < 1e-12 {
        return Err(PnpError::DegenerateGeometry("homography columns vanish"));
    }
    // Scale so that ||r1|| ~ ||r2|| ~ 1.
    let s = 1.0 / scale.sqrt();

    let mut r1 = h1 * s;
    let mut r2 = h2 * s;
    let mut t = h3 * s;

    // The DLT null vector has arbitrary global sign; the marker must lie in
    // front of the camera (positive depth in the optical convention).
    if t.z < 0.0 {
        r1 = -r1;
        r2 = -r2;
        t = -t;
    }
    if t.z < 1e-9 {
        return Err(PnpError::DegenerateGeometry("marker plane has near-zero depth"));
    }

    let r3 = r1.cross(r2);

    // Project onto SO(3) through the quaternion to absorb the residual
    // non-orthogonality of the scaled columns.
    let r = DMat3::from_quat(DQuat::from_mat3(&DMat3::from_cols(r1, r2, r3)).normalize());

    Ok((r, t))
}
