//! Pinhole camera intrinsics and lens distortion handling.

use thiserror::Error;

/// Error types for camera model construction.
#[derive(Debug, Error)]
pub enum CameraError {
    /// Invalid camera intrinsics matrix
    #[error("Invalid camera intrinsics matrix: {0}")]
    InvalidIntrinsics(String),

    /// Invalid distortion parameters
    #[error("Invalid distortion parameters: {0}")]
    InvalidDistortion(String),
}

/// Result type for camera operations.
pub type CameraResult<T> = Result<T, CameraError>;

/// Intrinsic parameters of a pinhole camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraIntrinsics {
    /// Focal length in x direction, pixels
    pub fx: f64,
    /// Focal length in y direction, pixels
    pub fy: f64,
    /// Principal point x coordinate
    pub cx: f64,
    /// Principal point y coordinate
    pub cy: f64,
}

impl CameraIntrinsics {
    /// Create camera intrinsics from focal lengths and principal point.
    pub fn new(fx: f64, fy: f64, cx: f64, cy: f64) -> Self {
        Self { fx, fy, cx, cy }
    }

    /// Create camera intrinsics from a 3x3 intrinsics matrix.
    pub fn from_matrix(k: &[[f64; 3]; 3]) -> CameraResult<Self> {
        if k[0][1] != 0.0 || k[1][0] != 0.0 || k[2][0] != 0.0 || k[2][1] != 0.0 || k[2][2] != 1.0 {
            return Err(CameraError::InvalidIntrinsics(
                "matrix must have form [[fx, 0, cx], [0, fy, cy], [0, 0, 1]]".to_string(),
            ));
        }
        if k[0][0] == 0.0 || k[1][1] == 0.0 {
            return Err(CameraError::InvalidIntrinsics(
                "focal lengths must be non-zero".to_string(),
            ));
        }

        Ok(Self {
            fx: k[0][0],
            fy: k[1][1],
            cx: k[0][2],
            cy: k[1][2],
        })
    }

    /// Convert to a 3x3 intrinsics matrix.
    pub fn to_matrix(&self) -> [[f64; 3]; 3] {
        [
            [self.fx, 0.0, self.cx],
            [0.0, self.fy, self.cy],
            [0.0, 0.0, 1.0],
        ]
    }

    /// Map a pixel coordinate to the normalized image plane (the projective
    /// plane at z = 1, equivalent to premultiplying by K^-1).
    pub fn normalize(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.cx) / self.fx, (y - self.cy) / self.fy)
    }
}

/// Brown-Conrady distortion coefficients in the conventional 5-element
/// order `[k1, k2, p1, p2, k3]` (radial k1..k3, tangential p1/p2).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[allow(missing_docs)]
pub struct Distortion {
    pub k1: f64,
    pub k2: f64,
    pub p1: f64,
    pub p2: f64,
    pub k3: f64,
}

impl Distortion {
    /// All coefficients zero (no distortion).
    pub fn none() -> Self {
        Self::default()
    }

    /// Create from the 5-element coefficient vector `[k1, k2, p1, p2, k3]`.
    pub fn from_array(coeffs: &[f64; 5]) -> Self {
        Self {
            k1: coeffs[0],
            k2: coeffs[1],
            p1: coeffs[2],
            p2: coeffs[3],
            k3: coeffs[4],
        }
    }

    /// Create from an externally configured coefficient slice, which must
    /// have exactly 5 elements.
    pub fn from_slice(coeffs: &[f64]) -> CameraResult<Self> {
        let arr: &[f64; 5] = coeffs.try_into().map_err(|_| {
            CameraError::InvalidDistortion(format!("expected 5 coefficients, got {}", coeffs.len()))
        })?;
        Ok(Self::from_array(arr))
    }

    /// The coefficients as the 5-element vector `[k1, k2, p1, p2, k3]`.
    pub fn to_array(&self) -> [f64; 5] {
        [self.k1, self.k2, self.p1, self.p2, self.k3]
    }

    /// Check if there is any distortion.
    pub fn has_distortion(&self) -> bool {
        self.k1 != 0.0 || self.k2 != 0.0 || self.p1 != 0.0 || self.p2 != 0.0 || self.k3 != 0.0
    }
}

/// A complete camera model with intrinsics and optional distortion.
#[derive(Debug, Clone)]
pub struct CameraModel {
    /// Camera intrinsics
    pub intrinsics: CameraIntrinsics,
    /// Distortion parameters (None for no distortion)
    pub distortion: Option<Distortion>,
}

impl CameraModel {
    /// Create a camera model without distortion.
    pub fn pinhole(intrinsics: CameraIntrinsics) -> Self {
        Self {
            intrinsics,
            distortion: None,
        }
    }

    /// Create a camera model with distortion.
    pub fn with_distortion(intrinsics: CameraIntrinsics, distortion: Distortion) -> Self {
        Self {
            intrinsics,
            distortion: Some(distortion),
        }
    }

    /// Check if the camera has distortion.
    pub fn has_distortion(&self) -> bool {
        self.distortion.as_ref().is_some_and(|d| d.has_distortion())
    }

    /// Undistort a pixel coordinate using the iterative fixed-point method.
    pub fn undistort_point(&self, x: f64, y: f64) -> (f64, f64) {
        let Some(distortion) = self.distortion.filter(|d| d.has_distortion()) else {
            return (x, y);
        };

        let (x_d, y_d) = self.intrinsics.normalize(x, y);

        // Initial guess: assume no distortion.
        let mut xu = x_d;
        let mut yu = y_d;

        const MAX_ITERATIONS: usize = 10;
        const EPSILON: f64 = 1e-12;

        for _ in 0..MAX_ITERATIONS {
            let (xp, yp) = distort_normalized(xu, yu, &distortion);
            let dx = x_d - xp;
            let dy = y_d - yp;
            xu += dx;
            yu += dy;
            if dx.abs() < EPSILON && dy.abs() < EPSILON {
                break;
            }
        }

        (
            self.intrinsics.fx * xu + self.intrinsics.cx,
            self.intrinsics.fy * yu + self.intrinsics.cy,
        )
    }

    /// Apply the forward distortion model to a pixel coordinate.
    pub fn distort_point(&self, x: f64, y: f64) -> (f64, f64) {
        let Some(distortion) = self.distortion.filter(|d| d.has_distortion()) else {
            return (x, y);
        };

        let (xn, yn) = self.intrinsics.normalize(x, y);
        let (xd, yd) = distort_normalized(xn, yn, &distortion);
        (
            self.intrinsics.fx * xd + self.intrinsics.cx,
            self.intrinsics.fy * yd + self.intrinsics.cy,
        )
    }
}

/// Forward Brown-Conrady model on normalized coordinates.
fn distort_normalized(x: f64, y: f64, d: &Distortion) -> (f64, f64) {
    let r2 = x * x + y * y;
    let r4 = r2 * r2;
    let r6 = r4 * r2;

    let kr = 1.0 + d.k1 * r2 + d.k2 * r4 + d.k3 * r6;

    let xy2 = 2.0 * x * y;
    let xd = x * kr + d.p1 * xy2 + d.p2 * (r2 + 2.0 * x * x);
    let yd = y * kr + d.p1 * (r2 + 2.0 * y * y) + d.p2 * xy2;
    (xd, yd)
}
