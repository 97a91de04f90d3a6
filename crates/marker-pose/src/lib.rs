#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Marker Pose
//!
//! Estimates the pose of a camera in a fixed world frame from pixel-space
//! detections of square fiducial markers whose world placements are known,
//! and fuses simultaneous per-marker estimates into one aggregate pose.
//!
//! The pipeline per video frame is: detections (external) →
//! [`PoseResolver::resolve`] per marker → [`fuse`] → one [`PoseResult`]
//! handed to the renderer.
//!
//! ## Example: fusing per-marker estimates
//!
//! ```rust
//! use glam::DVec3;
//! use marker_pose::{fuse, PoseEstimation};
//!
//! let estimations = vec![
//!     PoseEstimation {
//!         position: DVec3::new(0.0, 0.0, 0.0),
//!         rotation: DVec3::new(0.0, 90.0, 0.0),
//!         rvec: [0.0; 3],
//!         tvec: [0.0; 3],
//!         marker_id: 0,
//!     },
//!     PoseEstimation {
//!         position: DVec3::new(2.0, 2.0, 2.0),
//!         rotation: DVec3::new(0.0, 90.0, 0.0),
//!         rvec: [0.0; 3],
//!         tvec: [0.0; 3],
//!         marker_id: 3,
//!     },
//! ];
//!
//! let result = fuse(estimations);
//! assert_eq!(result.camera_position, DVec3::new(1.0, 1.0, 1.0));
//! assert_eq!(result.detected_marker_ids, vec![0, 3]);
//! ```

/// Pinhole camera intrinsics and lens distortion handling.
pub mod camera;

/// Conversions between marker-local, world, and camera frame conventions.
pub mod frame;

/// Fusion of simultaneous per-marker pose estimates into one result.
pub mod fusion;

/// Planar-square PnP solving via homography decomposition.
pub mod ippe;

/// Marker placement definitions and per-frame detections.
pub mod marker;

/// Pose estimate and fused pose result types.
pub mod pose;

/// Single-marker pose resolution from a detection to a world-frame pose.
pub mod resolver;

/// Euler angle and rotation matrix conversions.
pub mod rotation;

/// Solver and rotation-conversion capability traits.
pub mod solver;

pub use camera::{CameraError, CameraIntrinsics, CameraModel, Distortion};
pub use fusion::fuse;
pub use ippe::IppeSquare;
pub use marker::{MarkerDefinition, MarkerDetection, MarkerError, MarkerMap};
pub use pose::{PoseEstimation, PoseResult};
pub use resolver::PoseResolver;
pub use solver::{
    square_object_points, PnpError, PnpSolution, Rodrigues, RotationConverter, SquarePnpSolver,
};
