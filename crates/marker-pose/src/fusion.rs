//! Fusion of simultaneous per-marker pose estimates into one result.

use std::time::SystemTime;

use glam::DVec3;

use crate::pose::{PoseEstimation, PoseResult};

/// Fuse the pose estimates of one frame into a single [`PoseResult`].
///
/// With no estimates the result is the well-defined zero pose (position and
/// rotation all zero, empty lists), not an error; the caller decides
/// whether to hold a previous pose instead.
///
/// Positions (meters) and rotations (degrees) are averaged independently
/// per axis. Component-wise Euler averaging is not rotation-invariant and
/// breaks down near the +/-180 degree wraparound or when estimates differ
/// by more than ~180 degrees on an axis; this is acceptable while all
/// markers share a common coarse orientation band, and is deliberately not
/// replaced by quaternion averaging to keep the reference numerics.
pub fn fuse(estimations: Vec<PoseEstimation>) -> PoseResult {
    let timestamp = SystemTime::now();

    if estimations.is_empty() {
        return PoseResult {
            poses: Vec::new(),
            camera_position: DVec3::ZERO,
            camera_rotation: DVec3::ZERO,
            detected_marker_ids: Vec::new(),
            timestamp,
        };
    }

    let n = estimations.len() as f64;
    let mut position_sum = DVec3::ZERO;
    let mut rotation_sum = DVec3::ZERO;
    let mut detected_marker_ids = Vec::with_capacity(estimations.len());
    for estimation in &estimations {
        position_sum += estimation.position;
        rotation_sum += estimation.rotation;
        detected_marker_ids.push(estimation.marker_id);
    }

    PoseResult {
        camera_position: position_sum / n,
        camera_rotation: rotation_sum / n,
        detected_marker_ids,
        poses: estimations,
        timestamp,
    }
}
