//! Pose estimate and fused pose result types.

use std::time::SystemTime;

use glam::DVec3;
use serde::Serialize;

/// One camera pose estimated from a single resolved marker.
///
/// Immutable once constructed; one instance per successfully resolved
/// marker per frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoseEstimation {
    /// Camera optical center, world frame, meters.
    pub position: DVec3,
    /// Camera orientation as Euler angles in degrees, world frame, render
    /// convention.
    pub rotation: DVec3,
    /// Raw axis-angle rotation vector from the PnP solve (marker-local
    /// camera frame), kept for diagnostics.
    pub rvec: [f64; 3],
    /// Raw translation vector from the PnP solve, kept for diagnostics.
    pub tvec: [f64; 3],
    /// Id of the marker this estimate came from.
    pub marker_id: u32,
}

/// The fused camera pose for one frame, as consumed by the renderer.
#[derive(Debug, Clone, Serialize)]
pub struct PoseResult {
    /// Every per-marker estimate that contributed, unmodified.
    pub poses: Vec<PoseEstimation>,
    /// Fused camera position, world frame, meters.
    pub camera_position: DVec3,
    /// Fused camera rotation, degrees, render convention.
    pub camera_rotation: DVec3,
    /// Ids of the contributing markers, in the order received.
    pub detected_marker_ids: Vec<u32>,
    /// When the fusion was performed.
    pub timestamp: SystemTime,
}
