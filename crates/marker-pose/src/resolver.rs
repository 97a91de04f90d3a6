//! Single-marker pose resolution from a pixel detection to a world pose.

use glam::DVec3;

use crate::camera::CameraModel;
use crate::frame::{camera_rotation_in_world, point_marker_to_world};
use crate::ippe::IppeSquare;
use crate::marker::{MarkerDetection, MarkerMap};
use crate::pose::PoseEstimation;
use crate::rotation::{euler_to_degrees, matrix_to_euler};
use crate::solver::{square_object_points, Rodrigues, RotationConverter, SquarePnpSolver};

/// Resolves single-marker detections into world-frame camera poses.
///
/// Holds the per-deployment constants (camera model, physical marker side
/// length) and the numerical backends. The marker definition table is
/// passed per call so callers can swap sets freely.
#[derive(Debug, Clone)]
pub struct PoseResolver<S = IppeSquare, C = Rodrigues> {
    camera: CameraModel,
    marker_size: f64,
    solver: S,
    converter: C,
}

impl PoseResolver {
    /// Create a resolver with the built-in planar-square solver and
    /// Rodrigues conversion.
    ///
    /// `marker_size` is the physical side length of the printed markers,
    /// meters.
    pub fn new(camera: CameraModel, marker_size: f64) -> Self {
        Self::with_backend(camera, marker_size, IppeSquare, Rodrigues)
    }
}

impl<S: SquarePnpSolver, C: RotationConverter> PoseResolver<S, C> {
    /// Create a resolver with explicit solver and rotation-conversion
    /// backends.
    pub fn with_backend(camera: CameraModel, marker_size: f64, solver: S, converter: C) -> Self {
        Self {
            camera,
            marker_size,
            solver,
            converter,
        }
    }

    /// Resolve one detection into a world-frame camera pose.
    ///
    /// Returns `None` when the detected id has no definition in `markers`
    /// or the PnP solve reports failure; neither aborts the frame.
    pub fn resolve(
        &self,
        markers: &MarkerMap,
        detection: &MarkerDetection,
    ) -> Option<PoseEstimation> {
        let Some(definition) = markers.get(detection.id) else {
            log::debug!("skipping unknown marker id {}", detection.id);
            return None;
        };

        let object = square_object_points(self.marker_size);
        let solution = match self
            .solver
            .solve_square(&object, &detection.corners, &self.camera)
        {
            Ok(solution) => solution,
            Err(err) => {
                log::debug!("PnP solve failed for marker {}: {err}", detection.id);
                return None;
            }
        };

        let r_marker_to_camera = self.converter.to_matrix(solution.rvec);
        let tvec = DVec3::from_array(solution.tvec);

        // Camera optical center in marker-local coordinates: -R^T t.
        let camera_in_marker = -(r_marker_to_camera.transpose() * tvec);
        let position = point_marker_to_world(
            camera_in_marker,
            definition.center,
            definition.rotation_to_world,
        );

        let r_world = camera_rotation_in_world(&r_marker_to_camera, definition.rotation_to_world);
        let rotation = euler_to_degrees(matrix_to_euler(&r_world));

        Some(PoseEstimation {
            position,
            rotation,
            rvec: solution.rvec,
            tvec: solution.tvec,
            marker_id: detection.id,
        })
    }

    /// Resolve every detection in a frame, dropping the unresolvable ones.
    pub fn resolve_all(
        &self,
        markers: &MarkerMap,
        detections: &[MarkerDetection],
    ) -> Vec<PoseEstimation> {
        detections
            .iter()
            .filter_map(|detection| self.resolve(markers, detection))
            .collect()
    }
}
