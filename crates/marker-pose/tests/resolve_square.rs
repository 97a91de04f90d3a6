use approx::assert_relative_eq;
use glam::{DMat3, DVec3};
use marker_pose::{
    fuse, CameraIntrinsics, CameraModel, Distortion, MarkerDefinition, MarkerDetection, MarkerMap,
    PoseResolver, Rodrigues, RotationConverter,
};

const MARKER_SIZE: f64 = 0.1;

fn camera() -> CameraModel {
    CameraModel::pinhole(CameraIntrinsics::new(800.0, 800.0, 320.0, 240.0))
}

fn markers() -> MarkerMap {
    MarkerMap::from_definitions([
        MarkerDefinition {
            id: 0,
            face: "front".to_string(),
            normal: DVec3::new(0.0, 0.0, 1.0),
            center: DVec3::new(0.0, 0.0, 0.06),
            rotation_to_world: DVec3::ZERO,
        },
        MarkerDefinition {
            id: 1,
            face: "front".to_string(),
            normal: DVec3::new(0.0, 0.0, 1.0),
            center: DVec3::new(0.2, 0.0, 0.06),
            rotation_to_world: DVec3::ZERO,
        },
    ])
    .unwrap()
}

/// Project the four marker corners through a ground-truth extrinsic.
fn project_corners(camera: &CameraModel, r: &DMat3, t: DVec3) -> [[f64; 2]; 4] {
    let h = MARKER_SIZE / 2.0;
    let object = [
        DVec3::new(-h, h, 0.0),
        DVec3::new(h, h, 0.0),
        DVec3::new(h, -h, 0.0),
        DVec3::new(-h, -h, 0.0),
    ];
    let k = camera.intrinsics;
    object.map(|p| {
        let pc = *r * p + t;
        let ideal = [
            k.fx * pc.x / pc.z + k.cx,
            k.fy * pc.y / pc.z + k.cy,
        ];
        let (dx, dy) = camera.distort_point(ideal[0], ideal[1]);
        [dx, dy]
    })
}

#[test]
fn frontal_marker_resolves_to_ground_truth() {
    let camera = camera();
    let corners = project_corners(&camera, &DMat3::IDENTITY, DVec3::new(0.0, 0.0, 1.0));
    let resolver = PoseResolver::new(camera, MARKER_SIZE);

    let pose = resolver
        .resolve(&markers(), &MarkerDetection { id: 0, corners })
        .expect("noiseless frontal view must resolve");

    // Camera one meter in front of the marker plane, marker center 0.06 m
    // along world +Z.
    assert_relative_eq!(pose.position.x, 0.0, epsilon = 1e-4);
    assert_relative_eq!(pose.position.y, 0.0, epsilon = 1e-4);
    assert_relative_eq!(pose.position.z, -0.94, epsilon = 1e-4);

    // Render convention flips the frontal view to a 180 degree roll.
    assert_relative_eq!(pose.rotation.x.abs(), 180.0, epsilon = 0.1);
    assert_relative_eq!(pose.rotation.y, 0.0, epsilon = 0.1);
    assert_relative_eq!(pose.rotation.z, 0.0, epsilon = 0.1);
}

#[test]
fn rotated_view_recovers_extrinsic() {
    let camera = camera();
    let rvec_truth = [0.12, -0.3, 0.07];
    let r_truth = Rodrigues.to_matrix(rvec_truth);
    let t_truth = DVec3::new(0.05, -0.02, 0.8);

    let corners = project_corners(&camera, &r_truth, t_truth);
    let resolver = PoseResolver::new(camera, MARKER_SIZE);
    let pose = resolver
        .resolve(&markers(), &MarkerDetection { id: 0, corners })
        .expect("noiseless rotated view must resolve");

    // Position must match the ground-truth optical center mapped to world.
    let expected = -(r_truth.transpose() * t_truth) + DVec3::new(0.0, 0.0, 0.06);
    assert_relative_eq!(pose.position.x, expected.x, epsilon = 1e-4);
    assert_relative_eq!(pose.position.y, expected.y, epsilon = 1e-4);
    assert_relative_eq!(pose.position.z, expected.z, epsilon = 1e-4);

    // The diagnostic rvec must recover the ground-truth rotation to a
    // fraction of a degree (1e-3 rad ~ 0.06 deg).
    for i in 0..3 {
        assert_relative_eq!(pose.rvec[i], rvec_truth[i], epsilon = 1e-3);
    }
}

#[test]
fn distorted_pixels_resolve_after_undistortion() {
    let intrinsics = CameraIntrinsics::new(800.0, 800.0, 320.0, 240.0);
    let distortion = Distortion::from_array(&[0.05, 0.01, 0.0003, -0.0002, 0.0]);
    let camera = CameraModel::with_distortion(intrinsics, distortion);

    let corners = project_corners(&camera, &DMat3::IDENTITY, DVec3::new(0.0, 0.0, 1.0));
    let resolver = PoseResolver::new(camera, MARKER_SIZE);
    let pose = resolver
        .resolve(&markers(), &MarkerDetection { id: 0, corners })
        .expect("distorted corners must still resolve");

    assert_relative_eq!(pose.position.z, -0.94, epsilon = 1e-4);
}

#[test]
fn two_markers_fuse_to_shared_camera_position() {
    let camera = camera();
    // One physical camera at world (0, 0, -0.94) seen through both markers.
    let corners_a = project_corners(&camera, &DMat3::IDENTITY, DVec3::new(0.0, 0.0, 1.0));
    let corners_b = project_corners(&camera, &DMat3::IDENTITY, DVec3::new(0.2, 0.0, 1.0));

    let resolver = PoseResolver::new(camera, MARKER_SIZE);
    let markers = markers();
    let poses = resolver.resolve_all(
        &markers,
        &[
            MarkerDetection {
                id: 0,
                corners: corners_a,
            },
            MarkerDetection {
                id: 1,
                corners: corners_b,
            },
        ],
    );
    assert_eq!(poses.len(), 2);

    let result = fuse(poses);
    assert_eq!(result.detected_marker_ids, vec![0, 1]);
    assert_relative_eq!(result.camera_position.x, 0.0, epsilon = 1e-4);
    assert_relative_eq!(result.camera_position.y, 0.0, epsilon = 1e-4);
    assert_relative_eq!(result.camera_position.z, -0.94, epsilon = 1e-4);
}

#[test]
fn unknown_marker_id_yields_no_pose() {
    let camera = camera();
    let corners = project_corners(&camera, &DMat3::IDENTITY, DVec3::new(0.0, 0.0, 1.0));
    let resolver = PoseResolver::new(camera, MARKER_SIZE);
    assert!(resolver
        .resolve(&markers(), &MarkerDetection { id: 99, corners })
        .is_none());
}
