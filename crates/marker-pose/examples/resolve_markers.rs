use glam::DVec3;
use marker_pose::{
    fuse, CameraIntrinsics, CameraModel, MarkerDefinition, MarkerDetection, MarkerMap,
    PoseResolver,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Deployment constants: intrinsics and the physical marker side length.
    let camera = CameraModel::pinhole(CameraIntrinsics::new(800.0, 800.0, 320.0, 240.0));
    let resolver = PoseResolver::new(camera, 0.1);

    // Known world placements, normally loaded from deployment tooling.
    let markers = MarkerMap::from_definitions([MarkerDefinition {
        id: 0,
        face: "front".to_string(),
        normal: DVec3::new(0.0, 0.0, 1.0),
        center: DVec3::new(0.0, 0.0, 0.06),
        rotation_to_world: DVec3::ZERO,
    }])?;

    // One frame worth of detections from an external marker detector:
    // corner pixels in TL / TR / BR / BL order.
    let detections = [MarkerDetection {
        id: 0,
        corners: [[280.0, 280.0], [360.0, 280.0], [360.0, 200.0], [280.0, 200.0]],
    }];

    let poses = resolver.resolve_all(&markers, &detections);
    let result = fuse(poses);

    println!("camera position (m):   {:?}", result.camera_position);
    println!("camera rotation (deg): {:?}", result.camera_rotation);
    println!("markers used:          {:?}", result.detected_marker_ids);

    Ok(())
}
