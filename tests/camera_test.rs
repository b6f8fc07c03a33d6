use voxel_diorama::{
    camera::{Camera, OrbitController, OrthographicProjection},
    cgmath::{InnerSpace, Point3, Vector2},
    config::EngineConfig,
    input::InputAction,
};

fn rig(width: u32, height: u32) -> (EngineConfig, Camera, OrthographicProjection) {
    let config = EngineConfig::default();
    let camera = Camera::looking_at(config.camera_position, config.camera_target);
    let projection = OrthographicProjection::new(
        width,
        height,
        config.frustum_size,
        config.near,
        config.far,
    );
    (config, camera, projection)
}

#[test]
fn camera_starts_on_the_isometric_diagonal() {
    let (config, camera, _) = rig(800, 600);
    let p = camera.position();
    assert!((p - config.camera_position).magnitude() < 1e-3);
    let forward = camera.forward();
    let diagonal = (config.camera_target - config.camera_position).normalize();
    assert!((forward - diagonal).magnitude() < 1e-5);
}

#[test]
fn resize_only_changes_the_horizontal_extent() {
    let (_, _, mut projection) = rig(800, 600);
    let before = projection.bounds();
    projection.resize(1600, 600);
    let after = projection.bounds();
    assert_eq!(before.top, after.top);
    assert_eq!(before.bottom, after.bottom);
    assert!((after.right - 2.0 * before.right).abs() < 1e-4);
}

#[test]
fn resize_tracks_the_viewport() {
    let (_, _, mut projection) = rig(800, 600);
    assert_eq!(projection.viewport(), (800, 600));
    projection.resize(1280, 720);
    assert_eq!(projection.viewport(), (1280, 720));
    projection.resize(0, 720);
    assert_eq!(projection.viewport(), (1280, 720));
}

#[test]
fn resize_is_idempotent() {
    let (_, _, mut projection) = rig(800, 600);
    projection.resize(1024, 768);
    let once = projection.clone();
    projection.resize(1024, 768);
    assert_eq!(projection, once);
    assert_eq!(projection.calc_matrix(), once.calc_matrix());
}

#[test]
fn zero_sized_resize_is_ignored() {
    let (_, _, mut projection) = rig(800, 600);
    let before = projection.clone();
    projection.resize(0, 600);
    projection.resize(800, 0);
    assert_eq!(projection, before);
}

#[test]
fn zoom_is_clamped() {
    let (config, camera, mut projection) = rig(800, 600);
    let mut controller = OrbitController::new(&config);
    for _ in 0..100 {
        controller.handle_action(&InputAction::Zoom(3.0), &camera, &mut projection);
    }
    assert_eq!(projection.zoom, config.max_zoom);
    for _ in 0..100 {
        controller.handle_action(&InputAction::Zoom(-3.0), &camera, &mut projection);
    }
    assert_eq!(projection.zoom, config.min_zoom);
}

#[test]
fn orbit_is_damped() {
    let (config, mut camera, mut projection) = rig(800, 600);
    let mut controller = OrbitController::new(&config);
    let start = camera.azimuth;
    controller.handle_action(&InputAction::Orbit(Vector2::new(100.0, 0.0)), &camera, &mut projection);

    controller.update(&mut camera);
    let first = (camera.azimuth - start).abs();
    assert!(first > 0.0);
    // the first frame only applies the damping share of the gesture
    assert!(first < 100.0 * config.rotate_speed);

    let mut previous = camera.azimuth;
    let mut last_step = first;
    for _ in 0..50 {
        controller.update(&mut camera);
        let step = (camera.azimuth - previous).abs();
        assert!(step <= last_step);
        last_step = step;
        previous = camera.azimuth;
    }
}

#[test]
fn gestures_come_to_rest() {
    let (config, mut camera, mut projection) = rig(800, 600);
    let mut controller = OrbitController::new(&config);
    assert!(controller.is_settled());

    controller.handle_action(&InputAction::Orbit(Vector2::new(80.0, -40.0)), &camera, &mut projection);
    controller.handle_action(&InputAction::Pan(Vector2::new(25.0, 10.0)), &camera, &mut projection);
    assert!(!controller.is_settled());
    // zoom and picks leave nothing to damp
    let mut still = OrbitController::new(&config);
    still.handle_action(&InputAction::Zoom(1.0), &camera, &mut projection);
    still.handle_action(&InputAction::Pick(Vector2::new(0.0, 0.0)), &camera, &mut projection);
    assert!(still.is_settled());

    let frames = (0..10_000)
        .take_while(|_| {
            controller.update(&mut camera);
            !controller.is_settled()
        })
        .count();
    assert!(frames < 10_000, "orbit never settled");

    let at_rest = camera.clone();
    controller.update(&mut camera);
    assert!((camera.azimuth - at_rest.azimuth).abs() < 1e-5);
    assert!((camera.target - at_rest.target).magnitude() < 1e-4);
}

#[test]
fn polar_angle_never_flips_over_the_pole() {
    let (config, mut camera, mut projection) = rig(800, 600);
    let mut controller = OrbitController::new(&config);
    for _ in 0..200 {
        controller.handle_action(&InputAction::Orbit(Vector2::new(0.0, 500.0)), &camera, &mut projection);
        controller.update(&mut camera);
    }
    assert!(camera.polar > 0.0 && camera.polar < std::f32::consts::PI);
}

#[test]
fn centre_ray_passes_through_the_target() {
    let (config, camera, projection) = rig(800, 600);
    let ray = camera.pick_ray(Vector2::new(0.0, 0.0), &projection);
    assert!((ray.direction - camera.forward()).magnitude() < 1e-4);

    // distance from the target to the ray's line
    let to_target = config.camera_target - ray.origin;
    let along = to_target.dot(ray.direction);
    let closest = ray.at(along);
    assert!((closest - config.camera_target).magnitude() < 1e-2);
}

#[test]
fn rays_are_parallel_and_offset_by_the_frustum() {
    let (config, camera, projection) = rig(800, 600);
    let centre = camera.pick_ray(Vector2::new(0.0, 0.0), &projection);
    let top = camera.pick_ray(Vector2::new(0.0, 1.0), &projection);
    assert!((centre.direction - top.direction).magnitude() < 1e-4);

    // top edge sits half the frustum height above the centre, perpendicular to the view
    let offset = top.origin - centre.origin;
    let perpendicular = offset - centre.direction * offset.dot(centre.direction);
    assert!((perpendicular.magnitude() - config.frustum_size / 2.0).abs() < 1e-2);
    assert!(perpendicular.dot(camera.up()) > 0.0);
}

#[test]
fn zoom_shrinks_the_visible_area() {
    let (_, camera, mut projection) = rig(800, 600);
    let wide = camera.pick_ray(Vector2::new(1.0, 0.0), &projection);
    projection.zoom = 2.0;
    let narrow = camera.pick_ray(Vector2::new(1.0, 0.0), &projection);
    let centre = camera.pick_ray(Vector2::new(0.0, 0.0), &projection);

    let lateral = |p: Point3<f32>| {
        let d = p - centre.origin;
        (d - centre.direction * d.dot(centre.direction)).magnitude()
    };
    assert!((lateral(narrow.origin) * 2.0 - lateral(wide.origin)).abs() < 1e-2);
}
