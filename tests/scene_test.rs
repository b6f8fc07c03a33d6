use voxel_diorama::{
    camera::{Camera, OrthographicProjection, Ray},
    cgmath::{Point3, Vector2, Vector3, Vector4},
    config::EngineConfig,
    data_structures::voxel::{CHARACTER_ID, GroupId, Voxel},
    generator::{self, EASEL_ID, palette},
    input::{KeySet, MoveKey},
    scene::VoxelScene,
};

use crate::common::test_utils::{MockBackend, ray_down_at, seeded, voxel};

mod common;

fn scene() -> VoxelScene<MockBackend> {
    VoxelScene::new(MockBackend::new(), EngineConfig::default())
}

fn clicks(scene: &VoxelScene<MockBackend>, ray: &Ray) -> Vec<String> {
    let mut ids = Vec::new();
    scene.click(ray, &mut |id: &str| ids.push(id.to_string()));
    ids
}

/// Ray the default camera casts through the pixel showing the centre of `voxel`.
fn pointer_ray_to(config: &EngineConfig, voxel: &Voxel) -> Ray {
    let camera = Camera::looking_at(config.camera_position, config.camera_target);
    let projection =
        OrthographicProjection::new(1280, 720, config.frustum_size, config.near, config.far);
    let p = voxel.position;
    let world = config.scene_origin + Vector3::new(p.x as f32, p.y as f32, p.z as f32) * config.voxel_size;
    let clip = projection.calc_matrix() * camera.calc_matrix() * Vector4::new(world.x, world.y, world.z, 1.0);
    let ndc = Vector2::new(clip.x / clip.w, clip.y / clip.w);
    assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0, "{:?} is off screen", p);
    camera.pick_ray(ndc, &projection)
}

#[test]
fn load_allocates_one_instance_per_voxel() {
    let mut scene = scene();
    let voxels = generator::generate_room_with(&mut seeded(1));
    let count = voxels.len();
    scene.load_scene(voxels, &mut seeded(1));

    assert!(scene.is_loaded());
    assert_eq!(scene.instances().len(), count);
    assert_eq!(scene.groups().voxel_count(), count);
    assert_eq!(scene.backend().live_buffers(), 1);
    assert_eq!(scene.backend().last_upload().len(), count);
    assert!(!scene.is_dirty());
}

#[test]
fn reload_releases_the_previous_buffer() {
    let mut scene = scene();
    scene.load_scene(generator::generate_room_with(&mut seeded(1)), &mut seeded(1));
    let second = generator::generate_room_with(&mut seeded(2));
    let count = second.len();
    scene.load_scene(second, &mut seeded(2));

    let backend = scene.backend();
    assert_eq!(backend.created(), 2);
    assert_eq!(backend.released(), 1);
    assert_eq!(backend.live_buffers(), 1);
    assert_eq!(backend.double_releases(), 0);
    assert_eq!(scene.instances().len(), count);
    assert_eq!(scene.groups().voxel_count(), count);
}

#[test]
fn reload_with_a_smaller_scene_drops_stale_groups() {
    let mut scene = scene();
    scene.load_scene(generator::generate_room_with(&mut seeded(3)), &mut seeded(3));
    scene.load_scene(vec![voxel(0, 0, 0, 0, Some("bed"))], &mut seeded(3));

    assert_eq!(scene.instances().len(), 1);
    assert_eq!(scene.groups().len(), 1);
    assert!(scene.groups().fire().is_none());
    // animation on the small scene must only touch index 0
    let mut keys = KeySet::new();
    keys.press(MoveKey::W);
    assert!(scene.update(&keys, &mut seeded(3)));
}

#[test]
fn reload_restarts_the_animation_clock() {
    let mut scene = scene();
    scene.load_scene(vec![voxel(0, 0, 0, 0, Some("bed"))], &mut seeded(0));
    for _ in 0..5 {
        scene.update(&KeySet::new(), &mut seeded(0));
    }
    assert!(scene.animation().time > 0.0);
    scene.load_scene(vec![voxel(0, 0, 0, 0, Some("bed"))], &mut seeded(0));
    assert_eq!(scene.animation().time, 0.0);
}

#[test]
fn unload_is_idempotent() {
    let mut scene = scene();
    scene.load_scene(vec![voxel(0, 0, 0, 0, None)], &mut seeded(0));
    scene.unload();
    scene.unload();

    let backend = scene.backend();
    assert_eq!(backend.released(), 1);
    assert_eq!(backend.live_buffers(), 0);
    assert_eq!(backend.double_releases(), 0);
    assert!(!scene.is_loaded());
    assert!(scene.instances().is_empty());
}

#[test]
fn unload_before_any_load_does_nothing() {
    let mut scene = scene();
    scene.unload();
    assert_eq!(scene.backend().released(), 0);
    assert!(!scene.update(&KeySet::new(), &mut seeded(0)));
}

#[test]
fn instances_start_at_grid_position_times_voxel_size() {
    let mut scene = scene();
    scene.load_scene(vec![voxel(4, 6, 8, 0x808080, None)], &mut seeded(0));
    let instance = &scene.instances()[0];
    assert_eq!(instance.position, Vector3::new(2.0, 3.0, 4.0));
    assert_eq!(instance.scale, Vector3::new(1.0, 1.0, 1.0));

    // the upload carries the scene origin
    let origin = scene.config().scene_origin;
    let t = scene.backend().last_upload()[0].translation();
    assert_eq!(t, [origin.x + 2.0, origin.y + 3.0, origin.z + 4.0]);
}

#[test]
fn glowing_colours_are_boosted() {
    let mut scene = scene();
    scene.load_scene(
        vec![
            voxel(0, 0, 0, palette::WIN_GLASS, None),
            voxel(1, 0, 0, palette::WIN_GLOW, None),
        ],
        &mut seeded(0),
    );
    let boost = scene.config().glow_boost;
    let glass = scene.voxels()[0].linear_rgb();
    let glow = scene.voxels()[1].linear_rgb();
    assert_eq!(scene.instances()[0].color, glass.map(|c| c * boost));
    assert_eq!(scene.instances()[1].color, glow);
}

#[test]
fn only_animation_marks_the_scene_dirty() {
    let mut scene = scene();
    scene.load_scene(vec![voxel(0, 0, 0, 0, Some("easel"))], &mut seeded(0));
    assert!(!scene.is_dirty());

    assert!(scene.update(&KeySet::new(), &mut seeded(0)));
    assert!(scene.is_dirty());
    scene.flush();
    assert!(!scene.is_dirty());
    assert_eq!(scene.backend().writes(), 1);

    scene.flush();
    assert_eq!(scene.backend().writes(), 1);
}

#[test]
fn static_scene_never_uploads_again() {
    let mut scene = scene();
    scene.load_scene(vec![voxel(0, 0, 0, 0, None), voxel(1, 0, 0, 0, None)], &mut seeded(0));
    for _ in 0..10 {
        assert!(!scene.update(&KeySet::new(), &mut seeded(0)));
        scene.flush();
    }
    assert_eq!(scene.backend().writes(), 0);
}

#[test]
fn clicking_the_easel_canvas_reports_easel_once() {
    let mut scene = scene();
    scene.load_scene(generator::generate_room_with(&mut seeded(5)), &mut seeded(5));
    let ray = ray_down_at(scene.config(), 70, 42);
    assert_eq!(clicks(&scene, &ray), [EASEL_ID]);
}

#[test]
fn picking_returns_the_nearest_voxel() {
    let mut scene = scene();
    scene.load_scene(
        vec![
            voxel(0, 0, 0, 0, Some("bed")),
            voxel(0, 10, 0, 0, Some("notepad")),
            voxel(0, 5, 0, 0, Some("easel")),
        ],
        &mut seeded(0),
    );
    let hit = scene.pick(&ray_down_at(scene.config(), 0, 0)).expect("hit");
    assert_eq!(hit.index, 1);
    assert_eq!(clicks(&scene, &ray_down_at(scene.config(), 0, 0)), ["notepad"]);
}

#[test]
fn clicks_on_fire_are_ignored() {
    let mut scene = scene();
    scene.load_scene(
        vec![
            voxel(0, 0, 0, 0, Some("bed")),
            voxel(0, 4, 0, 0, Some("animated_fire")),
        ],
        &mut seeded(0),
    );
    assert!(clicks(&scene, &ray_down_at(scene.config(), 0, 0)).is_empty());
}

#[test]
fn character_is_clickable() {
    let mut scene = scene();
    scene.load_scene(vec![voxel(3, 0, 3, 0, Some("character"))], &mut seeded(0));
    assert_eq!(clicks(&scene, &ray_down_at(scene.config(), 3, 3)), ["character"]);
}

#[test]
fn ungrouped_hits_and_misses_invoke_nothing() {
    let mut scene = scene();
    scene.load_scene(
        vec![voxel(0, 0, 0, 0, None), voxel(10, 0, 0, 0, Some("bed"))],
        &mut seeded(0),
    );
    assert!(clicks(&scene, &ray_down_at(scene.config(), 0, 0)).is_empty());
    assert!(clicks(&scene, &ray_down_at(scene.config(), 5, 5)).is_empty());

    let upward = Ray::new(Point3::new(0.0, 500.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
    assert!(clicks(&scene, &upward).is_empty());
    assert!(scene.pick(&upward).is_none());
}

#[test]
fn picking_follows_animated_positions() {
    let mut scene = scene();
    scene.load_scene(vec![voxel(55, 2, 55, 0, Some("character"))], &mut seeded(0));
    let mut keys = KeySet::new();
    keys.press(MoveKey::ArrowRight);
    for _ in 0..20 {
        scene.update(&keys, &mut seeded(0));
    }
    // walked 10 grid units along +X
    assert!(clicks(&scene, &ray_down_at(scene.config(), 55, 55)).is_empty());
    assert_eq!(clicks(&scene, &ray_down_at(scene.config(), 65, 55)), ["character"]);
}

#[test]
fn unloaded_scene_picks_nothing() {
    let mut scene = scene();
    scene.load_scene(vec![voxel(0, 0, 0, 0, Some("bed"))], &mut seeded(0));
    scene.unload();
    assert!(clicks(&scene, &ray_down_at(scene.config(), 0, 0)).is_empty());
}

#[test]
fn frames_upload_only_grouped_voxels() {
    let mut scene = scene();
    scene.load_scene(generator::generate_room_with(&mut seeded(1)), &mut seeded(1));
    let grouped = scene.groups().grouped_count();
    assert!(grouped > 0 && grouped < scene.instances().len());

    for frame in 1..=3u64 {
        assert!(scene.update(&KeySet::new(), &mut seeded(frame)));
        scene.flush();
        assert_eq!(scene.backend().uploaded(), grouped * frame as usize);
    }

    // partial writes leave the buffer equal to a full repack
    let origin = scene.config().scene_origin;
    let expected: Vec<_> = scene.instances().iter().map(|i| i.to_raw(origin)).collect();
    assert_eq!(scene.backend().last_upload(), expected.as_slice());
}

#[test]
fn static_voxels_between_groups_keep_their_load_time_data() {
    let mut scene = scene();
    scene.load_scene(
        vec![
            voxel(0, 0, 0, 0, Some("bed")),
            voxel(1, 0, 0, 0x123456, None),
            voxel(2, 0, 0, 0, Some("animated_fire")),
        ],
        &mut seeded(0),
    );
    let loaded = scene.backend().last_upload()[1];
    for _ in 0..5 {
        scene.update(&KeySet::new(), &mut seeded(4));
        scene.flush();
    }
    assert_eq!(scene.backend().uploaded(), 10);
    assert_eq!(scene.backend().writes(), 10);
    assert_eq!(scene.backend().last_upload()[1], loaded);
}

#[test]
fn clicking_through_the_camera_reports_the_easel() {
    let mut scene = scene();
    scene.load_scene(generator::generate_room_with(&mut seeded(8)), &mut seeded(8));
    let canvas = scene
        .voxels()
        .iter()
        .find(|v| v.position == Vector3::new(70, 25, 42))
        .cloned()
        .expect("canvas voxel");
    assert_eq!(canvas.group.as_ref().map(GroupId::as_str), Some(EASEL_ID));

    let ray = pointer_ray_to(scene.config(), &canvas);
    assert_eq!(clicks(&scene, &ray), [EASEL_ID]);
}

#[test]
fn clicking_a_flame_through_the_camera_reports_nothing() {
    let mut scene = scene();
    scene.load_scene(generator::generate_room_with(&mut seeded(9)), &mut seeded(9));
    let flame = scene
        .voxels()
        .iter()
        .find(|v| v.group == Some(GroupId::Fire) && v.color == palette::FIRE_CORE)
        .cloned()
        .expect("flame voxel");

    let ray = pointer_ray_to(scene.config(), &flame);
    let hit = scene.pick(&ray).expect("the fireplace is hit");
    assert_eq!(scene.voxels()[hit.index].group, Some(GroupId::Fire));
    assert!(clicks(&scene, &ray).is_empty());
}

#[test]
fn clicking_the_top_of_the_character_through_the_camera() {
    let mut scene = scene();
    scene.load_scene(generator::generate_room_with(&mut seeded(10)), &mut seeded(10));
    let top = scene
        .voxels()
        .iter()
        .filter(|v| v.group == Some(GroupId::Character))
        .max_by_key(|v| (v.position.y, v.position.x + v.position.z))
        .cloned()
        .expect("character voxel");

    let ray = pointer_ray_to(scene.config(), &top);
    assert_eq!(clicks(&scene, &ray), [CHARACTER_ID]);
}
