//! Tunable engine constants.
//!
//! The host can adjust any field before handing the config to
//! [`Engine::new`](crate::engine::Engine::new). Nothing is read from the
//! environment or from disk.

use cgmath::{Point3, Vector2, Vector3};

use crate::generator::{CHARACTER_SPAWN, ROOM_SIZE};

#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Edge length of one voxel in world units.
    pub voxel_size: f32,
    /// Vertical extent of the orthographic frustum at zoom 1.
    pub frustum_size: f32,
    pub near: f32,
    pub far: f32,
    pub camera_position: Point3<f32>,
    pub camera_target: Point3<f32>,
    /// Translation of the voxel root so the room sits centred in view.
    pub scene_origin: Vector3<f32>,
    pub clear_colour: wgpu::Color,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Fraction of the orbit velocity applied (and removed) per frame.
    pub damping: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    /// Animation clock advance per rendered frame.
    pub time_step: f32,
    /// Character movement in grid units per frame and axis.
    pub move_speed: f32,
    /// Grid (x, z) at which the character was generated.
    pub spawn: Vector2<f32>,
    /// The walkable footprint: spawn plus offset stays in `[walk_min, walk_max]`.
    pub walk_min: f32,
    pub walk_max: f32,
    /// Bob displacement amplitude in world units.
    pub bob_amplitude: f32,
    /// Peak hop height of the walking character in grid units.
    pub hop_height: f32,
    pub hop_frequency: f32,
    /// Colour multiplier for the glowing allow-list.
    pub glow_boost: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let margin = 2.0;
        Self {
            voxel_size: 0.5,
            frustum_size: 120.0,
            near: 1.0,
            far: 1000.0,
            camera_position: Point3::new(200.0, 200.0, 200.0),
            camera_target: Point3::new(0.0, 0.0, 0.0),
            scene_origin: Vector3::new(-35.0, -20.0, -35.0),
            // 0x22332A
            clear_colour: wgpu::Color {
                r: 0.016,
                g: 0.033,
                b: 0.023,
                a: 1.0,
            },
            min_zoom: 0.5,
            max_zoom: 2.0,
            damping: 0.05,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            time_step: 0.03,
            move_speed: 0.5,
            spawn: Vector2::new(CHARACTER_SPAWN.0 as f32, CHARACTER_SPAWN.1 as f32),
            walk_min: margin,
            walk_max: ROOM_SIZE as f32 - margin,
            bob_amplitude: 2.0 * 0.1,
            hop_height: 1.5,
            hop_frequency: 4.0,
            glow_boost: 1.5,
        }
    }
}
