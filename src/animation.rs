//! The per-frame animation step.
//!
//! One call per rendered frame advances the animation clock, moves the
//! character, and rewrites the transforms of animated voxels only: bobbing
//! objects, the walking character and the fire. Static voxels keep the
//! transforms written at load time.
//!
//! Everything here is a pure function of its inputs except the fire flicker,
//! which deliberately draws fresh randomness every frame.

use cgmath::{Vector2, Vector3};
use rand::Rng;

use crate::{
    config::EngineConfig,
    data_structures::{group::GroupIndex, instance::Instance, voxel::Voxel},
    input::KeySet,
};

/// Mutable per-scene animation state.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationState {
    /// Animation clock, advanced by `time_step` per frame.
    pub time: f32,
    /// Planar (x, z) translation of the character group in grid units.
    pub character_offset: Vector2<f32>,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationState {
    pub fn new() -> Self {
        Self {
            time: 0.0,
            character_offset: Vector2::new(0.0, 0.0),
        }
    }
}

/// Vertical displacement of a bobbing group.
pub fn bob_displacement(amplitude: f32, time: f32, phase: f32) -> f32 {
    amplitude * (time + phase).sin()
}

/// Hop of the character in grid units: a fast rectified sine while moving,
/// zero while idle.
pub fn hop_height(config: &EngineConfig, time: f32, moving: bool) -> f32 {
    if moving {
        (time * config.hop_frequency).sin().abs() * config.hop_height
    } else {
        0.0
    }
}

/// Clamp `offset` so that `spawn + offset` stays inside `[min, max]` on both axes.
pub fn clamp_offset(offset: Vector2<f32>, spawn: Vector2<f32>, min: f32, max: f32) -> Vector2<f32> {
    Vector2::new(
        offset.x.clamp(min - spawn.x, max - spawn.x),
        offset.y.clamp(min - spawn.y, max - spawn.y),
    )
}

/// One frame of character movement: every held direction adds `move_speed`,
/// then the result is hard-clamped to the walkable footprint.
pub fn advance_character(config: &EngineConfig, offset: Vector2<f32>, keys: &KeySet) -> Vector2<f32> {
    let moved = offset + keys.movement() * config.move_speed;
    clamp_offset(moved, config.spawn, config.walk_min, config.walk_max)
}

/// World-space position of a voxel at rest.
pub fn rest_position(voxel: &Voxel, voxel_size: f32) -> Vector3<f32> {
    let p = voxel.position;
    Vector3::new(p.x as f32, p.y as f32, p.z as f32) * voxel_size
}

/// Everything the step reads besides its own state.
pub struct Frame<'a> {
    pub voxels: &'a [Voxel],
    pub groups: &'a GroupIndex,
    pub keys: &'a KeySet,
}

/// Advance `state` by one frame and rewrite the animated `instances`.
///
/// Returns whether any instance transform changed, i.e. whether the
/// instance buffer needs to be uploaded again.
pub fn step<R: Rng + ?Sized>(
    state: &mut AnimationState,
    config: &EngineConfig,
    frame: &Frame<'_>,
    rng: &mut R,
    instances: &mut [Instance],
) -> bool {
    let size = config.voxel_size;
    let mut dirty = false;

    state.time += config.time_step;
    state.character_offset = advance_character(config, state.character_offset, frame.keys);

    for group in frame.groups.bobbing() {
        let lift = bob_displacement(config.bob_amplitude, state.time, group.phase);
        for (&idx, &base_y) in group.members.iter().zip(&group.base_y) {
            let Some((instance, voxel)) = slot(instances, frame.voxels, idx) else {
                continue;
            };
            instance.position = Vector3::new(
                voxel.position.x as f32 * size,
                base_y as f32 * size + lift,
                voxel.position.z as f32 * size,
            );
            instance.scale = Vector3::new(1.0, 1.0, 1.0);
            dirty = true;
        }
    }

    if let Some(character) = frame.groups.character() {
        let hop = hop_height(config, state.time, frame.keys.is_moving());
        let offset = state.character_offset;
        for (&idx, &base_y) in character.members.iter().zip(&character.base_y) {
            let Some((instance, voxel)) = slot(instances, frame.voxels, idx) else {
                continue;
            };
            instance.position = Vector3::new(
                (voxel.position.x as f32 + offset.x) * size,
                (base_y as f32 + hop) * size,
                (voxel.position.z as f32 + offset.y) * size,
            );
            dirty = true;
        }
    }

    if let Some(fire) = frame.groups.fire() {
        for &idx in &fire.members {
            let Some((instance, voxel)) = slot(instances, frame.voxels, idx) else {
                continue;
            };
            let stretch = 0.5 + rng.r#gen::<f32>() * 0.8;
            let jitter = rng.r#gen::<f32>() * 0.2;
            instance.position = Vector3::new(
                voxel.position.x as f32 * size,
                (voxel.position.y as f32 + jitter) * size,
                voxel.position.z as f32 * size,
            );
            instance.scale = Vector3::new(1.0, stretch, 1.0);
            dirty = true;
        }
    }

    dirty
}

/// Instance and voxel at `idx`. A stale index is a broken invariant: loud in
/// debug builds, skipped in release builds so the render loop survives.
fn slot<'a, 'v>(
    instances: &'a mut [Instance],
    voxels: &'v [Voxel],
    idx: usize,
) -> Option<(&'a mut Instance, &'v Voxel)> {
    debug_assert!(
        idx < instances.len() && idx < voxels.len(),
        "group member {} out of range for {} voxels",
        idx,
        voxels.len()
    );
    Some((instances.get_mut(idx)?, voxels.get(idx)?))
}
