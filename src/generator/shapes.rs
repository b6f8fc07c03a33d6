//! Shape builders: the primitives every room piece is assembled from.
//!
//! All builders append to one [`VoxelBuilder`] in call order, which fixes the
//! voxel (and therefore instance) index of every cube. Coordinates may be
//! fractional, e.g. for leaning legs, and are floored on insertion.

use std::f32::consts::PI;

use cgmath::Vector3;
use rand::Rng;

use crate::data_structures::voxel::{GroupId, Voxel};

/// Cutoff above which a textured voxel takes the first variant colour.
pub const TEXTURE_VARIANT_1: f32 = 0.85;
/// Cutoff above which a textured voxel takes the second variant colour.
pub const TEXTURE_VARIANT_2: f32 = 0.95;

/// Colour of a textured voxel given a uniform draw `r` in `[0, 1)`.
pub fn textured_color(r: f32, base: u32, variant_1: u32, variant_2: u32) -> u32 {
    if r > TEXTURE_VARIANT_2 {
        variant_2
    } else if r > TEXTURE_VARIANT_1 {
        variant_1
    } else {
        base
    }
}

/// Endpoints and styling of a hanging string of lights.
#[derive(Clone, Debug)]
pub struct SaggingString {
    pub start: Vector3<f32>,
    pub end: Vector3<f32>,
    pub steps: u32,
    /// Maximum downward displacement, reached half way along the string.
    pub sag: f32,
    /// A bulb hangs below every `bulb_every`-th step.
    pub bulb_every: u32,
    pub wire: u32,
    pub bulb: u32,
}

/// Append-only voxel sequence under construction.
#[derive(Debug, Default)]
pub struct VoxelBuilder {
    voxels: Vec<Voxel>,
}

impl VoxelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    pub fn finish(self) -> Vec<Voxel> {
        self.voxels
    }

    pub fn add_voxel(&mut self, position: impl Into<Vector3<f32>>, color: u32, group: Option<&GroupId>) {
        let position = position.into();
        let grid = Vector3::new(
            position.x.floor() as i32,
            position.y.floor() as i32,
            position.z.floor() as i32,
        );
        self.voxels.push(Voxel::new(grid, color, group.cloned()));
    }

    /// A solid `width × height × depth` block of one colour. Non-positive
    /// extents produce nothing.
    pub fn add_box(
        &mut self,
        origin: impl Into<Vector3<f32>>,
        extents: [i32; 3],
        color: u32,
        group: Option<&GroupId>,
    ) {
        self.fill(origin.into(), extents, group, |_| color);
    }

    /// Like [`add_box`](Self::add_box), but every voxel draws its own uniform
    /// value and picks between `base` and the two variants by fixed cutoffs.
    pub fn add_textured_box<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        origin: impl Into<Vector3<f32>>,
        extents: [i32; 3],
        colors: [u32; 3],
        group: Option<&GroupId>,
    ) {
        let [base, variant_1, variant_2] = colors;
        self.fill(origin.into(), extents, group, |_| {
            textured_color(rng.r#gen::<f32>(), base, variant_1, variant_2)
        });
    }

    /// Wire following a sine droop between two anchors, with a bulb one voxel
    /// below every `bulb_every`-th step. Emits `steps + 1` wire voxels.
    pub fn add_sagging_string(&mut self, string: &SaggingString, group: Option<&GroupId>) {
        let steps = string.steps.max(1);
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let droop = (t * PI).sin() * string.sag;
            let point = string.start + (string.end - string.start) * t - Vector3::unit_y() * droop;
            self.add_voxel(point, string.wire, group);
            if string.bulb_every > 0 && i % string.bulb_every == 0 {
                self.add_voxel(point - Vector3::unit_y(), string.bulb, group);
            }
        }
    }

    fn fill(
        &mut self,
        origin: Vector3<f32>,
        [width, height, depth]: [i32; 3],
        group: Option<&GroupId>,
        mut color: impl FnMut(Vector3<f32>) -> u32,
    ) {
        for i in 0..width.max(0) {
            for j in 0..height.max(0) {
                for k in 0..depth.max(0) {
                    let position = origin + Vector3::new(i as f32, j as f32, k as f32);
                    let c = color(position);
                    self.add_voxel(position, c, group);
                }
            }
        }
    }
}
