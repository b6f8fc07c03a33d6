#![allow(dead_code)]

use std::collections::HashSet;

use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use voxel_diorama::{
    camera::Ray,
    cgmath::{Point3, Vector3},
    config::EngineConfig,
    data_structures::{instance::InstanceRaw, voxel::GroupId, voxel::Voxel},
    scene::InstanceBackend,
};

/// Handle of a buffer created by [`MockBackend`]. Not `Clone`, so a released
/// buffer cannot be used again.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct MockBuffer(pub u32);

/// Instance backend that records the lifetime of every buffer it hands out.
#[derive(Debug, Default)]
pub(crate) struct MockBackend {
    next_id: u32,
    live: HashSet<u32>,
    created: u32,
    released: u32,
    writes: u32,
    double_releases: u32,
    uploaded: usize,
    contents: Vec<InstanceRaw>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_buffers(&self) -> usize {
        self.live.len()
    }

    pub fn created(&self) -> u32 {
        self.created
    }

    pub fn released(&self) -> u32 {
        self.released
    }

    pub fn writes(&self) -> u32 {
        self.writes
    }

    pub fn double_releases(&self) -> u32 {
        self.double_releases
    }

    /// Contents of the most recently created buffer, including later writes.
    pub fn last_upload(&self) -> &[InstanceRaw] {
        &self.contents
    }

    /// Instances transferred by writes, not counting buffer creation.
    pub fn uploaded(&self) -> usize {
        self.uploaded
    }
}

impl InstanceBackend for MockBackend {
    type Buffer = MockBuffer;

    fn create_instance_buffer(&mut self, instances: &[InstanceRaw]) -> MockBuffer {
        let id = self.next_id;
        self.next_id += 1;
        self.created += 1;
        self.live.insert(id);
        self.contents = instances.to_vec();
        MockBuffer(id)
    }

    fn write_instance_buffer(&mut self, buffer: &MockBuffer, first: usize, instances: &[InstanceRaw]) {
        assert!(self.live.contains(&buffer.0), "write to released buffer {}", buffer.0);
        let end = first + instances.len();
        assert!(end <= self.contents.len(), "write {}..{} past the buffer end", first, end);
        self.writes += 1;
        self.uploaded += instances.len();
        self.contents[first..end].copy_from_slice(instances);
    }

    fn release_instance_buffer(&mut self, buffer: MockBuffer) {
        if !self.live.remove(&buffer.0) {
            self.double_releases += 1;
        }
        self.released += 1;
    }
}

pub(crate) fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

pub(crate) fn voxel(x: i32, y: i32, z: i32, color: u32, group: Option<&str>) -> Voxel {
    Voxel::new(Vector3::new(x, y, z), color, group.map(GroupId::new))
}

/// World-space ray falling straight down onto the centre of grid column `(x, z)`.
pub(crate) fn ray_down_at(config: &EngineConfig, x: i32, z: i32) -> Ray {
    let o = config.scene_origin;
    let s = config.voxel_size;
    Ray::new(
        Point3::new(o.x + x as f32 * s, 500.0, o.z + z as f32 * s),
        Vector3::new(0.0, -1.0, 0.0),
    )
}
