//! The GPU-agnostic core of the render surface.
//!
//! A [`VoxelScene`] owns one loaded voxel sequence together with everything
//! derived from it: the group index, the per-voxel instances, the animation
//! state and the instance buffer. Loading a new sequence releases the old
//! buffer before anything else happens, so at most one buffer is ever live.
//!
//! Buffer allocation goes through the [`InstanceBackend`] seam.
//! [`GpuInstances`] is the wgpu implementation used by the engine.

use rand::Rng;
use wgpu::util::DeviceExt;

use crate::{
    animation::{self, AnimationState, Frame},
    camera::Ray,
    config::EngineConfig,
    data_structures::{
        group::GroupIndex,
        instance::{Instance, InstanceRaw},
        voxel::Voxel,
    },
    generator::palette,
    input::KeySet,
    pick::{self, PickHit},
};

/// Allocation of the per-voxel instance buffer.
pub trait InstanceBackend {
    type Buffer;

    fn create_instance_buffer(&mut self, instances: &[InstanceRaw]) -> Self::Buffer;
    /// Overwrite the instances starting at index `first`.
    fn write_instance_buffer(&mut self, buffer: &Self::Buffer, first: usize, instances: &[InstanceRaw]);
    fn release_instance_buffer(&mut self, buffer: Self::Buffer);
}

/// wgpu-backed instance buffers.
pub struct GpuInstances {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl InstanceBackend for GpuInstances {
    type Buffer = wgpu::Buffer;

    fn create_instance_buffer(&mut self, instances: &[InstanceRaw]) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Voxel Instance Buffer"),
                contents: bytemuck::cast_slice(instances),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            })
    }

    fn write_instance_buffer(&mut self, buffer: &wgpu::Buffer, first: usize, instances: &[InstanceRaw]) {
        let offset = (first * std::mem::size_of::<InstanceRaw>()) as wgpu::BufferAddress;
        self.queue
            .write_buffer(buffer, offset, bytemuck::cast_slice(instances));
    }

    fn release_instance_buffer(&mut self, buffer: wgpu::Buffer) {
        buffer.destroy();
    }
}

/// One loaded diorama and its instance buffer.
pub struct VoxelScene<B: InstanceBackend> {
    backend: B,
    config: EngineConfig,
    voxels: Vec<Voxel>,
    groups: GroupIndex,
    instances: Vec<Instance>,
    /// Packed copy of `instances` as last uploaded.
    raw: Vec<InstanceRaw>,
    state: AnimationState,
    buffer: Option<B::Buffer>,
    dirty: bool,
}

impl<B: InstanceBackend> VoxelScene<B> {
    /// An empty scene. Nothing is allocated until the first [`load_scene`](Self::load_scene).
    pub fn new(backend: B, config: EngineConfig) -> Self {
        Self {
            backend,
            config,
            voxels: Vec::new(),
            groups: GroupIndex::default(),
            instances: Vec::new(),
            raw: Vec::new(),
            state: AnimationState::new(),
            buffer: None,
            dirty: false,
        }
    }

    /// Replace the whole scene with `voxels`.
    ///
    /// The previous instance buffer is released first. Instances start at the
    /// voxel's grid position times the voxel size with unit scale. Colours are
    /// linearised, and glowing colours get the configured boost. The animation
    /// clock and the character offset start over.
    pub fn load_scene<R: Rng + ?Sized>(&mut self, voxels: Vec<Voxel>, rng: &mut R) {
        if let Some(old) = self.buffer.take() {
            log::debug!("Releasing instance buffer of {} voxels", self.voxels.len());
            self.backend.release_instance_buffer(old);
        }

        let groups = GroupIndex::build(&voxels, rng);
        let size = self.config.voxel_size;
        let boost = self.config.glow_boost;
        let instances: Vec<Instance> = voxels
            .iter()
            .map(|voxel| {
                let mut color = voxel.linear_rgb();
                if palette::is_glowing(voxel.color) {
                    color = color.map(|c| c * boost);
                }
                Instance {
                    color,
                    ..Instance::from(animation::rest_position(voxel, size))
                }
            })
            .collect();

        log::info!(
            "Loaded scene with {} voxels in {} groups",
            voxels.len(),
            groups.len()
        );

        let origin = self.config.scene_origin;
        let raw: Vec<InstanceRaw> = instances.iter().map(|instance| instance.to_raw(origin)).collect();
        self.buffer = Some(self.backend.create_instance_buffer(&raw));
        self.voxels = voxels;
        self.groups = groups;
        self.instances = instances;
        self.raw = raw;
        self.state = AnimationState::new();
        self.dirty = false;
    }

    /// Run one animation step. Returns whether instances changed.
    pub fn update<R: Rng + ?Sized>(&mut self, keys: &KeySet, rng: &mut R) -> bool {
        if self.buffer.is_none() {
            return false;
        }
        let frame = Frame {
            voxels: &self.voxels,
            groups: &self.groups,
            keys,
        };
        let changed = animation::step(&mut self.state, &self.config, &frame, rng, &mut self.instances);
        self.dirty |= changed;
        changed
    }

    /// Upload the animated instances if they changed since the last upload.
    ///
    /// Only the grouped index runs are repacked and written. Static voxels
    /// keep the data uploaded by [`load_scene`](Self::load_scene).
    pub fn flush(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;
        let Some(buffer) = &self.buffer else {
            return;
        };
        let origin = self.config.scene_origin;
        for run in self.groups.animated_runs() {
            let (Some(raw), Some(instances)) =
                (self.raw.get_mut(run.clone()), self.instances.get(run.clone()))
            else {
                debug_assert!(false, "animated run {:?} out of range", run);
                continue;
            };
            for (packed, instance) in raw.iter_mut().zip(instances) {
                *packed = instance.to_raw(origin);
            }
            self.backend.write_instance_buffer(buffer, run.start, raw);
        }
    }

    /// Nearest voxel under `ray`, which is given in world space.
    pub fn pick(&self, ray: &Ray) -> Option<PickHit> {
        let local = ray.translated(-self.config.scene_origin);
        pick::pick_instance(&local, &self.instances, self.config.voxel_size)
    }

    /// Resolve a primary click. `on_click` receives the group id of the hit
    /// voxel unless it has no group or belongs to the fire.
    ///
    /// Returns whether `on_click` was invoked.
    pub fn click(&self, ray: &Ray, on_click: &mut dyn FnMut(&str)) -> bool {
        let Some(hit) = self.pick(ray) else {
            return false;
        };
        let Some(id) = self.voxels.get(hit.index).and_then(|voxel| voxel.group.as_ref()) else {
            return false;
        };
        if !id.is_clickable() {
            log::debug!("Ignoring click on {}", id);
            return false;
        }
        log::info!("Clicked {}", id);
        on_click(id.as_str());
        true
    }

    /// Release the instance buffer and drop the loaded voxels. Safe to call
    /// any number of times.
    pub fn unload(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.backend.release_instance_buffer(buffer);
            log::debug!("Unloaded scene of {} voxels", self.voxels.len());
        }
        self.voxels.clear();
        self.instances.clear();
        self.raw.clear();
        self.groups = GroupIndex::default();
        self.state = AnimationState::new();
        self.dirty = false;
    }

    pub fn is_loaded(&self) -> bool {
        self.buffer.is_some()
    }

    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    pub fn groups(&self) -> &GroupIndex {
        &self.groups
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn animation(&self) -> &AnimationState {
        &self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn instance_buffer(&self) -> Option<&B::Buffer> {
        self.buffer.as_ref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
