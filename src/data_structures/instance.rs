//! Per-voxel instance data for GPU rendering.
//!
//! Every voxel of a scene owns exactly one [`Instance`] at the same index. The
//! instance holds the world-space transform and the final (already boosted)
//! linear colour. [`InstanceRaw`] is the packed form uploaded to the instance
//! buffer.

use cgmath::Vector3;

use crate::data_structures::model;

/// Per-voxel transformation and colour.
///
/// Voxels never rotate, so the transform is translation plus a non-uniform
/// scale (used by the flickering fire to stretch flames vertically).
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    pub position: Vector3<f32>,
    pub scale: Vector3<f32>,
    pub color: [f32; 3],
}

impl Instance {
    pub fn new() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
            color: [1.0, 1.0, 1.0],
        }
    }

    /// Model matrix relative to the scene root translated by `origin`.
    pub fn to_matrix(&self, origin: Vector3<f32>) -> cgmath::Matrix4<f32> {
        cgmath::Matrix4::from_translation(origin + self.position)
            * cgmath::Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    pub fn to_raw(&self, origin: Vector3<f32>) -> InstanceRaw {
        InstanceRaw {
            model: self.to_matrix(origin).into(),
            color: [self.color[0], self.color[1], self.color[2], 1.0],
        }
    }

    /// Half edge lengths of the voxel cube after scaling.
    pub fn half_extents(&self, voxel_size: f32) -> Vector3<f32> {
        self.scale * (voxel_size * 0.5)
    }
}

impl From<Vector3<f32>> for Instance {
    fn from(position: Vector3<f32>) -> Self {
        Instance {
            position,
            ..Default::default()
        }
    }
}

impl Default for Instance {
    fn default() -> Self {
        Self::new()
    }
}

/**
 * The raw instance is the actual data stored on the GPU
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

impl InstanceRaw {
    pub fn translation(&self) -> [f32; 3] {
        [self.model[3][0], self.model[3][1], self.model[3][2]]
    }

    pub fn color(&self) -> [f32; 4] {
        self.color
    }
}

/**
 * Stride layout: the model matrix as four vec4 columns (locations 5-8)
 * followed by the linear RGBA colour (location 9).
 */
impl model::Vertex for InstanceRaw {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            // Advance once per voxel, not once per cube vertex
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x4,
                },
                // A mat4 takes up 4 vertex slots as it is technically 4 vec4s.
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 6,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 7,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 12]>() as wgpu::BufferAddress,
                    shader_location: 8,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 16]>() as wgpu::BufferAddress,
                    shader_location: 9,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}
