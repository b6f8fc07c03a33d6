use cgmath::{InnerSpace, Matrix4, Vector3};
use wgpu::util::DeviceExt;

use crate::{
    data_structures::voxel::srgb_to_linear,
    pipelines::shadow::{self, ShadowMap},
};

/// Linear RGB of a packed `0xRRGGBB` colour.
fn linear(hex: u32) -> [f32; 3] {
    [16, 8, 0].map(|shift| srgb_to_linear(((hex >> shift) & 0xFF) as f32 / 255.0))
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLight {
    /// World position, range in `w`.
    position: [f32; 4],
    /// Linear colour, intensity in `w`.
    color: [f32; 4],
}

impl PointLight {
    pub fn new(position: Vector3<f32>, hex: u32, intensity: f32, range: f32) -> Self {
        let [r, g, b] = linear(hex);
        Self {
            position: [position.x, position.y, position.z, range],
            color: [r, g, b, intensity],
        }
    }

    pub fn position(&self) -> Vector3<f32> {
        Vector3::new(self.position[0], self.position[1], self.position[2])
    }

    pub fn range(&self) -> f32 {
        self.position[3]
    }

    pub fn intensity(&self) -> f32 {
        self.color[3]
    }
}

/// Scene lighting as laid out in `voxel.wgsl`.
///
/// Every field is a `mat4` or `vec4` so the struct needs no explicit padding.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    /// Clip space of the sun's shadow camera.
    light_view_proj: [[f32; 4]; 4],
    /// Hemisphere sky colour, intensity in `w`.
    sky_color: [f32; 4],
    ground_color: [f32; 4],
    /// Unit vector towards the directional light, intensity in `w`.
    sun_direction: [f32; 4],
    sun_color: [f32; 4],
    points: [PointLight; 2],
}

impl LightUniform {
    pub fn new(
        sky: u32,
        ground: u32,
        hemisphere_intensity: f32,
        sun_position: Vector3<f32>,
        sun: u32,
        sun_intensity: f32,
        points: [PointLight; 2],
    ) -> Self {
        let [sr, sg, sb] = linear(sky);
        let [gr, gg, gb] = linear(ground);
        let [cr, cg, cb] = linear(sun);
        let dir = sun_position.normalize();
        Self {
            light_view_proj: shadow::shadow_view_proj(sun_position).into(),
            sky_color: [sr, sg, sb, hemisphere_intensity],
            ground_color: [gr, gg, gb, 1.0],
            sun_direction: [dir.x, dir.y, dir.z, sun_intensity],
            sun_color: [cr, cg, cb, 1.0],
            points,
        }
    }

    /// The diorama's lighting: a white hemisphere and sun, a warm glow at the
    /// window and an orange light in the fireplace. Point light positions are
    /// given relative to the voxel root and moved by `scene_origin`.
    pub fn diorama(scene_origin: Vector3<f32>) -> Self {
        Self::new(
            0xFFFFFF,
            0x444444,
            1.2,
            Vector3::new(-100.0, 150.0, -50.0),
            0xFFFFFF,
            1.2,
            [
                PointLight::new(scene_origin + Vector3::new(20.0, 60.0, 60.0), 0xFFF9C4, 2.0, 100.0),
                PointLight::new(scene_origin + Vector3::new(80.0, 20.0, 10.0), 0xFF9800, 2.5, 80.0),
            ],
        )
    }

    pub fn points(&self) -> &[PointLight; 2] {
        &self.points
    }

    pub fn sun_direction(&self) -> Vector3<f32> {
        Vector3::new(self.sun_direction[0], self.sun_direction[1], self.sun_direction[2])
    }

    pub fn light_view_proj(&self) -> Matrix4<f32> {
        self.light_view_proj.into()
    }
}

/// The light uniform, the shadow map and the two bind groups reading them.
///
/// `bind_group` serves the voxel pass: the uniform at binding 0, the shadow
/// map at 1 and its comparison sampler at 2. `shadow_bind_group` serves the
/// shadow pass, which writes the shadow map and so cannot bind it.
#[derive(Debug)]
pub struct LightResources {
    pub uniform: LightUniform,
    pub buffer: wgpu::Buffer,
    pub shadow_map: ShadowMap,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub shadow_bind_group: wgpu::BindGroup,
    pub shadow_bind_group_layout: wgpu::BindGroupLayout,
}

impl LightResources {
    pub fn new(device: &wgpu::Device, uniform: LightUniform) -> Self {
        let buffer = mk_buffer(device, uniform);
        let shadow_map = ShadowMap::new(device);
        let bind_group_layout = mk_bind_group_layout(device);
        let bind_group = mk_bind_group(device, &bind_group_layout, &buffer, &shadow_map);
        let shadow_bind_group_layout = shadow::mk_shadow_bind_group_layout(device);
        let shadow_bind_group =
            shadow::mk_shadow_bind_group(device, &shadow_bind_group_layout, &buffer);
        Self {
            uniform,
            buffer,
            shadow_map,
            bind_group,
            bind_group_layout,
            shadow_bind_group,
            shadow_bind_group_layout,
        }
    }
}

pub fn mk_buffer(device: &wgpu::Device, light_uniform: LightUniform) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Light Uniform Buffer"),
        contents: bytemuck::cast_slice(&[light_uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Depth,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                count: None,
            },
        ],
        label: Some("light_bind_group_layout"),
    })
}

pub fn mk_bind_group(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    light_buffer: &wgpu::Buffer,
    shadow_map: &ShadowMap,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: bind_group_layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: light_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&shadow_map.view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(&shadow_map.sampler),
            },
        ],
        label: Some("light_bind_group"),
    })
}
