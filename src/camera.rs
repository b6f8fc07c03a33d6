//! Isometric orthographic camera, orbit controls and pick rays.
//!
//! The camera looks at its target from a fixed elevation. The projection is
//! orthographic, so apparent object size depends only on the zoom level and
//! never on distance or window size. On resize only the horizontal frustum
//! extent follows the new aspect ratio.

use std::f32::consts::PI;

use cgmath::{EuclideanSpace, InnerSpace, Matrix4, Point3, SquareMatrix, Vector2, Vector3, Vector4};

use crate::{config::EngineConfig, input::InputAction};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

const MIN_POLAR: f32 = 0.01;
const MAX_POLAR: f32 = PI - 0.01;

/// An eye looking at a target, parameterised on a sphere around the target.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub target: Point3<f32>,
    pub radius: f32,
    /// Rotation around the vertical axis, from +Z towards +X.
    pub azimuth: f32,
    /// Angle from the +Y axis.
    pub polar: f32,
}

impl Camera {
    pub fn looking_at(position: Point3<f32>, target: Point3<f32>) -> Self {
        let offset = position - target;
        let radius = offset.magnitude().max(f32::EPSILON);
        Self {
            target,
            radius,
            azimuth: offset.x.atan2(offset.z),
            polar: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn position(&self) -> Point3<f32> {
        let sin_polar = self.polar.sin();
        self.target
            + Vector3::new(
                self.radius * sin_polar * self.azimuth.sin(),
                self.radius * self.polar.cos(),
                self.radius * sin_polar * self.azimuth.cos(),
            )
    }

    pub fn forward(&self) -> Vector3<f32> {
        (self.target - self.position()).normalize()
    }

    pub fn right(&self) -> Vector3<f32> {
        self.forward().cross(Vector3::unit_y()).normalize()
    }

    pub fn up(&self) -> Vector3<f32> {
        self.right().cross(self.forward())
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position(), self.target, Vector3::unit_y())
    }

    /// Ray from the near plane through `ndc` (x right, y up, both in `[-1, 1]`).
    ///
    /// For an orthographic projection all rays share the view direction and
    /// only their origins differ.
    pub fn pick_ray(&self, ndc: Vector2<f32>, projection: &OrthographicProjection) -> Ray {
        let view_proj = projection.calc_matrix() * self.calc_matrix();
        let Some(inverse) = view_proj.invert() else {
            return Ray::new(self.position(), self.forward());
        };
        let unproject = |depth: f32| {
            let p = inverse * Vector4::new(ndc.x, ndc.y, depth, 1.0);
            Point3::from_vec(p.truncate() / p.w)
        };
        let near = unproject(0.0);
        let far = unproject(1.0);
        Ray::new(near, far - near)
    }
}

/// A half-line with a normalised direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }

    /// The same ray expressed in a frame translated by `offset`.
    pub fn translated(&self, offset: Vector3<f32>) -> Self {
        Self {
            origin: self.origin + offset,
            direction: self.direction,
        }
    }
}

/// Edges of the orthographic view volume in view space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrustumBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrthographicProjection {
    width: u32,
    height: u32,
    frustum_size: f32,
    pub zoom: f32,
    near: f32,
    far: f32,
}

impl OrthographicProjection {
    pub fn new(width: u32, height: u32, frustum_size: f32, near: f32, far: f32) -> Self {
        let mut projection = Self {
            width: 1,
            height: 1,
            frustum_size,
            zoom: 1.0,
            near,
            far,
        };
        projection.resize(width, height);
        projection
    }

    /// Adopt a new viewport. Zero-sized viewports (minimised windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.width = width;
            self.height = height;
        }
    }

    pub fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Frustum edges at zoom 1; zoom is applied in [`calc_matrix`](Self::calc_matrix).
    pub fn bounds(&self) -> FrustumBounds {
        let half_height = self.frustum_size / 2.0;
        let half_width = half_height * self.aspect();
        FrustumBounds {
            left: -half_width,
            right: half_width,
            top: half_height,
            bottom: -half_height,
        }
    }

    /// World units covered by one pixel at the current zoom.
    pub fn world_per_pixel(&self) -> f32 {
        self.frustum_size / self.zoom / self.height as f32
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        let b = self.bounds();
        let z = self.zoom;
        OPENGL_TO_WGPU_MATRIX
            * cgmath::ortho(b.left / z, b.right / z, b.bottom / z, b.top / z, self.near, self.far)
    }
}

/// Damped orbit, pan and clamped zoom around the camera target.
#[derive(Clone, Debug)]
pub struct OrbitController {
    azimuth_delta: f32,
    polar_delta: f32,
    pan_offset: Vector3<f32>,
    damping: f32,
    rotate_speed: f32,
    zoom_speed: f32,
    min_zoom: f32,
    max_zoom: f32,
}

impl OrbitController {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            azimuth_delta: 0.0,
            polar_delta: 0.0,
            pan_offset: Vector3::new(0.0, 0.0, 0.0),
            damping: config.damping,
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
        }
    }

    /// Feed a camera gesture. Picks and other actions are ignored.
    pub fn handle_action(
        &mut self,
        action: &InputAction,
        camera: &Camera,
        projection: &mut OrthographicProjection,
    ) {
        match *action {
            InputAction::Orbit(delta) => {
                self.azimuth_delta -= delta.x * self.rotate_speed;
                self.polar_delta -= delta.y * self.rotate_speed;
            }
            InputAction::Pan(delta) => {
                let scale = projection.world_per_pixel();
                self.pan_offset +=
                    (camera.right() * -delta.x + camera.up() * delta.y) * scale;
            }
            InputAction::Zoom(lines) => {
                let zoom = projection.zoom * (1.0 + self.zoom_speed).powf(lines);
                projection.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
            }
            InputAction::Pick(_) => {}
        }
    }

    /// Apply a damped share of the accumulated motion and decay the rest.
    pub fn update(&mut self, camera: &mut Camera) {
        camera.azimuth += self.azimuth_delta * self.damping;
        camera.polar = (camera.polar + self.polar_delta * self.damping).clamp(MIN_POLAR, MAX_POLAR);
        camera.target += self.pan_offset * self.damping;

        let decay = 1.0 - self.damping;
        self.azimuth_delta *= decay;
        self.polar_delta *= decay;
        self.pan_offset *= decay;
    }

    pub fn is_settled(&self) -> bool {
        self.azimuth_delta.abs() < 1e-5
            && self.polar_delta.abs() < 1e-5
            && self.pan_offset.magnitude2() < 1e-10
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &OrthographicProjection) {
        self.view_position = camera.position().to_homogeneous().into();
        self.view_proj = (projection.calc_matrix() * camera.calc_matrix()).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// The camera together with its controller and GPU-side uniform.
#[derive(Debug)]
pub struct CameraResources {
    pub camera: Camera,
    pub projection: OrthographicProjection,
    pub controller: OrbitController,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}
