//! The render surface: one window, one diorama.
//!
//! [`Engine`] ties the GPU [`Context`] to a [`VoxelScene`] and drives it
//! through explicit phases. It is created once the window and device exist,
//! receives a voxel sequence via [`Engine::load_scene`], renders with
//! [`Engine::frame`] and is torn down with [`Engine::cleanup`]. After cleanup
//! every further frame, resize and scene load is a no-op and the click
//! callback is never invoked.

use std::iter;

use instant::Instant;
use rand::{SeedableRng, rngs::StdRng};
use winit::event::WindowEvent;

use crate::{
    config::EngineConfig,
    context::Context,
    data_structures::{
        model::{CubeMesh, DrawVoxels},
        voxel::Voxel,
    },
    input::{InputAction, InputRouter},
    pipelines::{shadow::mk_shadow_pipeline, voxel::mk_voxel_pipeline},
    scene::{GpuInstances, VoxelScene},
};

/// Receives the group id of every clicked object.
pub type ObjectClickHandler = Box<dyn FnMut(&str)>;

pub struct Engine {
    ctx: Context,
    scene: VoxelScene<GpuInstances>,
    cube: CubeMesh,
    pipeline: wgpu::RenderPipeline,
    shadow_pipeline: wgpu::RenderPipeline,
    input: InputRouter,
    on_object_click: ObjectClickHandler,
    rng: StdRng,
    running: bool,
}

impl Engine {
    pub fn new(ctx: Context, config: EngineConfig, on_object_click: ObjectClickHandler) -> Self {
        let backend = GpuInstances {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
        };
        let cube = CubeMesh::new(&ctx.device, config.voxel_size);
        let pipeline = mk_voxel_pipeline(
            &ctx.device,
            &ctx.config,
            &ctx.camera.bind_group_layout,
            &ctx.light.bind_group_layout,
        );
        let shadow_pipeline = mk_shadow_pipeline(&ctx.device, &ctx.light.shadow_bind_group_layout);
        let input = InputRouter::new(ctx.config.width, ctx.config.height);
        Self {
            scene: VoxelScene::new(backend, config),
            ctx,
            cube,
            pipeline,
            shadow_pipeline,
            input,
            on_object_click,
            rng: StdRng::from_entropy(),
            running: true,
        }
    }

    /// Replace the displayed diorama. Ignored after [`cleanup`](Self::cleanup).
    pub fn load_scene(&mut self, voxels: Vec<Voxel>) {
        if !self.running {
            log::warn!("Ignoring scene load after cleanup");
            return;
        }
        let started = Instant::now();
        self.scene.load_scene(voxels, &mut self.rng);
        log::debug!("Scene upload took {:?}", started.elapsed());
        self.ctx.window.request_redraw();
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        if !self.running {
            return;
        }
        let Some(action) = self.input.handle_window_event(event) else {
            return;
        };
        match action {
            InputAction::Pick(ndc) => {
                let camera = &self.ctx.camera;
                let ray = camera.camera.pick_ray(ndc, &camera.projection);
                self.scene.click(&ray, &mut *self.on_object_click);
            }
            gesture => {
                let camera = &mut self.ctx.camera;
                camera
                    .controller
                    .handle_action(&gesture, &camera.camera, &mut camera.projection);
            }
        }
    }

    /// Adopt a new viewport. Apparent object size is unaffected; only the
    /// horizontal extent of the view follows the aspect ratio.
    /// Ignored after [`cleanup`](Self::cleanup).
    pub fn handle_resize(&mut self, width: u32, height: u32) {
        if !self.running {
            log::debug!("Ignoring resize to {}x{} after cleanup", width, height);
            return;
        }
        self.ctx.resize(width, height);
        self.input.resize(width, height);
    }

    /// Update controls, animate, upload and draw one frame.
    pub fn frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        if !self.running {
            return Ok(());
        }
        self.ctx.window.request_redraw();

        let camera = &mut self.ctx.camera;
        camera.controller.update(&mut camera.camera);
        self.ctx.write_camera();

        self.scene.update(self.input.keys(), &mut self.rng);
        self.scene.flush();

        if !self.ctx.is_surface_configured {
            return Ok(());
        }
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.render(&view);
        output.present();
        Ok(())
    }

    /// Record and submit the shadow pass and the voxel pass into `view`.
    pub fn render(&self, view: &wgpu::TextureView) {
        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        let amount = self.scene.instances().len() as u32;
        let instances = self.scene.instance_buffer().filter(|_| amount > 0);
        {
            let mut shadow_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shadow Pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.light.shadow_map.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(instances) = instances {
                shadow_pass.set_pipeline(&self.shadow_pipeline);
                shadow_pass.set_vertex_buffer(1, instances.slice(..));
                shadow_pass.draw_voxel_depth(
                    &self.cube,
                    0..amount,
                    &self.ctx.light.shadow_bind_group,
                );
            }
        }
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Voxel Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(instances) = instances {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_vertex_buffer(1, instances.slice(..));
                render_pass.draw_voxels_instanced(
                    &self.cube,
                    0..amount,
                    &self.ctx.camera.bind_group,
                    &self.ctx.light.bind_group,
                );
            }
        }
        self.ctx.queue.submit(iter::once(encoder.finish()));
    }

    /// Stop animating and release the scene's instance buffer. Idempotent.
    ///
    /// The device, surface and window are owned by the [`Context`] and are
    /// only released when the engine itself is dropped.
    pub fn cleanup(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.scene.unload();
        log::info!("Engine cleaned up");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.ctx
    }

    pub fn scene(&self) -> &VoxelScene<GpuInstances> {
        &self.scene
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.cleanup();
    }
}
