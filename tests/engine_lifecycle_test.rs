#[cfg(feature = "integration-tests")]
use std::sync::Arc;

#[cfg(feature = "integration-tests")]
use voxel_diorama::{
    config::EngineConfig, context::Context, engine::Engine, generator,
};
#[cfg(feature = "integration-tests")]
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

#[cfg(feature = "integration-tests")]
#[derive(Debug, Default)]
struct Observed {
    width_before: u32,
    width_after: u32,
    loaded_after_cleanup: bool,
    frame_ok: bool,
    loaded_after_reload: bool,
}

#[cfg(feature = "integration-tests")]
struct Lifecycle {
    runtime: tokio::runtime::Runtime,
    observed: Option<anyhow::Result<Observed>>,
}

#[cfg(feature = "integration-tests")]
impl Lifecycle {
    fn run(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Observed> {
        let attributes = Window::default_attributes()
            .with_title("lifecycle")
            .with_visible(false);
        let window = Arc::new(event_loop.create_window(attributes)?);
        let config = EngineConfig::default();
        let ctx = self.runtime.block_on(Context::new(window, &config))?;

        let mut engine = Engine::new(ctx, config, Box::new(|id: &str| log::info!("clicked {}", id)));
        engine.handle_resize(320, 240);
        engine.load_scene(generator::generate_room());
        anyhow::ensure!(engine.scene().is_loaded(), "scene did not load");

        engine.cleanup();
        let loaded_after_cleanup = engine.scene().is_loaded();
        let width_before = engine.context().config.width;
        engine.handle_resize(640, 480);
        let width_after = engine.context().config.width;
        let frame_ok = engine.frame().is_ok();
        engine.load_scene(generator::generate_room());
        // a second cleanup is harmless
        engine.cleanup();

        Ok(Observed {
            width_before,
            width_after,
            loaded_after_cleanup,
            frame_ok,
            loaded_after_reload: engine.scene().is_loaded(),
        })
    }
}

#[cfg(feature = "integration-tests")]
impl ApplicationHandler for Lifecycle {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.observed.is_none() {
            self.observed = Some(self.run(event_loop));
        }
        event_loop.exit();
    }

    fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, _: WindowEvent) {}
}

#[test]
#[cfg(feature = "integration-tests")]
fn cleaned_up_engine_ignores_resizes_and_loads() {
    let mut builder = EventLoop::builder();
    #[cfg(target_os = "linux")]
    winit::platform::x11::EventLoopBuilderExtX11::with_any_thread(&mut builder, true);
    let event_loop = builder.build().expect("event loop");

    let mut app = Lifecycle {
        runtime: tokio::runtime::Runtime::new().expect("tokio runtime"),
        observed: None,
    };
    event_loop.run_app(&mut app).expect("event loop run");

    let observed = app
        .observed
        .expect("the loop never resumed")
        .expect("engine setup failed");
    assert_eq!(observed.width_before, 320);
    assert_eq!(observed.width_after, 320);
    assert!(!observed.loaded_after_cleanup);
    assert!(observed.frame_ok);
    assert!(!observed.loaded_after_reload);
}
