//! Application event loop.
//!
//! Owns the winit event loop and the [`Engine`] once it exists. The engine
//! cannot be built before the window is resumed, and on the web the GPU
//! device is only available asynchronously, so initialisation is a future:
//! blocked on by the tokio runtime natively, spawned on the browser's task
//! queue on wasm and handed back through the event loop proxy.
//!
//! # Lifecycle
//!
//! 1. `resumed` creates the window (the `canvas` element on the web)
//! 2. the context is created, the engine built and the scene loaded
//! 3. `RedrawRequested` renders a frame and requests the next one
//! 4. `CloseRequested` cleans the engine up and exits the loop

use std::{fmt::Debug, sync::Arc};

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    config::EngineConfig,
    context::Context,
    data_structures::voxel::Voxel,
    engine::{Engine, ObjectClickHandler},
    generator,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Produces the voxel sequence shown once the engine is ready.
pub type SceneSource = Box<dyn FnOnce() -> Vec<Voxel>>;

pub(crate) enum FlowEvent {
    #[allow(dead_code)]
    Initialized(Engine),
    #[allow(dead_code)]
    Failed(String),
}

impl Debug for FlowEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized(_) => f.write_str("Initialized"),
            Self::Failed(e) => f.debug_tuple("Failed").field(e).finish(),
        }
    }
}

/// Everything needed to build the engine, consumed on first resume.
struct Setup {
    config: EngineConfig,
    scene: SceneSource,
    on_object_click: ObjectClickHandler,
}

struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[allow(dead_code)]
    proxy: winit::event_loop::EventLoopProxy<FlowEvent>,
    // We use Option to `take()` it after use.
    setup: Option<Setup>,
    engine: Option<Engine>,
}

impl App {
    fn new(event_loop: &EventLoop<FlowEvent>, setup: Setup) -> anyhow::Result<Self> {
        let proxy = event_loop.create_proxy();
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime: tokio::runtime::Runtime::new()?,
            proxy,
            setup: Some(setup),
            engine: None,
        })
    }
}

async fn init_engine(window: Arc<Window>, setup: Setup) -> anyhow::Result<Engine> {
    let size = window.inner_size();
    let ctx = Context::new(window, &setup.config).await?;
    let mut engine = Engine::new(ctx, setup.config, setup.on_object_click);
    engine.handle_resize(size.width, size.height);
    engine.load_scene((setup.scene)());
    Ok(engine)
}

impl ApplicationHandler<FlowEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(setup) = self.setup.take() else {
            return;
        };

        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title("Voxel Diorama");

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            const CANVAS_ID: &str = "canvas";

            let window = web_sys::window().unwrap_throw();
            let document = window.document().unwrap_throw();
            let canvas = document.get_element_by_id(CANVAS_ID).unwrap_throw();
            let html_canvas_element = canvas.unchecked_into();
            window_attributes = window_attributes.with_canvas(Some(html_canvas_element));
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Unable to create a window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let init_future = init_engine(window, setup);

        #[cfg(not(target_arch = "wasm32"))]
        {
            match self.async_runtime.block_on(init_future) {
                Ok(engine) => self.engine = Some(engine),
                Err(e) => {
                    log::error!("Engine initialization failed: {:#}", e);
                    event_loop.exit();
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let event = match init_future.await {
                    Ok(engine) => FlowEvent::Initialized(engine),
                    Err(e) => FlowEvent::Failed(format!("{:#}", e)),
                };
                if proxy.send_event(event).is_err() {
                    log::error!("Event loop closed before the engine was initialized");
                }
            });
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: FlowEvent) {
        match event {
            // This is the message from our wasm `spawn_local`
            FlowEvent::Initialized(mut engine) => {
                let size = engine.context().window().inner_size();
                engine.handle_resize(size.width, size.height);
                self.engine = Some(engine);
            }
            FlowEvent::Failed(e) => {
                log::error!("Engine initialization failed: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let engine = match &mut self.engine {
            Some(engine) => engine,
            None => return,
        };

        engine.handle_window_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                engine.cleanup();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => engine.handle_resize(size.width, size.height),
            WindowEvent::RedrawRequested => match engine.frame() {
                Ok(_) => {}
                // Reconfigure the surface if it's lost or outdated
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let size = engine.context().window().inner_size();
                    engine.handle_resize(size.width, size.height);
                }
                Err(e) => {
                    log::error!("Unable to render {}", e);
                }
            },
            _ => {}
        }
    }
}

/// Open a window showing the generated room and run until it is closed.
///
/// `on_object_click` receives the group id of every clicked object.
pub fn run(on_object_click: impl FnMut(&str) + 'static) -> anyhow::Result<()> {
    run_with(
        EngineConfig::default(),
        Box::new(generator::generate_room),
        Box::new(on_object_click),
    )
}

pub fn run_with(
    config: EngineConfig,
    scene: SceneSource,
    on_object_click: ObjectClickHandler,
) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Could not initialize logger: {}", e).into());
        }
    }

    let event_loop: EventLoop<FlowEvent> = EventLoop::with_user_event().build()?;

    let mut app = App::new(
        &event_loop,
        Setup {
            config,
            scene,
            on_object_click,
        },
    )?;

    event_loop.run_app(&mut app)?;

    Ok(())
}

/// Name of the DOM event carrying clicked group ids to the page.
pub const OBJECT_CLICK_EVENT: &str = "voxel-object-click";

/// Forward a click to the page as a `CustomEvent` whose `detail` is the id.
#[cfg(target_arch = "wasm32")]
fn dispatch_object_click(id: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let init = web_sys::CustomEventInit::new();
    init.set_detail(&JsValue::from_str(id));
    match web_sys::CustomEvent::new_with_event_init_dict(OBJECT_CLICK_EVENT, &init) {
        Ok(event) => {
            if let Err(e) = window.dispatch_event(&event) {
                log::error!("Unable to dispatch {}: {:?}", OBJECT_CLICK_EVENT, e);
            }
        }
        Err(e) => log::error!("Unable to create {}: {:?}", OBJECT_CLICK_EVENT, e),
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn run_web() -> Result<(), JsValue> {
    run(dispatch_object_click).map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}
