use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::SceneConfig,
    error::NebulaError,
    gfx::RenderEngine,
    performance::PerformanceMonitor,
    world::{build_world, FrameDriver, ScrollReactor, Viewport, World},
};

pub struct NebulaApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    config: SceneConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    world: Option<World>,
    driver: FrameDriver,
    scroll: Option<ScrollReactor>,
    performance: PerformanceMonitor,
    error: Option<NebulaError>,
}

impl NebulaApp {
    pub fn new(config: SceneConfig) -> Result<Self, NebulaError> {
        let event_loop = EventLoop::new()?;
        let scroll = config.scroll_reactive.then(ScrollReactor::new);

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                world: None,
                driver: FrameDriver::new(),
                scroll,
                performance: PerformanceMonitor::new(),
                error: None,
            },
        })
    }

    /// Runs until the window is closed; returns the error that stopped it, if any
    pub fn run(mut self) -> Result<(), NebulaError> {
        if let Some(event_loop) = self.event_loop.take() {
            event_loop.set_control_flow(ControlFlow::Poll);
            event_loop.run_app(&mut self.app_state)?;
        }

        match self.app_state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), NebulaError> {
        let (width, height) = self.config.window_size;
        let window = event_loop.create_window(
            WindowAttributes::default()
                .with_title(self.config.title.clone())
                .with_inner_size(LogicalSize::new(width, height)),
        )?;
        let window_handle = Arc::new(window);
        self.window = Some(window_handle.clone());

        let PhysicalSize { width, height } = window_handle.inner_size();
        let viewport = Viewport::from_physical(width, height, window_handle.scale_factor());

        let vsync = self.config.vsync;
        let renderer = pollster::block_on(RenderEngine::new(
            window_handle.clone(),
            width,
            height,
            vsync,
        ))?;

        let world = build_world(&self.config, viewport, &mut rand::rng());

        log::info!(
            "Rendering {}x{} ({}x{} logical, pixel ratio {}), scroll reactor {}",
            width,
            height,
            viewport.width,
            viewport.height,
            viewport.pixel_ratio,
            if self.scroll.is_some() { "on" } else { "off" }
        );

        self.world = Some(world);
        self.render_engine = Some(renderer);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: NebulaError) {
        log::error!("{}", err);
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.start(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let (Some(render_engine), Some(world)) =
            (self.render_engine.as_mut(), self.world.as_mut())
        else {
            return;
        };

        world.controls.process_window_event(&event);

        match event {
            WindowEvent::KeyboardInput { event, .. } => match event {
                KeyEvent {
                    physical_key: PhysicalKey::Code(KeyCode::Escape),
                    ..
                } => event_loop.exit(),
                _ => world.controls.process_keyed_events(&event, &mut world.camera),
            },
            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(scroll) = self.scroll.as_mut() {
                    scroll.scroll_by(world, ScrollReactor::wheel_pixels(&delta));
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                world.resize(width, height);
                render_engine.resize(width, height);
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let resolved = world.scene.update();
                if !resolved.is_empty() {
                    log::debug!(
                        "{} texture(s) resolved, {} still loading",
                        resolved.len(),
                        world.scene.textures.pending_count()
                    );
                }

                let tick = self.driver.tick(world);
                if let Err(err) = render_engine.render_frame(&world.scene, &world.camera) {
                    log::error!("Frame {} failed", tick.index);
                    self.fail(event_loop, err.into());
                    return;
                }

                let drawn = world.scene.meshes().len();
                self.performance.record_frame();
                self.performance.update_render_stats(drawn as u32);
                self.performance.log_if_due();
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let Some(world) = self.world.as_mut() {
            world.controls.process_device_event(&event);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
