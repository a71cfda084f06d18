use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    gfx::{
        camera::{CameraController, OrbitCamera, OrbitCameraConfig},
        rendering::RenderEngine,
        timer::FixedRateTimer,
    },
    model::Model,
};

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub title: String,
    pub target_fps: f32,
    pub camera: OrbitCameraConfig,
    /// Uniform scale applied to the model before viewing
    pub model_scale: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "cubist".to_string(),
            target_fps: 60.0,
            camera: OrbitCameraConfig::default(),
            model_scale: 0.3,
        }
    }
}

pub struct CubistApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    config: ViewerConfig,
    model: Model,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    camera: OrbitCamera,
    controller: CameraController,
    timer: FixedRateTimer,
    error: Option<anyhow::Error>,
}

impl CubistApp {
    /// The model is decoded and validated by the caller; nothing is parsed
    /// once the loop runs.
    pub fn new(model: Model, config: ViewerConfig) -> Result<Self> {
        let event_loop = EventLoop::new().context("Failed to create event loop")?;
        let timer = FixedRateTimer::new(config.target_fps)?;
        let camera = OrbitCamera::new(config.camera, 1.0);

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                config,
                model,
                window: None,
                render_engine: None,
                camera,
                controller: CameraController::new(),
                timer,
                error: None,
            },
        })
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) -> Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .ok_or_else(|| anyhow!("Event loop already consumed"))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .context("Failed to run event loop")?;

        match self.app_state.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn create_renderer(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = event_loop
            .create_window(
                WindowAttributes::default()
                    .with_title(self.config.title.clone())
                    .with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
            )
            .context("Failed to create window")?;
        let window_handle = Arc::new(window);

        let PhysicalSize { width, height } = window_handle.inner_size();
        self.camera.resize_projection(width, height);

        let renderer = pollster::block_on(RenderEngine::new(
            window_handle.clone(),
            width,
            height,
            &self.model,
            self.config.model_scale,
        ))?;

        info!("Window created ({width}x{height})");
        self.window = Some(window_handle);
        self.render_engine = Some(renderer);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(render_engine)) = (self.window.as_ref(), self.render_engine.as_mut())
        else {
            return;
        };

        self.timer.start_frame();

        self.camera.update(
            self.controller.states(),
            window.inner_size(),
            self.timer.delta_time(),
        );
        render_engine.update(self.camera.uniform);

        match render_engine.render_frame() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_engine.reconfigure()
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("Surface out of memory");
                event_loop.exit();
            }
            Err(e) => warn!("Dropped frame: {e}"),
        }

        self.timer.end_frame();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create_renderer(event_loop) {
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            }
            | WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.camera.resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            event => {
                self.controller.process_window_event(&event);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
