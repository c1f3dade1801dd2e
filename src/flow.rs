//! Application event loop.
//!
//! Bridges winit to the [`Scene`]: window events are translated to
//! [`InputEvent`]s and queued, and every `RedrawRequested` drains the queue,
//! draws one frame and asks for the next. The loop polls instead of waiting,
//! so it never stalls on input.
//!
//! Everything here runs on the thread that called [`run`], which is also the
//! only thread that ever touches the GPU context.

use std::sync::Arc;

use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    config::{EngineConfig, SceneDescription},
    context::Context,
    data_structures::object::RenderableObject,
    resources::texture::load_images,
    scene::{InputEvent, Scene, SceneState},
};

/// Maps a window event onto the scene's input vocabulary.
pub fn translate_window_event(event: &WindowEvent) -> InputEvent {
    match event {
        WindowEvent::CloseRequested | WindowEvent::Destroyed => InputEvent::Quit,
        WindowEvent::KeyboardInput { event, .. } => translate_key(event.state, event.physical_key),
        _ => InputEvent::Other,
    }
}

/// Key presses (OS repeats included) become `KeyDown`, releases are ignored.
pub fn translate_key(state: ElementState, key: PhysicalKey) -> InputEvent {
    match (state, key) {
        (ElementState::Pressed, PhysicalKey::Code(code)) => InputEvent::KeyDown(code),
        _ => InputEvent::Other,
    }
}

/// Counts presented frames and reports the rate once per interval.
pub struct FrameTimer {
    interval: Duration,
    since: Instant,
    frames: u32,
}

impl FrameTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            since: Instant::now(),
            frames: 0,
        }
    }

    /// Records a frame; returns frames per second when an interval has passed.
    pub fn tick(&mut self) -> Option<f32> {
        self.frames += 1;
        let elapsed = self.since.elapsed();
        if elapsed < self.interval {
            return None;
        }
        let fps = self.frames as f32 / elapsed.as_secs_f32();
        self.frames = 0;
        self.since = Instant::now();
        Some(fps)
    }
}

/// GPU context and the scene drawn with it.
pub struct AppState {
    pub(crate) ctx: Context,
    scene: Scene<Context>,
}

impl AppState {
    async fn new(
        window: Arc<Window>,
        config: &EngineConfig,
        description: &SceneDescription,
    ) -> anyhow::Result<Self> {
        let mut ctx = Context::new(window, config).await?;

        let texture_names: Vec<&str> = description
            .objects
            .iter()
            .map(|object| object.texture.as_str())
            .collect();
        let images = load_images(&texture_names).await?;

        let mut scene = Scene::new(config, &mut ctx);
        for (descriptor, image) in description.objects.iter().zip(images.iter()) {
            scene.add_object(RenderableObject::new(&mut ctx, descriptor, image));
            log::info!("loaded object textured with {}", descriptor.texture);
        }

        Ok(Self { ctx, scene })
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    config: EngineConfig,
    description: SceneDescription,
    state: Option<AppState>,
    pending: Vec<InputEvent>,
    timer: FrameTimer,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: EngineConfig, description: SceneDescription) -> anyhow::Result<Self> {
        Ok(Self {
            // setup only blocks on futures, the render thread stays the only thread
            async_runtime: tokio::runtime::Builder::new_current_thread().build()?,
            config,
            description,
            state: None,
            pending: Vec::new(),
            timer: FrameTimer::new(Duration::from_secs(5)),
            error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let window_attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height))
            .with_resizable(false);

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        let init = AppState::new(window, &self.config, &self.description);
        match self.async_runtime.block_on(init) {
            Ok(state) => {
                state.ctx.window().request_redraw();
                self.state = Some(state);
            }
            Err(e) => self.fail(event_loop, e.context("setting up the museum scene")),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(state) = &mut self.state else {
            return;
        };

        match event {
            WindowEvent::Resized(size) => state.ctx.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let events = std::mem::take(&mut self.pending);
                match state.scene.frame(events, &mut state.ctx) {
                    Ok(SceneState::Running) => {
                        if let Some(fps) = self.timer.tick() {
                            log::debug!("{fps:.1} frames per second");
                        }
                        // invoke main render loop
                        state.ctx.window().request_redraw();
                    }
                    Ok(SceneState::Stopped) => event_loop.exit(),
                    Err(e) => self.fail(event_loop, e),
                }
            }
            other => self.pending.push(translate_window_event(&other)),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // a quit must still be seen if no redraw is pending
        if let Some(state) = &self.state {
            if self.pending.contains(&InputEvent::Quit) {
                state.ctx.window().request_redraw();
            }
        }
    }
}

/// Opens the window, builds the scene from `description` and runs until quit.
///
/// Setup failures (window, GPU, texture decoding) end the loop and are
/// returned.
pub fn run(config: EngineConfig, description: SceneDescription) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, description)?;
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => {
            log::info!("scene stopped");
            Ok(())
        }
    }
}
