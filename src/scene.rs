//! The scene and its two-state render loop.
//!
//! A [`Scene`] owns the camera and the object list and drives one frame at a
//! time against a [`RenderBackend`]:
//!
//! 1. drain pending input (quit stops the scene, bound keys turn the camera)
//! 2. clear colour and depth
//! 3. update and render every object in insertion order
//! 4. re-apply the camera transform
//! 5. present
//!
//! The platform layer decides when frames happen; see [`crate::flow`].

use winit::keyboard::KeyCode;

use crate::{
    camera::{Camera, Direction},
    config::EngineConfig,
    data_structures::object::RenderableObject,
    render::{ClearColour, RenderBackend},
};

/// Platform input reduced to what the scene reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(KeyCode),
    Other,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SceneState {
    Running,
    /// Terminal. No further frames are drawn.
    Stopped,
}

pub struct Scene<B: RenderBackend> {
    objects: Vec<RenderableObject<B>>,
    camera: Camera,
    state: SceneState,
    clear_colour: ClearColour,
    rotate_left: KeyCode,
    rotate_right: KeyCode,
}

impl<B: RenderBackend> Scene<B> {
    /// Builds the camera from `config` and writes the setup-time uniforms.
    pub fn new(config: &EngineConfig, gpu: &mut B) -> Self {
        let camera = Camera::new(config.fov_degrees, config.aspect_ratio(), config.near, config.far);
        gpu.write_light_position(config.light_position);
        camera.apply_to_shader(gpu);
        log::info!("scene running");

        Self {
            objects: Vec::new(),
            camera,
            state: SceneState::Running,
            clear_colour: config.clear_colour,
            rotate_left: config.rotate_left,
            rotate_right: config.rotate_right,
        }
    }

    /// Appends an object. Objects are never removed.
    pub fn add_object(&mut self, object: RenderableObject<B>) {
        self.objects.push(object);
    }

    pub fn objects(&self) -> &[RenderableObject<B>] {
        &self.objects
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SceneState::Running
    }

    /// Applies one input event. Unbound keys and other events are ignored.
    pub fn handle_event(&mut self, event: InputEvent, gpu: &mut B) {
        if !self.is_running() {
            return;
        }
        match event {
            InputEvent::Quit => {
                log::info!("quit requested, stopping scene");
                self.state = SceneState::Stopped;
            }
            InputEvent::KeyDown(key) if key == self.rotate_left => {
                self.camera.rotate(Direction::Left, gpu)
            }
            InputEvent::KeyDown(key) if key == self.rotate_right => {
                self.camera.rotate(Direction::Right, gpu)
            }
            InputEvent::KeyDown(_) | InputEvent::Other => (),
        }
    }

    /// Clears, updates and draws every object, then re-applies the camera.
    ///
    /// Does not present; the caller swaps buffers once the frame is built.
    pub fn display(&mut self, gpu: &mut B) {
        gpu.clear(self.clear_colour);
        for object in self.objects.iter_mut() {
            object.update();
            object.render(gpu);
        }
        self.camera.apply_to_shader(gpu);
    }

    /// Runs one loop iteration: drains `events`, then draws and presents.
    ///
    /// Returns the state after the iteration. A stopped scene draws nothing.
    pub fn frame(
        &mut self,
        events: impl IntoIterator<Item = InputEvent>,
        gpu: &mut B,
    ) -> anyhow::Result<SceneState> {
        for event in events {
            self.handle_event(event, gpu);
        }
        if self.is_running() {
            self.display(gpu);
            gpu.present()?;
        }
        Ok(self.state)
    }
}
