//! Engine settings and the static scene description.

use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;
use winit::keyboard::KeyCode;

use crate::{data_structures::object::ObjectDescriptor, render::ClearColour};

/// Window, camera and input settings.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub clear_colour: ClearColour,
    pub light_position: [f32; 3],
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub rotate_left: KeyCode,
    pub rotate_right: KeyCode,
}

impl EngineConfig {
    /// Width over height of the fixed window.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "Digital Museum".to_string(),
            width: 800,
            height: 600,
            clear_colour: ClearColour::BLACK,
            light_position: [0.0, 5.0, 0.0],
            fov_degrees: 90.0,
            near: 0.1,
            far: 10.0,
            rotate_left: KeyCode::KeyA,
            rotate_right: KeyCode::KeyD,
        }
    }
}

/// The objects a scene starts with, in draw order.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SceneDescription {
    pub objects: Vec<ObjectDescriptor>,
}

impl SceneDescription {
    pub fn from_ron_str(source: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(source)?)
    }

    /// Reads and parses a RON scene file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("reading scene description {}", path.display()))?;
        Self::from_ron_str(&source)
            .with_context(|| format!("parsing scene description {}", path.display()))
    }
}
