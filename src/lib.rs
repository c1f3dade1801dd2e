//! digital-museum
//!
//! A minimal real-time renderer for a static "museum" of textured cubes. The
//! camera sits in the middle of the room and turns left and right on key
//! presses; every object spins by its own angular velocity each frame.
//!
//! All transforms are built by hand in [`math`] as plain `[[f32; 4]; 4]`
//! arrays. The GPU is reached through the [`render::RenderBackend`] seam,
//! implemented for wgpu by [`context::Context`].
//!
//! High-level modules
//! - `math`: identity, scale, rotation, translation and perspective matrices
//! - `camera`: yaw camera folding its rotation into the projection uniform
//! - `config`: engine settings and the RON scene description
//! - `context`: the wgpu device, surface and pipeline behind the render seam
//! - `data_structures`: cube mesh, textures and renderable objects
//! - `flow`: the winit event loop and [`flow::run`]
//! - `pipelines`: the museum render pipeline and its bind group layouts
//! - `render`: the render backend trait and shader uniform names
//! - `resources`: asset loading and image decoding
//! - `scene`: the object list, input handling and the per-frame cycle
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod math;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::Vector3;
pub use winit::keyboard::KeyCode;
