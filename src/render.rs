//! The GPU context seam.
//!
//! [`RenderBackend`] is the explicit stand-in for the graphics API's implicit
//! global state: bound texture unit, uniform values, the frame being built.
//! Exactly one backend exists per window and it is only ever touched from the
//! thread that owns the event loop, so every operation takes `&mut self`.
//!
//! The four shader inputs form a fixed contract with `pipelines/museum.wgsl`,
//! see [`Uniform`].

use crate::{
    data_structures::mesh::{CubeNormal, CubeVertex},
    math::Matrix4,
};

/// Texture unit every object binds its image to before drawing.
pub const IMAGE_TEXTURE_UNIT: u32 = 0;

/// The named shader inputs this renderer writes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Uniform {
    /// Combined camera yaw and perspective projection.
    Projection,
    /// Per-object model matrix.
    Model,
    /// Sampler bound to [`IMAGE_TEXTURE_UNIT`].
    ImageTexture,
    /// World-space position of the single point light.
    LightPos,
}

impl Uniform {
    pub const ALL: [Uniform; 4] = [
        Uniform::Projection,
        Uniform::Model,
        Uniform::ImageTexture,
        Uniform::LightPos,
    ];

    /// The identifier used for this input in the shader source.
    pub fn name(&self) -> &'static str {
        match self {
            Uniform::Projection => "projection",
            Uniform::Model => "model",
            Uniform::ImageTexture => "imageTexture",
            Uniform::LightPos => "lightPos",
        }
    }

    /// How the input is declared in WGSL, up to the type annotation.
    pub fn declaration(&self) -> String {
        match self {
            Uniform::ImageTexture => format!("var {}:", self.name()),
            _ => format!("var<uniform> {}:", self.name()),
        }
    }
}

/// RGBA clear colour with components in `0.0..=1.0`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClearColour {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl ClearColour {
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
}

impl From<ClearColour> for wgpu::Color {
    fn from(c: ClearColour) -> Self {
        wgpu::Color {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Operations the scene needs from the graphics context.
///
/// A frame is `clear`, any number of `write_model`/`bind_texture`/`draw`
/// triples, uniform writes, then `present`. Handles returned by the upload
/// methods are owned by the object that requested them.
pub trait RenderBackend {
    /// Static vertex + normal buffers and the per-object model uniform.
    type Geometry;
    /// A sampled 2D image texture.
    type Texture;

    /// Uploads the mesh once. The buffers are never rewritten.
    fn upload_geometry(
        &mut self,
        label: &str,
        vertices: &[CubeVertex],
        normals: &[CubeNormal],
    ) -> Self::Geometry;

    /// Uploads a decoded image with linear filtering and repeat addressing.
    fn upload_texture(&mut self, label: &str, image: &image::RgbaImage) -> Self::Texture;

    /// Writes the `model` uniform for the given geometry.
    fn write_model(&mut self, geometry: &Self::Geometry, model: &Matrix4);

    /// Writes the `projection` uniform.
    fn write_projection(&mut self, projection: &Matrix4);

    /// Writes the `lightPos` uniform.
    fn write_light_position(&mut self, position: [f32; 3]);

    /// Makes `texture` the image sampled from `unit` by subsequent draws.
    fn bind_texture(&mut self, unit: u32, texture: &Self::Texture);

    /// Starts a frame that clears colour and depth.
    fn clear(&mut self, colour: ClearColour);

    /// Draws `vertex_count` vertices of `geometry` as a triangle list.
    fn draw(&mut self, geometry: &Self::Geometry, vertex_count: u32);

    /// Submits the frame and swaps it onto the display.
    fn present(&mut self) -> anyhow::Result<()>;
}
