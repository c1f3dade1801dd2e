//! Textured cubes placed in the scene.

use cgmath::Vector3;
use serde::Deserialize;

use crate::{
    data_structures::mesh::CubeMesh,
    math::{self, Matrix4},
    render::{IMAGE_TEXTURE_UNIT, RenderBackend},
};

/// The five fields an object is built from.
///
/// This is the schema of one entry in a scene description file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ObjectDescriptor {
    pub position: [f32; 3],
    pub angles: [f32; 3],
    pub scale: [f32; 3],
    #[serde(default)]
    pub angular_velocity: [f32; 3],
    /// Image path relative to the asset directory.
    pub texture: String,
}

/// A cube with its own GPU buffers, texture and transform state.
///
/// Only the Euler angles change after construction; they advance by the
/// angular velocity once per [`update`](Self::update).
pub struct RenderableObject<B: RenderBackend> {
    position: Vector3<f32>,
    angles: Vector3<f32>,
    scale: Vector3<f32>,
    angular_velocity: Vector3<f32>,
    vertex_count: u32,
    geometry: B::Geometry,
    texture: B::Texture,
}

impl<B: RenderBackend> RenderableObject<B> {
    /// Builds the cube mesh, uploads it and uploads the already decoded image.
    pub fn new(gpu: &mut B, descriptor: &ObjectDescriptor, image: &image::RgbaImage) -> Self {
        let mesh = CubeMesh::new();
        let geometry = gpu.upload_geometry(&descriptor.texture, &mesh.vertices, &mesh.normals);
        let texture = gpu.upload_texture(&descriptor.texture, image);

        Self {
            position: descriptor.position.into(),
            angles: descriptor.angles.into(),
            scale: descriptor.scale.into(),
            angular_velocity: descriptor.angular_velocity.into(),
            vertex_count: mesh.vertex_count(),
            geometry,
            texture,
        }
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn angles(&self) -> Vector3<f32> {
        self.angles
    }

    pub fn scale(&self) -> Vector3<f32> {
        self.scale
    }

    pub fn angular_velocity(&self) -> Vector3<f32> {
        self.angular_velocity
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Advances the orientation by one frame's worth of angular velocity.
    pub fn update(&mut self) {
        self.update_by(self.angular_velocity);
    }

    /// Adds `delta_angles` (degrees) to the Euler angles.
    pub fn update_by(&mut self, delta_angles: Vector3<f32>) {
        self.angles += delta_angles;
    }

    /// `identity · scale · rotation · translation` from the current state.
    pub fn model_matrix(&self) -> Matrix4 {
        math::model_matrix(self.position, self.angles, self.scale)
    }

    /// Uploads the model matrix, binds this object's texture and draws it.
    ///
    /// All objects share [`IMAGE_TEXTURE_UNIT`], so the bind has to happen
    /// right before the draw.
    pub fn render(&self, gpu: &mut B) {
        gpu.write_model(&self.geometry, &self.model_matrix());
        gpu.bind_texture(IMAGE_TEXTURE_UNIT, &self.texture);
        gpu.draw(&self.geometry, self.vertex_count);
    }
}
