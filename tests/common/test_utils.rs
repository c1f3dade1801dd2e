use digital_museum::{
    config::EngineConfig,
    data_structures::{
        mesh::{CubeNormal, CubeVertex},
        object::{ObjectDescriptor, RenderableObject},
    },
    math::Matrix4,
    render::{ClearColour, RenderBackend},
};

/// One call made against the backend, in order.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    UploadGeometry { id: usize, vertices: usize, normals: usize },
    UploadTexture { id: usize, width: u32, height: u32 },
    WriteModel { geometry: usize, model: Matrix4 },
    WriteProjection(Matrix4),
    WriteLightPosition([f32; 3]),
    BindTexture { unit: u32, texture: usize },
    Clear(ClearColour),
    Draw { geometry: usize, vertex_count: u32 },
    Present,
}

/// A backend that keeps every call and the uploaded mesh data.
#[derive(Default)]
pub(crate) struct RecordingBackend {
    pub(crate) calls: Vec<Call>,
    pub(crate) vertices: Vec<Vec<CubeVertex>>,
    pub(crate) normals: Vec<Vec<CubeNormal>>,
    textures: usize,
}

impl RecordingBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn last_projection(&self) -> Option<Matrix4> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::WriteProjection(m) => Some(*m),
            _ => None,
        })
    }

    pub(crate) fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| matches(call)).count()
    }

    pub(crate) fn reset(&mut self) {
        self.calls.clear();
    }
}

impl RenderBackend for RecordingBackend {
    type Geometry = usize;
    type Texture = usize;

    fn upload_geometry(&mut self, _: &str, vertices: &[CubeVertex], normals: &[CubeNormal]) -> usize {
        let id = self.vertices.len();
        self.vertices.push(vertices.to_vec());
        self.normals.push(normals.to_vec());
        self.calls.push(Call::UploadGeometry {
            id,
            vertices: vertices.len(),
            normals: normals.len(),
        });
        id
    }

    fn upload_texture(&mut self, _: &str, image: &image::RgbaImage) -> usize {
        let id = self.textures;
        self.textures += 1;
        self.calls.push(Call::UploadTexture {
            id,
            width: image.width(),
            height: image.height(),
        });
        id
    }

    fn write_model(&mut self, geometry: &usize, model: &Matrix4) {
        self.calls.push(Call::WriteModel {
            geometry: *geometry,
            model: *model,
        });
    }

    fn write_projection(&mut self, projection: &Matrix4) {
        self.calls.push(Call::WriteProjection(*projection));
    }

    fn write_light_position(&mut self, position: [f32; 3]) {
        self.calls.push(Call::WriteLightPosition(position));
    }

    fn bind_texture(&mut self, unit: u32, texture: &usize) {
        self.calls.push(Call::BindTexture {
            unit,
            texture: *texture,
        });
    }

    fn clear(&mut self, colour: ClearColour) {
        self.calls.push(Call::Clear(colour));
    }

    fn draw(&mut self, geometry: &usize, vertex_count: u32) {
        self.calls.push(Call::Draw {
            geometry: *geometry,
            vertex_count,
        });
    }

    fn present(&mut self) -> anyhow::Result<()> {
        self.calls.push(Call::Present);
        Ok(())
    }
}

pub(crate) fn descriptor(angular_velocity: [f32; 3]) -> ObjectDescriptor {
    ObjectDescriptor {
        position: [1.0, 2.0, 3.0],
        angles: [10.0, 20.0, 30.0],
        scale: [2.0, 2.0, 2.0],
        angular_velocity,
        texture: "textures/walls/white.png".to_string(),
    }
}

pub(crate) fn cube(gpu: &mut RecordingBackend, angular_velocity: [f32; 3]) -> RenderableObject<RecordingBackend> {
    let image = image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 255, 255, 255]));
    RenderableObject::new(gpu, &descriptor(angular_velocity), &image)
}

pub(crate) fn config() -> EngineConfig {
    EngineConfig::default()
}
