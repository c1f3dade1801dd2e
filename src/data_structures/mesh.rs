//! The fixed cube mesh every museum piece is drawn with.
//!
//! 6 faces x 2 triangles x 3 vertices = 36 vertices, each carrying a position
//! and a texture coordinate. Normals live in a parallel array of equal length
//! (one constant normal per face) and are uploaded to their own vertex buffer.

/// Number of vertices drawn per cube.
pub const CUBE_VERTEX_COUNT: usize = 36;

/// Describes how a vertex type is laid out in a GPU vertex buffer.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// Interleaved position + texture coordinate.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

/// Per-vertex normal, stored in a separate buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeNormal {
    pub normal: [f32; 3],
}

impl Vertex for CubeVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<CubeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

impl Vertex for CubeNormal {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeNormal>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

/// The six canonical outward face normals, in face order: front, back, left, right, bottom, top.
pub const FACE_NORMALS: [[f32; 3]; 6] = [
    [0.0, 0.0, -1.0],
    [0.0, 0.0, 1.0],
    [-1.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 1.0, 0.0],
];

// (x, y, z, u, v) per vertex, two triangles per face in FACE_NORMALS order.
#[rustfmt::skip]
const CUBE_DATA: [[f32; 5]; CUBE_VERTEX_COUNT] = [
    // front
    [-0.5, -0.5, -0.5, 0.0, 0.0],
    [ 0.5, -0.5, -0.5, 1.0, 0.0],
    [ 0.5,  0.5, -0.5, 1.0, 1.0],
    [ 0.5,  0.5, -0.5, 1.0, 1.0],
    [-0.5,  0.5, -0.5, 0.0, 1.0],
    [-0.5, -0.5, -0.5, 0.0, 0.0],
    // back
    [-0.5, -0.5,  0.5, 1.0, 0.0],
    [ 0.5, -0.5,  0.5, 0.0, 0.0],
    [ 0.5,  0.5,  0.5, 0.0, 1.0],
    [ 0.5,  0.5,  0.5, 0.0, 1.0],
    [-0.5,  0.5,  0.5, 1.0, 1.0],
    [-0.5, -0.5,  0.5, 1.0, 0.0],
    // left
    [-0.5, -0.5, -0.5, 0.0, 0.0],
    [-0.5, -0.5,  0.5, 1.0, 0.0],
    [-0.5,  0.5,  0.5, 1.0, 1.0],
    [-0.5,  0.5,  0.5, 1.0, 1.0],
    [-0.5,  0.5, -0.5, 0.0, 1.0],
    [-0.5, -0.5, -0.5, 0.0, 0.0],
    // right
    [ 0.5, -0.5, -0.5, 1.0, 0.0],
    [ 0.5, -0.5,  0.5, 0.0, 0.0],
    [ 0.5,  0.5,  0.5, 0.0, 1.0],
    [ 0.5,  0.5,  0.5, 0.0, 1.0],
    [ 0.5,  0.5, -0.5, 1.0, 1.0],
    [ 0.5, -0.5, -0.5, 1.0, 0.0],
    // bottom
    [-0.5, -0.5,  0.5, 0.0, 1.0],
    [ 0.5, -0.5,  0.5, 1.0, 1.0],
    [ 0.5, -0.5, -0.5, 1.0, 0.0],
    [ 0.5, -0.5, -0.5, 1.0, 0.0],
    [-0.5, -0.5, -0.5, 0.0, 0.0],
    [-0.5, -0.5,  0.5, 0.0, 1.0],
    // top
    [-0.5,  0.5,  0.5, 0.0, 0.0],
    [ 0.5,  0.5,  0.5, 1.0, 0.0],
    [ 0.5,  0.5, -0.5, 1.0, 1.0],
    [ 0.5,  0.5, -0.5, 1.0, 1.0],
    [-0.5,  0.5, -0.5, 0.0, 1.0],
    [-0.5,  0.5,  0.5, 0.0, 0.0],
];

/// CPU-side cube geometry, built once per object and uploaded once.
#[derive(Clone, Debug, PartialEq)]
pub struct CubeMesh {
    pub vertices: Vec<CubeVertex>,
    pub normals: Vec<CubeNormal>,
}

impl CubeMesh {
    pub fn new() -> Self {
        let vertices = CUBE_DATA
            .iter()
            .map(|v| CubeVertex {
                position: [v[0], v[1], v[2]],
                tex_coords: [v[3], v[4]],
            })
            .collect();
        // each face contributes six vertices sharing one normal
        let normals = FACE_NORMALS
            .iter()
            .flat_map(|&normal| std::iter::repeat_n(CubeNormal { normal }, 6))
            .collect();
        Self { vertices, normals }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }
}

impl Default for CubeMesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_vertex_sits_on_the_face_its_normal_points_out_of() {
        let mesh = CubeMesh::new();
        assert_eq!(mesh.vertices.len(), CUBE_VERTEX_COUNT);
        assert_eq!(mesh.normals.len(), CUBE_VERTEX_COUNT);
        for (vertex, normal) in mesh.vertices.iter().zip(&mesh.normals) {
            let along: f32 = (0..3).map(|i| vertex.position[i] * normal.normal[i]).sum();
            assert_eq!(along, 0.5);
        }
    }

    #[test]
    fn each_face_is_two_triangles_closing_a_quad() {
        let mesh = CubeMesh::new();
        for face in mesh.vertices.chunks(6) {
            // first and second triangle meet at the shared diagonal
            assert_eq!(face[2], face[3]);
            assert_eq!(face[0], face[5]);
        }
    }
}
