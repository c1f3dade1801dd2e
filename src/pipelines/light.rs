use wgpu::util::DeviceExt;

use crate::render::Uniform;

/// The fixed point light, bound as `lightPos`.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    _padding: u32,
}

impl LightUniform {
    pub fn new(position: [f32; 3]) -> Self {
        Self {
            position,
            _padding: 0,
        }
    }
}

pub fn mk_buffer(device: &wgpu::Device, light_uniform: LightUniform) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(Uniform::LightPos.name()),
        contents: bytemuck::cast_slice(&[light_uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_uniform_is_padded_to_sixteen_bytes() {
        assert_eq!(std::mem::size_of::<LightUniform>(), 16);
        let uniform = LightUniform::new([0.0, 5.0, 0.0]);
        let raw: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&uniform));
        assert_eq!(&raw[..3], &[0.0, 5.0, 0.0]);
    }
}
