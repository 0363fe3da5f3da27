//! Recording implementations of the draw seams, for dry runs and tests.

use crate::{
    math::{Mat4, Vec3},
    object_3d_loader::texture_loader::TextureImage,
};

use super::draw_system::{BufferHandle, GraphicsDevice, Shader, TextureHandle};

/// Hands out sequential handles and remembers what was created and drawn.
#[derive(Debug, Default)]
pub struct HeadlessDevice {
    next_handle: u64,
    /// Float count of each created vertex buffer.
    pub buffers: Vec<(BufferHandle, usize)>,
    pub textures: Vec<(TextureHandle, u32, u32)>,
    /// Vertex count of each draw call.
    pub draws: Vec<usize>,
}

impl HeadlessDevice {
    pub fn new() -> HeadlessDevice {
        HeadlessDevice::default()
    }

    fn allocate(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl GraphicsDevice for HeadlessDevice {
    fn create_vertex_buffer(&mut self, data: &[f32]) -> BufferHandle {
        let handle = BufferHandle(self.allocate());
        self.buffers.push((handle, data.len()));
        handle
    }

    fn create_texture(&mut self, image: &TextureImage) -> TextureHandle {
        let handle = TextureHandle(self.allocate());
        self.textures.push((handle, image.width, image.height));
        handle
    }

    fn draw_triangles(&mut self, vertex_count: usize) {
        self.draws.push(vertex_count);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ShaderCall {
    ArrayBuffer {
        name: String,
        buffer: BufferHandle,
        components: usize,
        stride: usize,
        offset: usize,
    },
    Mat4(String, Mat4),
    Vec3(String, Vec3),
    F32(String, f32),
    I32(String, i32),
    Texture(String, u32, TextureHandle),
}

/// Logs every call in order.
#[derive(Debug, Default)]
pub struct RecordingShader {
    pub calls: Vec<ShaderCall>,
}

impl RecordingShader {
    pub fn new() -> RecordingShader {
        RecordingShader::default()
    }

    pub fn last_i32(&self, uniform: &str) -> Option<i32> {
        self.calls.iter().rev().find_map(|call| match call {
            ShaderCall::I32(name, value) if name == uniform => Some(*value),
            _ => None,
        })
    }

    pub fn last_vec3(&self, uniform: &str) -> Option<Vec3> {
        self.calls.iter().rev().find_map(|call| match call {
            ShaderCall::Vec3(name, value) if name == uniform => Some(*value),
            _ => None,
        })
    }

    pub fn last_mat4(&self, uniform: &str) -> Option<Mat4> {
        self.calls.iter().rev().find_map(|call| match call {
            ShaderCall::Mat4(name, value) if name == uniform => Some(*value),
            _ => None,
        })
    }

    /// `(stride, offset)` of the last binding of attribute `attribute`.
    pub fn attribute(&self, attribute: &str) -> Option<(usize, usize)> {
        self.calls.iter().rev().find_map(|call| match call {
            ShaderCall::ArrayBuffer {
                name,
                stride,
                offset,
                ..
            } if name == attribute => Some((*stride, *offset)),
            _ => None,
        })
    }
}

impl Shader for RecordingShader {
    fn set_array_buffer(
        &mut self,
        name: &str,
        buffer: BufferHandle,
        components: usize,
        stride: usize,
        offset: usize,
    ) {
        self.calls.push(ShaderCall::ArrayBuffer {
            name: name.to_owned(),
            buffer,
            components,
            stride,
            offset,
        });
    }

    fn set_uniform_mat4(&mut self, name: &str, value: &Mat4) {
        self.calls.push(ShaderCall::Mat4(name.to_owned(), *value));
    }

    fn set_uniform_vec3(&mut self, name: &str, value: Vec3) {
        self.calls.push(ShaderCall::Vec3(name.to_owned(), value));
    }

    fn set_uniform_f32(&mut self, name: &str, value: f32) {
        self.calls.push(ShaderCall::F32(name.to_owned(), value));
    }

    fn set_uniform_i32(&mut self, name: &str, value: i32) {
        self.calls.push(ShaderCall::I32(name.to_owned(), value));
    }

    fn set_texture(&mut self, name: &str, unit: u32, texture: TextureHandle) {
        self.calls.push(ShaderCall::Texture(name.to_owned(), unit, texture));
    }
}
