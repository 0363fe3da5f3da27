//! Seams between the scene and whatever actually talks to the GPU.

use crate::{
    math::{Mat4, Vec3},
    object_3d_loader::texture_loader::TextureImage,
};

/// Handle to a GPU vertex buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u64);

/// Handle to a GPU texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Resource creation and draw submission.
pub trait GraphicsDevice {
    fn create_vertex_buffer(&mut self, data: &[f32]) -> BufferHandle;
    fn create_texture(&mut self, image: &TextureImage) -> TextureHandle;
    /// Draws `vertex_count` vertices from the currently bound attributes as a triangle list.
    fn draw_triangles(&mut self, vertex_count: usize);
}

/// A linked Phong program. Stride and offset are in bytes.
pub trait Shader {
    fn set_array_buffer(
        &mut self,
        name: &str,
        buffer: BufferHandle,
        components: usize,
        stride: usize,
        offset: usize,
    );
    fn set_uniform_mat4(&mut self, name: &str, value: &Mat4);
    fn set_uniform_vec3(&mut self, name: &str, value: Vec3);
    fn set_uniform_f32(&mut self, name: &str, value: f32);
    fn set_uniform_i32(&mut self, name: &str, value: i32);
    fn set_texture(&mut self, name: &str, unit: u32, texture: TextureHandle);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawOptions {
    /// Bind the averaged normals instead of the per-face ones.
    pub smooth_shading: bool,
    /// Viewport width over height.
    pub aspect_ratio: f32,
}

impl Default for DrawOptions {
    fn default() -> DrawOptions {
        DrawOptions {
            smooth_shading: false,
            aspect_ratio: 1.0,
        }
    }
}
