use std::path::PathBuf;

use crate::{
    math::{transform_point, Mat4, Vec3},
    object_3d_loader::{
        mesh_converters::ConvertedMesh,
        texture_loader::{TextureImage, TextureSlot},
    },
    system::draw_system::{BufferHandle, TextureHandle},
};

use super::{material::Material, mesh::VertexRecord};

/// Renderable payload of an object node.
///
/// `vertices` never changes after construction. Texture state moves from "requested" to
/// "loaded" only when the image loader reports success.
#[derive(Clone, Debug)]
pub struct Object3D {
    vertices: Vec<VertexRecord>,
    pub material: Material,
    pub texture_path: Option<PathBuf>,
    pub normal_map_path: Option<PathBuf>,
    pub has_texture: bool,
    pub has_normal_map: bool,
    pub(crate) texture_image: Option<TextureImage>,
    pub(crate) normal_map_image: Option<TextureImage>,
    pub(crate) gpu_buffer: Option<BufferHandle>,
    pub(crate) texture_handle: Option<TextureHandle>,
    pub(crate) normal_map_handle: Option<TextureHandle>,
}

impl Object3D {
    pub fn new(vertices: Vec<VertexRecord>, material: Material) -> Object3D {
        Object3D {
            vertices,
            material,
            texture_path: None,
            normal_map_path: None,
            has_texture: false,
            has_normal_map: false,
            texture_image: None,
            normal_map_image: None,
            gpu_buffer: None,
            texture_handle: None,
            normal_map_handle: None,
        }
    }

    pub fn from_converted(mesh: ConvertedMesh) -> Object3D {
        let mut object = Object3D::new(mesh.vertices, mesh.material);
        object.texture_path = mesh.texture_path;
        object.normal_map_path = mesh.normal_map_path;
        object
    }

    pub fn vertices(&self) -> &[VertexRecord] {
        &self.vertices
    }

    /// The interleaved buffer as flat floats, 20 per corner.
    pub fn vertex_buffer(&self) -> &[f32] {
        VertexRecord::as_floats(&self.vertices)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn gpu_buffer(&self) -> Option<BufferHandle> {
        self.gpu_buffer
    }

    pub fn texture_image(&self) -> Option<&TextureImage> {
        self.texture_image.as_ref()
    }

    pub fn normal_map_image(&self) -> Option<&TextureImage> {
        self.normal_map_image.as_ref()
    }

    /// Stores a delivered image and flips the matching status flag.
    pub fn texture_loaded(&mut self, slot: TextureSlot, image: TextureImage) {
        match slot {
            TextureSlot::Diffuse => {
                self.texture_image = Some(image);
                self.texture_handle = None;
                self.has_texture = true;
            }
            TextureSlot::NormalMap => {
                self.normal_map_image = Some(image);
                self.normal_map_handle = None;
                self.has_normal_map = true;
            }
        }
    }

    /// Triangles of the vertex buffer with every position transformed by `world`.
    pub fn triangles_in(&self, world: &Mat4) -> Vec<[Vec3; 3]> {
        self.vertices
            .chunks_exact(3)
            .map(|corners| {
                [
                    transform_point(world, corners[0].position.into()),
                    transform_point(world, corners[1].position.into()),
                    transform_point(world, corners[2].position.into()),
                ]
            })
            .collect()
    }
}
