use std::path::{Path, PathBuf};

use crate::{
    error::SceneResult,
    math::Vec3,
    scene_pkg::{material::Material, mesh::VertexRecord},
};

use super::{
    mtl_parser::parse_mtl,
    obj_parser::parse_obj,
    resource::{resolve_sibling, TextFetcher},
    vertex_buffer::assemble,
};

/// Result of the OBJ/MTL load chain for one object node.
#[derive(Clone, Debug)]
pub struct ConvertedMesh {
    pub vertices: Vec<VertexRecord>,
    pub material: Material,
    /// `map_Kd`, resolved against the MTL file.
    pub texture_path: Option<PathBuf>,
    /// `map_Bump`, resolved against the MTL file.
    pub normal_map_path: Option<PathBuf>,
}

pub struct ObjFileToMeshConverter {
    path: PathBuf,
    fallback_color: Vec3,
}

impl ObjFileToMeshConverter {
    pub fn new(path: impl Into<PathBuf>, fallback_color: Vec3) -> ObjFileToMeshConverter {
        ObjFileToMeshConverter {
            path: path.into(),
            fallback_color,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fetches and parses the OBJ file and its `mtllib`, then interleaves the vertex data.
    ///
    /// Without an `mtllib` line the default material is used.
    pub fn create_mesh(&self, fetcher: &dyn TextFetcher) -> SceneResult<ConvertedMesh> {
        let obj_text = fetcher.fetch_text(&self.path)?;
        let obj_name = self.path.display().to_string();
        let obj = parse_obj(&obj_text, &obj_name, self.fallback_color)?;

        let (material, texture_path, normal_map_path) = match &obj.mtllib {
            Some(mtllib) => {
                let mtl_path = resolve_sibling(&self.path, mtllib);
                let mtl_text = fetcher.fetch_text(&mtl_path)?;
                let material = parse_mtl(&mtl_text, &mtl_path.display().to_string())?;
                let texture_path = material
                    .texture_file
                    .as_deref()
                    .map(|file| resolve_sibling(&mtl_path, file));
                let normal_map_path = material
                    .normal_map_file
                    .as_deref()
                    .map(|file| resolve_sibling(&mtl_path, file));
                (material, texture_path, normal_map_path)
            }
            None => (Material::default(), None, None),
        };

        let vertices = assemble(&obj.mesh, &obj.colors);

        Ok(ConvertedMesh {
            vertices,
            material,
            texture_path,
            normal_map_path,
        })
    }
}
