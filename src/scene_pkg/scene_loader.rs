//! Builds a [`Scene`] from its JSON description.
//!
//! ```json
//! {
//!   "camera": { "type": "perspective", "position": [0, 0, 5], "lookat": [0, 0, 0], "up": [0, 1, 0], "fov": 45 },
//!   "root": { "type": "node", "name": "world", "children": [
//!     { "type": "object", "name": "cube", "obj": "models/cube.obj", "color": "#ff8000",
//!       "translation": [0, 1, 0], "rotation": [0, 45, 0], "scale": [1, 1, 1] }
//!   ] },
//!   "lights": {
//!     "ambient": [0.1, 0.1, 0.1],
//!     "point_lights": [{ "position": [2, 2, 2], "Id": [1, 1, 1], "Is": [1, 1, 1], "k": 0.05 }],
//!     "directional_lights": [{ "direction": [0, -1, 0], "Id": [0.5, 0.5, 0.5], "Is": [0.2, 0.2, 0.2] }]
//!   }
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::{
    config::LoaderConfig,
    error::{SceneError, SceneResult},
    math::{parse_hex_color, vec3},
    object_3d_loader::{
        mesh_converters::ObjFileToMeshConverter,
        resource::{resolve_sibling, TextFetcher},
        texture_loader::{ImageLoader, TextureRequest, TextureSlot},
    },
};

use super::{
    camera::{Camera, Projection},
    directional_light::DirectionalLight,
    node::{NodeId, NodeKind, SceneNode},
    object3d::Object3D,
    point_light::PointLight,
    scene::Scene,
    scene_graph::SceneGraph,
    transform::Transform,
};

#[derive(Deserialize, Debug)]
struct SceneFile {
    camera: CameraEntry,
    root: NodeEntry,
    #[serde(default)]
    lights: LightsEntry,
}

#[derive(Deserialize, Debug)]
struct CameraEntry {
    #[serde(rename = "type")]
    kind: String,
    position: [f32; 3],
    lookat: [f32; 3],
    up: [f32; 3],
    #[serde(default = "default_fov")]
    fov: f32,
}

#[derive(Deserialize, Debug)]
struct NodeEntry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    translation: [f32; 3],
    #[serde(default)]
    rotation: [f32; 3],
    #[serde(default = "unit_scale")]
    scale: [f32; 3],
    #[serde(default)]
    children: Vec<NodeEntry>,
    obj: Option<String>,
    color: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct LightsEntry {
    #[serde(default)]
    ambient: [f32; 3],
    #[serde(default)]
    point_lights: Vec<PointLightEntry>,
    #[serde(default)]
    directional_lights: Vec<DirectionalLightEntry>,
}

#[derive(Deserialize, Debug)]
struct PointLightEntry {
    name: Option<String>,
    position: [f32; 3],
    #[serde(rename = "Id")]
    id: [f32; 3],
    #[serde(rename = "Is")]
    is: [f32; 3],
    #[serde(default)]
    k: f32,
}

#[derive(Deserialize, Debug)]
struct DirectionalLightEntry {
    name: Option<String>,
    direction: [f32; 3],
    #[serde(rename = "Id")]
    id: [f32; 3],
    #[serde(rename = "Is")]
    is: [f32; 3],
}

fn default_fov() -> f32 {
    45.0
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl CameraEntry {
    fn to_camera(&self) -> SceneResult<Camera> {
        let projection = match self.kind.as_str() {
            "perspective" => Projection::Perspective { fov: self.fov },
            "orthographic" => Projection::Orthographic,
            other => return Err(SceneError::UnknownCameraType(other.to_owned())),
        };
        Ok(Camera {
            projection,
            position: vec3(self.position),
            look_at: vec3(self.lookat),
            up: vec3(self.up),
        })
    }
}

impl NodeEntry {
    fn transform(&self) -> Transform {
        Transform {
            translation: vec3(self.translation),
            rotation: vec3(self.rotation),
            scale: vec3(self.scale),
        }
    }

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.kind)
    }
}

/// Walks the node entries depth first, loading geometry as it goes.
struct SceneBuilder<'a> {
    scene_path: &'a Path,
    fetcher: &'a dyn TextFetcher,
    config: &'a LoaderConfig,
    textures: Vec<TextureRequest>,
}

impl<'a> SceneBuilder<'a> {
    fn build_node(&mut self, entry: &NodeEntry) -> SceneResult<SceneNode> {
        let name = entry.display_name().to_owned();
        let kind = match entry.kind.as_str() {
            "node" => NodeKind::Generic,
            "object" => NodeKind::Object(Box::new(self.load_object(entry)?)),
            other => return Err(SceneError::UnknownNodeType(other.to_owned())),
        };
        log::debug!("built {:?} node `{name}`", kind.node_type());
        Ok(SceneNode::new(name, entry.transform(), kind))
    }

    fn load_object(&self, entry: &NodeEntry) -> SceneResult<Object3D> {
        let obj = entry.obj.as_deref().ok_or_else(|| {
            SceneError::MalformedScene(format!(
                "object node `{}` has no `obj` file",
                entry.display_name()
            ))
        })?;

        let fallback_color = match entry.color.as_deref() {
            Some(color) => parse_hex_color(color).ok_or_else(|| {
                SceneError::MalformedScene(format!(
                    "object node `{}` has invalid color `{color}`",
                    entry.display_name()
                ))
            })?,
            None => self.config.fallback_color,
        };

        let obj_path = resolve_sibling(self.scene_path, obj);
        let mesh = ObjFileToMeshConverter::new(obj_path, fallback_color).create_mesh(self.fetcher)?;
        Ok(Object3D::from_converted(mesh))
    }

    /// Queues texture requests for an object node once its id is known.
    fn queue_textures(&mut self, id: NodeId, node: &SceneNode) {
        if !self.config.load_textures {
            return;
        }
        let Some(object) = node.object() else {
            return;
        };
        if let Some(path) = &object.texture_path {
            self.textures.push(TextureRequest {
                node: id,
                slot: TextureSlot::Diffuse,
                path: path.clone(),
            });
        }
        if let Some(path) = &object.normal_map_path {
            self.textures.push(TextureRequest {
                node: id,
                slot: TextureSlot::NormalMap,
                path: path.clone(),
            });
        }
    }

    fn attach_children(
        &mut self,
        graph: &mut SceneGraph,
        parent: NodeId,
        entries: &[NodeEntry],
    ) -> SceneResult<()> {
        for entry in entries {
            let node = self.build_node(entry)?;
            let id = graph.add_child(parent, node);
            self.queue_textures(id, &graph[id]);
            self.attach_children(graph, id, &entry.children)?;
        }
        Ok(())
    }
}

fn attach_lights(graph: &mut SceneGraph, lights: &LightsEntry) {
    let root = graph.root();
    for (i, light) in lights.point_lights.iter().enumerate() {
        let name = light
            .name
            .clone()
            .unwrap_or_else(|| format!("point_light_{i}"));
        graph.add_child(
            root,
            SceneNode::new(
                name,
                Transform::default(),
                NodeKind::PointLight(PointLight {
                    position: vec3(light.position),
                    id: vec3(light.id),
                    is: vec3(light.is),
                    k: light.k,
                }),
            ),
        );
    }
    for (i, light) in lights.directional_lights.iter().enumerate() {
        let name = light
            .name
            .clone()
            .unwrap_or_else(|| format!("directional_light_{i}"));
        graph.add_child(
            root,
            SceneNode::new(
                name,
                Transform::default(),
                NodeKind::DirectionalLight(DirectionalLight {
                    direction: vec3(light.direction),
                    id: vec3(light.id),
                    is: vec3(light.is),
                }),
            ),
        );
    }
}

impl Scene {
    /// Fetches and builds the scene at `path`. OBJ/MTL failures abort the load; texture
    /// requests are issued only after the whole graph has been built.
    pub fn load(
        path: &Path,
        fetcher: &dyn TextFetcher,
        images: &dyn ImageLoader,
        config: &LoaderConfig,
    ) -> SceneResult<Scene> {
        let text = fetcher.fetch_text(path)?;
        Scene::from_json_str(&text, path, fetcher, images, config)
    }

    /// Builds a scene from JSON text. Relative paths resolve against `scene_path`'s directory.
    pub fn from_json_str(
        text: &str,
        scene_path: &Path,
        fetcher: &dyn TextFetcher,
        images: &dyn ImageLoader,
        config: &LoaderConfig,
    ) -> SceneResult<Scene> {
        let file: SceneFile = serde_json::from_str(text)?;
        let camera = file.camera.to_camera()?;

        let mut builder = SceneBuilder {
            scene_path,
            fetcher,
            config,
            textures: vec![],
        };
        let root = builder.build_node(&file.root)?;
        let mut scene = Scene::new(camera, root);
        let root_id = scene.graph.root();
        builder.queue_textures(root_id, &scene.graph[root_id]);
        builder.attach_children(&mut scene.graph, root_id, &file.root.children)?;

        attach_lights(&mut scene.graph, &file.lights);
        scene.ambient = vec3(file.lights.ambient);
        scene.update();

        for request in builder.textures {
            scene.request_texture(images, request);
        }

        let stats = scene.statistics();
        log::info!(
            "loaded scene {}: {} nodes, {} objects, {} triangles, {} lights, {} textures pending",
            scene_path.display(),
            stats.node_count,
            stats.object_count,
            stats.triangle_count,
            stats.point_lights + stats.directional_lights,
            scene.pending_textures()
        );
        Ok(scene)
    }
}
