use std::mem::size_of;

use crate::scene_pkg::{
    mesh::{
        BITANGENT_OFFSET, COLOR_OFFSET, FLAT_NORMAL_OFFSET, POSITION_OFFSET, SMOOTH_NORMAL_OFFSET,
        TANGENT_OFFSET, UV_OFFSET, VERTEX_STRIDE,
    },
    object3d::Object3D,
    scene::Scene,
};

use super::draw_system::{DrawOptions, GraphicsDevice, Shader};

const FLOAT_BYTES: usize = size_of::<f32>();

/// Walks a scene and issues one draw per object node.
///
/// World matrices are taken from the last [`Scene::update`].
pub struct SceneDrawSystem {
    options: DrawOptions,
}

impl SceneDrawSystem {
    pub fn new(options: DrawOptions) -> SceneDrawSystem {
        SceneDrawSystem { options }
    }

    pub fn options(&self) -> &DrawOptions {
        &self.options
    }

    pub fn set_smooth_shading(&mut self, smooth_shading: bool) {
        self.options.smooth_shading = smooth_shading;
    }

    /// Draws every object node in traversal order. Returns the number of draw calls.
    pub fn draw(
        &self,
        scene: &mut Scene,
        device: &mut dyn GraphicsDevice,
        shader: &mut dyn Shader,
    ) -> usize {
        self.upload_frame_uniforms(scene, shader);

        let mut draws = 0;
        for id in scene.graph.traverse() {
            let node = &mut scene.graph[id];
            let world = *node.world_matrix();
            let Some(object) = node.object_mut() else {
                continue;
            };
            shader.set_uniform_mat4("model", &world);
            self.draw_object(object, device, shader);
            draws += 1;
        }
        draws
    }

    fn upload_frame_uniforms(&self, scene: &Scene, shader: &mut dyn Shader) {
        shader.set_uniform_mat4("view", &scene.view_matrix());
        shader.set_uniform_mat4(
            "projection",
            &scene.camera.get_projection_matrix(self.options.aspect_ratio),
        );
        shader.set_uniform_vec3("eyePosition", scene.camera.position);
        shader.set_uniform_vec3("ambient", scene.ambient);

        let point_lights = scene.point_lights();
        shader.set_uniform_i32("numPointLights", point_lights.len() as i32);
        for (i, (_, light, position)) in point_lights.iter().enumerate() {
            shader.set_uniform_vec3(&format!("pointLights[{i}].position"), *position);
            shader.set_uniform_vec3(&format!("pointLights[{i}].Id"), light.id);
            shader.set_uniform_vec3(&format!("pointLights[{i}].Is"), light.is);
            shader.set_uniform_f32(&format!("pointLights[{i}].k"), light.k);
        }

        let directional_lights = scene.directional_lights();
        shader.set_uniform_i32("numDirectionalLights", directional_lights.len() as i32);
        for (i, (_, light, direction)) in directional_lights.iter().enumerate() {
            shader.set_uniform_vec3(&format!("directionalLights[{i}].direction"), *direction);
            shader.set_uniform_vec3(&format!("directionalLights[{i}].Id"), light.id);
            shader.set_uniform_vec3(&format!("directionalLights[{i}].Is"), light.is);
        }
    }

    fn draw_object(
        &self,
        object: &mut Object3D,
        device: &mut dyn GraphicsDevice,
        shader: &mut dyn Shader,
    ) {
        let buffer = match object.gpu_buffer {
            Some(buffer) => buffer,
            None => {
                let buffer = device.create_vertex_buffer(object.vertex_buffer());
                log::debug!(
                    "created vertex buffer {:?} for {} corners",
                    buffer,
                    object.vertex_count()
                );
                object.gpu_buffer = Some(buffer);
                buffer
            }
        };

        let normal_offset = if self.options.smooth_shading {
            SMOOTH_NORMAL_OFFSET
        } else {
            FLAT_NORMAL_OFFSET
        };
        let stride = VERTEX_STRIDE * FLOAT_BYTES;
        let attributes = [
            ("position", 3, POSITION_OFFSET),
            ("color", 3, COLOR_OFFSET),
            ("normal", 3, normal_offset),
            ("uv", 2, UV_OFFSET),
            ("tangent", 3, TANGENT_OFFSET),
            ("bitangent", 3, BITANGENT_OFFSET),
        ];
        for (name, components, offset) in attributes {
            shader.set_array_buffer(name, buffer, components, stride, offset * FLOAT_BYTES);
        }

        let material = &object.material;
        shader.set_uniform_vec3("material.ka", material.ka);
        shader.set_uniform_vec3("material.kd", material.kd);
        shader.set_uniform_vec3("material.ks", material.ks);
        shader.set_uniform_f32("material.alpha", material.alpha);

        if object.texture_handle.is_none() {
            if let Some(image) = &object.texture_image {
                object.texture_handle = Some(device.create_texture(image));
            }
        }
        if object.normal_map_handle.is_none() {
            if let Some(image) = &object.normal_map_image {
                object.normal_map_handle = Some(device.create_texture(image));
            }
        }

        let has_texture = object.has_texture && object.texture_handle.is_some();
        let has_normal_map = object.has_normal_map && object.normal_map_handle.is_some();
        shader.set_uniform_i32("hasTexture", has_texture as i32);
        shader.set_uniform_i32("hasNormalMap", has_normal_map as i32);
        if let (true, Some(texture)) = (has_texture, object.texture_handle) {
            shader.set_texture("textureSampler", 0, texture);
        }
        if let (true, Some(texture)) = (has_normal_map, object.normal_map_handle) {
            shader.set_texture("normalSampler", 1, texture);
        }

        device.draw_triangles(object.vertex_count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        object_3d_loader::texture_loader::{TextureImage, TextureSlot},
        scene_pkg::{
            camera::Camera,
            directional_light::DirectionalLight,
            material::Material,
            mesh::VertexRecord,
            node::{NodeKind, SceneNode},
            point_light::PointLight,
            transform::Transform,
        },
        system::headless::{HeadlessDevice, RecordingShader},
    };
    use cgmath::Vector3;

    fn scene() -> Scene {
        let mut scene = Scene::new(
            Camera::new(),
            SceneNode::new(
                "root",
                Transform::from_translation(Vector3::new(0.0, 2.0, 0.0)),
                NodeKind::Generic,
            ),
        );
        let root = scene.graph.root();
        let object = Object3D::new(vec![VertexRecord::default(); 3], Material::default());
        scene.graph.add_child(
            root,
            SceneNode::new("tri", Transform::default(), NodeKind::Object(Box::new(object))),
        );
        scene.graph.add_child(
            root,
            SceneNode::new(
                "lamp",
                Transform::default(),
                NodeKind::PointLight(PointLight {
                    position: Vector3::new(1.0, 0.0, 0.0),
                    id: Vector3::new(1.0, 1.0, 1.0),
                    is: Vector3::new(0.5, 0.5, 0.5),
                    k: 0.1,
                }),
            ),
        );
        scene.graph.add_child(
            root,
            SceneNode::new(
                "sun",
                Transform::default(),
                NodeKind::DirectionalLight(DirectionalLight {
                    direction: Vector3::new(0.0, -1.0, 0.0),
                    id: Vector3::new(1.0, 1.0, 1.0),
                    is: Vector3::new(1.0, 1.0, 1.0),
                }),
            ),
        );
        scene.update();
        scene
    }

    #[test]
    fn vertex_buffer_is_created_once() {
        let mut scene = scene();
        let mut device = HeadlessDevice::new();
        let mut shader = RecordingShader::new();
        let system = SceneDrawSystem::new(DrawOptions::default());

        assert_eq!(system.draw(&mut scene, &mut device, &mut shader), 1);
        assert_eq!(system.draw(&mut scene, &mut device, &mut shader), 1);

        assert_eq!(device.buffers.len(), 1);
        assert_eq!(device.buffers[0].1, 3 * VERTEX_STRIDE);
        assert_eq!(device.draws, vec![3, 3]);
        let tri = scene.graph.find("tri").unwrap();
        assert_eq!(
            scene.graph[tri].object().unwrap().gpu_buffer(),
            Some(device.buffers[0].0)
        );
    }

    #[test]
    fn lights_are_uploaded_in_world_space() {
        let mut scene = scene();
        let mut device = HeadlessDevice::new();
        let mut shader = RecordingShader::new();
        SceneDrawSystem::new(DrawOptions::default()).draw(&mut scene, &mut device, &mut shader);

        assert_eq!(shader.last_i32("numPointLights"), Some(1));
        assert_eq!(shader.last_i32("numDirectionalLights"), Some(1));
        assert_eq!(
            shader.last_vec3("pointLights[0].position"),
            Some(Vector3::new(1.0, 2.0, 0.0))
        );
        assert_eq!(
            shader.last_vec3("directionalLights[0].direction"),
            Some(Vector3::new(0.0, -1.0, 0.0))
        );
        let tri = scene.graph.find("tri").unwrap();
        assert_eq!(
            shader.last_mat4("model"),
            Some(*scene.graph[tri].world_matrix())
        );
    }

    #[test]
    fn shading_mode_selects_normal_slot() {
        let mut scene = scene();
        let mut device = HeadlessDevice::new();
        let mut shader = RecordingShader::new();
        let mut system = SceneDrawSystem::new(DrawOptions::default());

        system.draw(&mut scene, &mut device, &mut shader);
        assert_eq!(
            shader.attribute("normal"),
            Some((VERTEX_STRIDE * 4, FLAT_NORMAL_OFFSET * 4))
        );

        system.set_smooth_shading(true);
        system.draw(&mut scene, &mut device, &mut shader);
        assert_eq!(
            shader.attribute("normal"),
            Some((VERTEX_STRIDE * 4, SMOOTH_NORMAL_OFFSET * 4))
        );
        assert_eq!(shader.attribute("uv"), Some((80, 48)));
        assert_eq!(shader.attribute("bitangent"), Some((80, 68)));
    }

    #[test]
    fn textures_bind_only_after_arrival() {
        let mut scene = scene();
        let mut device = HeadlessDevice::new();
        let mut shader = RecordingShader::new();
        let system = SceneDrawSystem::new(DrawOptions::default());

        system.draw(&mut scene, &mut device, &mut shader);
        assert_eq!(shader.last_i32("hasTexture"), Some(0));
        assert!(device.textures.is_empty());

        let tri = scene.graph.find("tri").unwrap();
        scene.graph[tri].object_mut().unwrap().texture_loaded(
            TextureSlot::Diffuse,
            TextureImage {
                width: 2,
                height: 2,
                pixels: vec![0; 16],
            },
        );
        system.draw(&mut scene, &mut device, &mut shader);
        system.draw(&mut scene, &mut device, &mut shader);
        assert_eq!(shader.last_i32("hasTexture"), Some(1));
        assert_eq!(shader.last_i32("hasNormalMap"), Some(0));
        assert_eq!(device.textures.len(), 1);
        assert_eq!(device.buffers.len(), 1);
    }
}
