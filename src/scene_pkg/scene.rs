use std::{
    mem,
    sync::mpsc::{self, Receiver, Sender, TryRecvError},
};

use cgmath::Vector3;

use crate::{
    math::{Mat4, Vec3},
    object_3d_loader::texture_loader::{ImageLoader, TextureEvent, TextureRequest},
};

use super::{
    camera::Camera,
    directional_light::DirectionalLight,
    node::{NodeId, NodeKind, SceneNode},
    point_light::PointLight,
    scene_graph::SceneGraph,
};

/// Counts gathered from one walk over the graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SceneStatistics {
    pub node_count: usize,
    pub object_count: usize,
    pub point_lights: usize,
    pub directional_lights: usize,
    pub triangle_count: usize,
    pub textured_objects: usize,
}

/// A loaded scene: camera, node graph, ambient light and the inbox for texture completions.
pub struct Scene {
    pub camera: Camera,
    pub graph: SceneGraph,
    pub ambient: Vec3,
    texture_events: Receiver<TextureEvent>,
    texture_sender: Sender<TextureEvent>,
    pending_textures: usize,
}

impl Scene {
    pub fn new(camera: Camera, root: SceneNode) -> Scene {
        let (texture_sender, texture_events) = mpsc::channel();
        Scene {
            camera,
            graph: SceneGraph::new(root),
            ambient: Vector3::new(0.0, 0.0, 0.0),
            texture_events,
            texture_sender,
            pending_textures: 0,
        }
    }

    /// Hands `request` to `loader`; the completion is applied by
    /// [`poll_textures`](Scene::poll_textures) or [`wait_for_textures`](Scene::wait_for_textures).
    pub fn request_texture(&mut self, loader: &dyn ImageLoader, request: TextureRequest) {
        log::debug!("requesting {:?} texture {}", request.slot, request.path.display());
        self.pending_textures += 1;
        loader.request(request, self.texture_sender.clone());
    }

    pub fn pending_textures(&self) -> usize {
        self.pending_textures
    }

    /// Applies every texture event that has already arrived. Never blocks.
    /// Returns the number of events handled.
    pub fn poll_textures(&mut self) -> usize {
        let mut handled = 0;
        while self.pending_textures > 0 {
            match self.texture_events.try_recv() {
                Ok(event) => {
                    self.apply_texture_event(event);
                    handled += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        handled
    }

    /// Blocks until every outstanding texture request has reported, or until every loader
    /// has dropped its sender. Requests that never reported are logged and given up on.
    pub fn wait_for_textures(&mut self) {
        if self.pending_textures == 0 {
            return;
        }

        // Swap in a fresh channel so the old one disconnects once the loaders let go of it.
        let (sender, events) = mpsc::channel();
        drop(mem::replace(&mut self.texture_sender, sender));
        let outstanding = mem::replace(&mut self.texture_events, events);

        while self.pending_textures > 0 {
            match outstanding.recv() {
                Ok(event) => self.apply_texture_event(event),
                Err(_) => {
                    log::warn!(
                        "{} texture requests ended without a result",
                        self.pending_textures
                    );
                    self.pending_textures = 0;
                }
            }
        }
    }

    fn apply_texture_event(&mut self, event: TextureEvent) {
        self.pending_textures = self.pending_textures.saturating_sub(1);

        let image = match event.result {
            Ok(image) => image,
            Err(err) => {
                log::warn!("texture for node {:?} not loaded: {err}", event.node);
                return;
            }
        };

        match self.graph.node_mut(event.node).and_then(|n| n.object_mut()) {
            Some(object) => {
                log::debug!(
                    "{:?} texture {} loaded ({}x{})",
                    event.slot,
                    event.path.display(),
                    image.width,
                    image.height
                );
                object.texture_loaded(event.slot, image);
            }
            None => log::warn!("texture event for non-object node {:?}", event.node),
        }
    }

    /// Refreshes every node's local and world matrices.
    pub fn update(&mut self) {
        self.graph.update();
    }

    /// Point lights with their world-space positions, in traversal order.
    pub fn point_lights(&self) -> Vec<(NodeId, &PointLight, Vec3)> {
        self.graph
            .traverse()
            .into_iter()
            .filter_map(|id| match &self.graph[id].kind {
                NodeKind::PointLight(light) => {
                    Some((id, light, light.world_position(self.graph[id].world_matrix())))
                }
                _ => None,
            })
            .collect()
    }

    /// Directional lights with their world-space directions, in traversal order.
    pub fn directional_lights(&self) -> Vec<(NodeId, &DirectionalLight, Vec3)> {
        self.graph
            .traverse()
            .into_iter()
            .filter_map(|id| match &self.graph[id].kind {
                NodeKind::DirectionalLight(light) => {
                    Some((id, light, light.world_direction(self.graph[id].world_matrix())))
                }
                _ => None,
            })
            .collect()
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.camera.get_view_matrix()
    }

    pub fn statistics(&self) -> SceneStatistics {
        let mut stats = SceneStatistics {
            node_count: self.graph.len(),
            ..SceneStatistics::default()
        };
        for (_, node) in self.graph.iter() {
            match &node.kind {
                NodeKind::Generic => {}
                NodeKind::Object(object) => {
                    stats.object_count += 1;
                    stats.triangle_count += object.triangle_count();
                    if object.has_texture {
                        stats.textured_objects += 1;
                    }
                }
                NodeKind::PointLight(_) => stats.point_lights += 1,
                NodeKind::DirectionalLight(_) => stats.directional_lights += 1,
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::TextureError,
        object_3d_loader::texture_loader::{TextureImage, TextureSlot},
        scene_pkg::{
            material::Material, mesh::VertexRecord, object3d::Object3D, transform::Transform,
        },
    };
    use std::{cell::RefCell, path::PathBuf, thread, time::Duration};

    /// Holds requests until the test decides how they complete.
    #[derive(Default)]
    struct ManualLoader {
        requests: RefCell<Vec<(TextureRequest, Sender<TextureEvent>)>>,
    }

    impl ImageLoader for ManualLoader {
        fn request(&self, request: TextureRequest, events: Sender<TextureEvent>) {
            self.requests.borrow_mut().push((request, events));
        }
    }

    impl ManualLoader {
        fn complete(&self, succeed: bool) {
            for (request, events) in self.requests.borrow_mut().drain(..) {
                let result = if succeed {
                    Ok(TextureImage {
                        width: 1,
                        height: 1,
                        pixels: vec![255; 4],
                    })
                } else {
                    Err(TextureError::Io {
                        path: request.path.clone(),
                        source: std::io::Error::from(std::io::ErrorKind::NotFound),
                    })
                };
                events
                    .send(TextureEvent {
                        node: request.node,
                        slot: request.slot,
                        path: request.path,
                        result,
                    })
                    .unwrap();
            }
        }
    }

    /// Breaks the one-event rule: its worker takes the sender and dies.
    struct DyingLoader;

    impl ImageLoader for DyingLoader {
        fn request(&self, request: TextureRequest, events: Sender<TextureEvent>) {
            thread::spawn(move || {
                let _events = events;
                panic!("worker for {} died", request.path.display());
            });
        }
    }

    /// Drops the sender on the spot.
    struct SilentLoader;

    impl ImageLoader for SilentLoader {
        fn request(&self, _request: TextureRequest, events: Sender<TextureEvent>) {
            drop(events);
        }
    }

    /// Runs `wait_for_textures` on a helper thread and hands the scene back, or `None`
    /// if it did not return in time.
    fn wait_with_deadline(mut scene: Scene) -> Option<Scene> {
        let (done, finished) = mpsc::channel();
        thread::spawn(move || {
            scene.wait_for_textures();
            let _ = done.send(scene);
        });
        finished.recv_timeout(Duration::from_secs(3)).ok()
    }

    fn scene_with_object() -> (Scene, NodeId) {
        let mut scene = Scene::new(
            Camera::new(),
            SceneNode::new("root", Transform::default(), NodeKind::Generic),
        );
        let object = Object3D::new(vec![VertexRecord::default(); 6], Material::default());
        let id = scene.graph.add_child(
            scene.graph.root(),
            SceneNode::new("mesh", Transform::default(), NodeKind::Object(Box::new(object))),
        );
        (scene, id)
    }

    fn request(node: NodeId, slot: TextureSlot) -> TextureRequest {
        TextureRequest {
            node,
            slot,
            path: PathBuf::from("tex.png"),
        }
    }

    #[test]
    fn poll_applies_only_arrived_events() {
        let (mut scene, id) = scene_with_object();
        let loader = ManualLoader::default();
        scene.request_texture(&loader, request(id, TextureSlot::Diffuse));

        assert_eq!(scene.poll_textures(), 0);
        assert_eq!(scene.pending_textures(), 1);
        assert!(!scene.graph[id].object().unwrap().has_texture);

        loader.complete(true);
        assert_eq!(scene.poll_textures(), 1);
        assert_eq!(scene.pending_textures(), 0);
        assert!(scene.graph[id].object().unwrap().has_texture);
        assert!(!scene.graph[id].object().unwrap().has_normal_map);
    }

    #[test]
    fn failed_texture_leaves_flags_false() {
        let (mut scene, id) = scene_with_object();
        let loader = ManualLoader::default();
        scene.request_texture(&loader, request(id, TextureSlot::Diffuse));
        scene.request_texture(&loader, request(id, TextureSlot::NormalMap));
        loader.complete(false);

        scene.wait_for_textures();
        let object = scene.graph[id].object().unwrap();
        assert_eq!(scene.pending_textures(), 0);
        assert!(!object.has_texture);
        assert!(!object.has_normal_map);
    }

    #[test]
    fn wait_returns_when_loader_thread_dies() {
        let (mut scene, id) = scene_with_object();
        scene.request_texture(&DyingLoader, request(id, TextureSlot::Diffuse));

        let scene = wait_with_deadline(scene).expect("wait_for_textures did not return");
        assert_eq!(scene.pending_textures(), 0);
        assert!(!scene.graph[id].object().unwrap().has_texture);
    }

    #[test]
    fn wait_gives_up_on_dropped_senders_and_keeps_reported_events() {
        let (mut scene, id) = scene_with_object();
        let manual = ManualLoader::default();
        scene.request_texture(&SilentLoader, request(id, TextureSlot::NormalMap));
        scene.request_texture(&manual, request(id, TextureSlot::Diffuse));
        manual.complete(true);

        let mut scene = wait_with_deadline(scene).expect("wait_for_textures did not return");
        assert_eq!(scene.pending_textures(), 0);
        assert!(scene.graph[id].object().unwrap().has_texture);
        assert!(!scene.graph[id].object().unwrap().has_normal_map);

        scene.request_texture(&manual, request(id, TextureSlot::NormalMap));
        manual.complete(true);
        assert_eq!(scene.poll_textures(), 1);
        assert!(scene.graph[id].object().unwrap().has_normal_map);
    }

    #[test]
    fn statistics_count_node_kinds() {
        let (mut scene, _) = scene_with_object();
        let root = scene.graph.root();
        scene.graph.add_child(
            root,
            SceneNode::new(
                "lamp",
                Transform::default(),
                NodeKind::PointLight(PointLight {
                    position: Vector3::new(0.0, 1.0, 0.0),
                    id: Vector3::new(1.0, 1.0, 1.0),
                    is: Vector3::new(1.0, 1.0, 1.0),
                    k: 0.0,
                }),
            ),
        );
        scene.update();

        assert_eq!(
            scene.statistics(),
            SceneStatistics {
                node_count: 3,
                object_count: 1,
                point_lights: 1,
                directional_lights: 0,
                triangle_count: 2,
                textured_objects: 0,
            }
        );
        assert_eq!(scene.point_lights().len(), 1);
        assert!(scene.directional_lights().is_empty());
    }
}
