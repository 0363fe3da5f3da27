use cgmath::{Matrix4, SquareMatrix};

use crate::math::Mat4;

use super::{
    directional_light::DirectionalLight, object3d::Object3D, point_light::PointLight,
    transform::Transform,
};

/// Index of a node in its [`SceneGraph`](super::scene_graph::SceneGraph) arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeType {
    Generic,
    Object,
    PointLight,
    DirectionalLight,
}

/// What a node carries besides its transform.
#[derive(Clone, Debug)]
pub enum NodeKind {
    Generic,
    Object(Box<Object3D>),
    PointLight(PointLight),
    DirectionalLight(DirectionalLight),
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Generic => NodeType::Generic,
            NodeKind::Object(_) => NodeType::Object,
            NodeKind::PointLight(_) => NodeType::PointLight,
            NodeKind::DirectionalLight(_) => NodeType::DirectionalLight,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: String,
    pub transform: Transform,
    pub kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) local_matrix: Mat4,
    pub(crate) world_matrix: Mat4,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, transform: Transform, kind: NodeKind) -> SceneNode {
        SceneNode {
            name: name.into(),
            local_matrix: transform.local_matrix(),
            world_matrix: Matrix4::identity(),
            transform,
            kind,
            parent: None,
            children: vec![],
        }
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Local matrix as of the last [`SceneGraph::update`](super::scene_graph::SceneGraph::update).
    pub fn local_matrix(&self) -> &Mat4 {
        &self.local_matrix
    }

    /// World matrix as of the last update.
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    pub fn object(&self) -> Option<&Object3D> {
        match &self.kind {
            NodeKind::Object(object) => Some(&**object),
            _ => None,
        }
    }

    pub fn object_mut(&mut self) -> Option<&mut Object3D> {
        match &mut self.kind {
            NodeKind::Object(object) => Some(&mut **object),
            _ => None,
        }
    }
}
