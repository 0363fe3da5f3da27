use std::ops::{Index, IndexMut};

use cgmath::{Matrix4, SquareMatrix};

use crate::math::{Mat4, Vec3};

use super::node::{NodeId, SceneNode};

/// Tree of scene nodes stored in an arena.
///
/// Children are owned through their parent's ordered child list; the parent link is a plain
/// index. Nodes are only ever appended, so ids stay valid for the lifetime of the graph.
#[derive(Clone, Debug)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn new(root: SceneNode) -> SceneGraph {
        let mut graph = SceneGraph { nodes: vec![root] };
        graph.nodes[0].parent = None;
        graph.nodes[0].children.clear();
        graph
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Appends `node` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this graph.
    pub fn add_child(&mut self, parent: NodeId, mut node: SceneNode) -> NodeId {
        assert!(parent.0 < self.nodes.len(), "unknown parent {parent:?}");
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i), node))
    }

    /// First node with the given name in traversal order.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.traverse()
            .into_iter()
            .find(|&id| self.nodes[id.0].name == name)
    }

    /// Depth-first pre-order, children in insertion order.
    pub fn traverse(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        order
    }

    /// Recomputes every local matrix from its transform and refreshes the cached world
    /// matrices, parents before children.
    pub fn update(&mut self) {
        self.update_node(self.root(), Matrix4::identity());
    }

    fn update_node(&mut self, id: NodeId, parent_world: Mat4) {
        let node = &mut self.nodes[id.0];
        node.local_matrix = node.transform.local_matrix();
        node.world_matrix = parent_world * node.local_matrix;
        let world = node.world_matrix;

        for i in 0..self.nodes[id.0].children.len() {
            let child = self.nodes[id.0].children[i];
            self.update_node(child, world);
        }
    }

    /// World matrix computed from the current transforms along the parent chain,
    /// independent of the cached matrices. `None` for an id outside this graph.
    pub fn world_transform(&self, id: NodeId) -> Option<Mat4> {
        let mut world = Matrix4::identity();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.nodes.get(node_id.0)?;
            world = node.transform.local_matrix() * world;
            current = node.parent;
        }
        Some(world)
    }

    /// World-space triangles of an object node, `None` for any other node type.
    pub fn world_triangles(&self, id: NodeId) -> Option<Vec<[Vec3; 3]>> {
        let object = self.nodes.get(id.0)?.object()?;
        Some(object.triangles_in(&self.world_transform(id)?))
    }
}

/// Direct access for ids handed out by this graph.
///
/// # Panics
///
/// Panics on an id from another graph; use [`SceneGraph::node`] for checked access.
impl Index<NodeId> for SceneGraph {
    type Output = SceneNode;

    fn index(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for SceneGraph {
    fn index_mut(&mut self, id: NodeId) -> &mut SceneNode {
        &mut self.nodes[id.0]
    }
}
