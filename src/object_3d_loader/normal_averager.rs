use std::collections::{BTreeMap, BTreeSet};

use cgmath::{Vector3, Zero};

use crate::{math::Vec3, scene_pkg::mesh::RawMesh};

/// Maps each position index to the distinct normal indices used by corners sharing it.
pub fn vertex_normal_map(mesh: &RawMesh) -> BTreeMap<usize, BTreeSet<usize>> {
    let mut map: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
    for (&vertex, &normal) in mesh.vertex_indices.iter().zip(&mesh.normal_indices) {
        map.entry(vertex).or_default().insert(normal);
    }
    map
}

/// One smooth normal per position index: the arithmetic mean of the distinct normals
/// referenced at that position. The result is not renormalized; unreferenced positions
/// get the zero vector.
pub fn average_normals(mesh: &RawMesh) -> Vec<Vec3> {
    let mut averaged = vec![Vector3::zero(); mesh.positions.len()];
    for (vertex, normals) in vertex_normal_map(mesh) {
        let sum = normals
            .iter()
            .fold(Vector3::zero(), |acc: Vec3, &n| acc + mesh.normals[n]);
        averaged[vertex] = sum / normals.len() as f32;
    }
    averaged
}
