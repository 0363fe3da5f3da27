use crate::{
    math::{Vec2, Vec3},
    scene_pkg::mesh::{RawMesh, VertexRecord},
};

use super::{normal_averager::average_normals, tangent_space::compute_tangents};

/// Interleaves a parsed mesh into one [`VertexRecord`] per face corner, in face order.
///
/// Positions and colors come through the vertex index, flat normals through the normal
/// index, smooth normals through the averaged table (vertex index), UVs through the texture
/// index and the tangent basis from the corner's triangle.
pub fn assemble(mesh: &RawMesh, colors: &[Vec3]) -> Vec<VertexRecord> {
    let corner_positions: Vec<Vec3> = mesh
        .vertex_indices
        .iter()
        .map(|&i| mesh.positions[i])
        .collect();
    let corner_uvs: Vec<Vec2> = mesh
        .texture_indices
        .iter()
        .map(|&i| mesh.uvs[i])
        .collect();

    let (tangents, bitangents) = compute_tangents(&corner_positions, &corner_uvs);
    let smooth_normals = average_normals(mesh);

    let mut vertices = Vec::with_capacity(mesh.corner_count());
    for corner in 0..mesh.corner_count() {
        let vertex = mesh.vertex_indices[corner];
        let normal = mesh.normal_indices[corner];

        vertices.push(VertexRecord {
            position: corner_positions[corner].into(),
            color: colors[vertex].into(),
            flat_normal: mesh.normals[normal].into(),
            smooth_normal: smooth_normals[vertex].into(),
            uv: corner_uvs[corner].into(),
            tangent: tangents[corner].into(),
            bitangent: bitangents[corner].into(),
        });
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        object_3d_loader::obj_parser::parse_obj,
        scene_pkg::mesh::{TANGENT_OFFSET, VERTEX_STRIDE},
    };
    use cgmath::Vector3;

    const TRIANGLE: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
";

    #[test]
    fn single_triangle_has_axis_aligned_tangent_space() {
        let obj = parse_obj(TRIANGLE, "triangle.obj", Vector3::new(1.0, 1.0, 1.0)).unwrap();
        let vertices = assemble(&obj.mesh, &obj.colors);
        assert_eq!(vertices.len(), 3);
        for vertex in &vertices {
            assert_eq!(vertex.tangent, [1.0, 0.0, 0.0]);
            assert_eq!(vertex.bitangent, [0.0, 1.0, 0.0]);
            assert_eq!(vertex.flat_normal, [0.0, 0.0, 1.0]);
            assert_eq!(vertex.smooth_normal, [0.0, 0.0, 1.0]);
        }
        assert_eq!(vertices[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(vertices[2].uv, [0.0, 1.0]);
    }

    #[test]
    fn buffer_holds_twenty_floats_per_corner() {
        let text = format!("{TRIANGLE}f 3/3/1 2/2/1 1/1/1\n");
        let obj = parse_obj(&text, "two.obj", Vector3::new(1.0, 1.0, 1.0)).unwrap();
        let vertices = assemble(&obj.mesh, &obj.colors);
        let floats = VertexRecord::as_floats(&vertices);
        assert_eq!(floats.len(), VERTEX_STRIDE * 3 * obj.mesh.triangle_count());
        assert_eq!(floats[TANGENT_OFFSET], 1.0);
    }

    #[test]
    fn flat_and_smooth_normals_are_both_kept() {
        let text = "\
v 0 0 0
v 1 0 0
v 0 0 1
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
vn 0 1 0
vn 1 0 0
f 1/1/1 2/2/1 3/3/1
f 1/1/2 4/2/2 3/3/2
";
        let obj = parse_obj(text, "shared.obj", Vector3::new(0.2, 0.2, 0.2)).unwrap();
        let vertices = assemble(&obj.mesh, &obj.colors);
        assert_eq!(vertices[0].flat_normal, [0.0, 1.0, 0.0]);
        assert_eq!(vertices[3].flat_normal, [1.0, 0.0, 0.0]);
        assert_eq!(vertices[0].smooth_normal, [0.5, 0.5, 0.0]);
        assert_eq!(vertices[3].smooth_normal, [0.5, 0.5, 0.0]);
        assert_eq!(vertices[1].smooth_normal, [0.0, 1.0, 0.0]);
        assert_eq!(vertices[0].color, [0.2, 0.2, 0.2]);
    }
}
