use crate::math::{Vec2, Vec3};

/// Computes one tangent and bitangent per triangle from UV gradients and repeats them for
/// all three corners.
///
/// `positions` and `uvs` are corner-expanded: entry `i` of both belongs to corner `i`.
/// A triangle whose UVs are collinear has a zero determinant and yields non-finite vectors;
/// callers get those values unchanged.
pub fn compute_tangents(positions: &[Vec3], uvs: &[Vec2]) -> (Vec<Vec3>, Vec<Vec3>) {
    let mut tangents = Vec::with_capacity(positions.len());
    let mut bitangents = Vec::with_capacity(positions.len());

    for (triangle, uv) in positions.chunks_exact(3).zip(uvs.chunks_exact(3)) {
        let (v0, v1, v2) = (triangle[0], triangle[1], triangle[2]);
        let (uv0, uv1, uv2) = (uv[0], uv[1], uv[2]);

        // Edges of the triangle: position and UV deltas
        let delta_pos1 = v1 - v0;
        let delta_pos2 = v2 - v0;
        let delta_uv1 = uv1 - uv0;
        let delta_uv2 = uv2 - uv0;

        let r = 1.0 / (delta_uv1.x * delta_uv2.y - delta_uv1.y * delta_uv2.x);
        let tangent = (delta_pos1 * delta_uv2.y - delta_pos2 * delta_uv1.y) * r;
        let bitangent = (delta_pos2 * delta_uv1.x - delta_pos1 * delta_uv2.x) * r;

        for _ in 0..3 {
            tangents.push(tangent);
            bitangents.push(bitangent);
        }
    }

    (tangents, bitangents)
}
