use bytemuck::{Pod, Zeroable};

use crate::math::{Vec2, Vec3};

/// Floats per interleaved vertex record.
pub const VERTEX_STRIDE: usize = 20;

pub const POSITION_OFFSET: usize = 0;
pub const COLOR_OFFSET: usize = 3;
pub const FLAT_NORMAL_OFFSET: usize = 6;
pub const SMOOTH_NORMAL_OFFSET: usize = 9;
pub const UV_OFFSET: usize = 12;
pub const TANGENT_OFFSET: usize = 14;
pub const BITANGENT_OFFSET: usize = 17;

/// One mesh corner as uploaded to the GPU.
///
/// The field order is the buffer layout contract with the shader:
/// `[pos(3), color(3), flat_normal(3), smooth_normal(3), uv(2), tangent(3), bitangent(3)]`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Zeroable, Pod)]
pub struct VertexRecord {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub flat_normal: [f32; 3],
    pub smooth_normal: [f32; 3],
    pub uv: [f32; 2],
    pub tangent: [f32; 3],
    pub bitangent: [f32; 3],
}

impl VertexRecord {
    pub fn as_floats(records: &[VertexRecord]) -> &[f32] {
        bytemuck::cast_slice(records)
    }
}

/// Geometry as read from an OBJ file, before any corner expansion.
///
/// The three index arrays hold one 0-based entry per (triangle, corner) pair.
#[derive(Clone, Debug, Default)]
pub struct RawMesh {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub vertex_indices: Vec<usize>,
    pub texture_indices: Vec<usize>,
    pub normal_indices: Vec<usize>,
}

impl RawMesh {
    pub fn triangle_count(&self) -> usize {
        self.vertex_indices.len() / 3
    }

    pub fn corner_count(&self) -> usize {
        self.vertex_indices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_offsets_match_field_layout() {
        let record = VertexRecord {
            position: [0.0, 1.0, 2.0],
            color: [3.0, 4.0, 5.0],
            flat_normal: [6.0, 7.0, 8.0],
            smooth_normal: [9.0, 10.0, 11.0],
            uv: [12.0, 13.0],
            tangent: [14.0, 15.0, 16.0],
            bitangent: [17.0, 18.0, 19.0],
        };
        let floats = VertexRecord::as_floats(std::slice::from_ref(&record));
        assert_eq!(floats.len(), VERTEX_STRIDE);
        for (i, value) in floats.iter().enumerate() {
            assert_eq!(*value, i as f32);
        }
        assert_eq!(floats[COLOR_OFFSET], 3.0);
        assert_eq!(floats[SMOOTH_NORMAL_OFFSET], 9.0);
        assert_eq!(floats[UV_OFFSET], 12.0);
        assert_eq!(floats[TANGENT_OFFSET], 14.0);
        assert_eq!(floats[BITANGENT_OFFSET], 17.0);
        assert_eq!(std::mem::size_of::<VertexRecord>(), VERTEX_STRIDE * 4);
    }
}
