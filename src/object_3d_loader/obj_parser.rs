use std::str::SplitWhitespace;

use cgmath::{Vector2, Vector3};

use crate::{
    error::{SceneError, SceneResult},
    math::Vec3,
    scene_pkg::mesh::RawMesh,
};

use super::resource::file_name_argument;

/// Everything an OBJ file contributes to an object node.
#[derive(Clone, Debug)]
pub struct ObjData {
    pub mesh: RawMesh,
    /// One color per entry in `mesh.positions`.
    pub colors: Vec<Vec3>,
    /// `mtllib` reference, relative to the OBJ file.
    pub mtllib: Option<String>,
}

struct LineCursor<'a> {
    source: &'a str,
    line: usize,
}

impl LineCursor<'_> {
    fn error(&self, message: impl Into<String>) -> SceneError {
        SceneError::malformed(self.source, self.line, message)
    }

    fn floats(&self, parts: SplitWhitespace, directive: &str) -> SceneResult<Vec<f32>> {
        parts
            .map(|part| {
                part.parse::<f32>()
                    .map_err(|_| self.error(format!("`{directive}` field `{part}` is not a number")))
            })
            .collect()
    }

    /// Reads one `v/vt/vn` corner, converting 1-based indices to 0-based.
    fn corner(&self, corner: &str) -> SceneResult<[usize; 3]> {
        let fields: Vec<&str> = corner.split('/').collect();
        if fields.len() != 3 {
            return Err(self.error(format!(
                "face corner `{corner}` must have the form vertex/uv/normal"
            )));
        }
        let mut indices = [0usize; 3];
        for (slot, field) in indices.iter_mut().zip(&fields) {
            let index = field
                .parse::<i64>()
                .map_err(|_| self.error(format!("face corner `{corner}` has a non-integer index")))?;
            if index < 1 {
                return Err(self.error(format!(
                    "face corner `{corner}` has index {index}; indices start at 1"
                )));
            }
            *slot = (index - 1) as usize;
        }
        Ok(indices)
    }
}

/// Parses the triangle-only OBJ subset.
///
/// `v` lines carry either a position or a position followed by an RGB color; vertices
/// without a color receive `fallback_color`. Any line that violates its field count, and
/// any face that is not a triangle, fails the whole parse.
pub fn parse_obj(text: &str, source: &str, fallback_color: Vec3) -> SceneResult<ObjData> {
    let mut mesh = RawMesh::default();
    let mut colors = vec![];
    let mut mtllib = None;
    let mut face_lines = vec![];

    for (number, line) in text.lines().enumerate() {
        let cursor = LineCursor {
            source,
            line: number + 1,
        };
        let mut parts = line.split_whitespace();
        let Some(line_id) = parts.next() else {
            continue;
        };
        match line_id {
            "v" => {
                let values = cursor.floats(parts, "v")?;
                match values.len() {
                    3 => colors.push(fallback_color),
                    6 => colors.push(Vector3::new(values[3], values[4], values[5])),
                    n if n < 3 => {
                        return Err(cursor.error(format!("`v` needs 3 coordinates, found {n}")))
                    }
                    n => {
                        return Err(cursor.error(format!(
                            "`v` takes 3 coordinates and an optional RGB color, found {n} fields"
                        )))
                    }
                }
                mesh.positions
                    .push(Vector3::new(values[0], values[1], values[2]));
            }
            "vt" => {
                let values = cursor.floats(parts, "vt")?;
                if values.len() != 2 {
                    return Err(cursor.error(format!(
                        "`vt` needs exactly 2 fields, found {}",
                        values.len()
                    )));
                }
                mesh.uvs.push(Vector2::new(values[0], values[1]));
            }
            "vn" => {
                let values = cursor.floats(parts, "vn")?;
                if values.len() != 3 {
                    return Err(cursor.error(format!(
                        "`vn` needs exactly 3 fields, found {}",
                        values.len()
                    )));
                }
                mesh.normals
                    .push(Vector3::new(values[0], values[1], values[2]));
            }
            "f" => {
                let corners: Vec<&str> = parts.collect();
                if corners.len() != 3 {
                    return Err(cursor.error(format!(
                        "only triangles are supported, face has {} corners",
                        corners.len()
                    )));
                }
                face_lines.push(cursor.line);
                for corner in corners {
                    let [vertex, uv, normal] = cursor.corner(corner)?;
                    mesh.vertex_indices.push(vertex);
                    mesh.texture_indices.push(uv);
                    mesh.normal_indices.push(normal);
                }
            }
            "mtllib" => {
                let path = file_name_argument(parts)
                    .ok_or_else(|| cursor.error("`mtllib` needs a file name"))?;
                mtllib = Some(path);
            }
            other => {
                if !other.starts_with('#') {
                    log::trace!("{source}:{}: ignoring `{other}`", cursor.line);
                }
            }
        }
    }

    check_bounds(&mesh, &face_lines, source)?;
    log::debug!(
        "{source}: {} positions, {} uvs, {} normals, {} triangles",
        mesh.positions.len(),
        mesh.uvs.len(),
        mesh.normals.len(),
        mesh.triangle_count()
    );

    Ok(ObjData {
        mesh,
        colors,
        mtllib,
    })
}

fn check_bounds(mesh: &RawMesh, face_lines: &[usize], source: &str) -> SceneResult<()> {
    let streams = [
        ("vertex", &mesh.vertex_indices, mesh.positions.len()),
        ("uv", &mesh.texture_indices, mesh.uvs.len()),
        ("normal", &mesh.normal_indices, mesh.normals.len()),
    ];
    for (kind, indices, len) in streams {
        if let Some(corner) = indices.iter().position(|&i| i >= len) {
            return Err(SceneError::malformed(
                source,
                face_lines[corner / 3],
                format!(
                    "face references {kind} {} but only {len} are defined",
                    indices[corner] + 1
                ),
            ));
        }
    }
    Ok(())
}
