use cgmath::{Deg, Matrix4, SquareMatrix, Vector2, Vector3, Vector4};
use regex::Regex;
use std::sync::OnceLock;

pub type Vec2 = Vector2<f32>;
pub type Vec3 = Vector3<f32>;
pub type Mat4 = Matrix4<f32>;

pub fn vec3(values: [f32; 3]) -> Vec3 {
    Vector3::new(values[0], values[1], values[2])
}

/// Composes `T · Rz · Ry · Rx · S`. Rotation angles are in degrees, so a vector is
/// rotated about X first, then Y, then Z.
pub fn compose_trs(translation: Vec3, rotation: Vec3, scale: Vec3) -> Mat4 {
    let mut model = Matrix4::identity();
    model = model * Matrix4::from_translation(translation);
    model = model * Matrix4::from_angle_z(Deg(rotation.z));
    model = model * Matrix4::from_angle_y(Deg(rotation.y));
    model = model * Matrix4::from_angle_x(Deg(rotation.x));
    model = model * Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z);
    model
}

pub fn transform_point(matrix: &Mat4, point: Vec3) -> Vec3 {
    (matrix * point.extend(1.0)).truncate()
}

pub fn transform_direction(matrix: &Mat4, direction: Vec3) -> Vec3 {
    (matrix * Vector4::new(direction.x, direction.y, direction.z, 0.0)).truncate()
}

fn hex_color_regex() -> &'static Regex {
    static HEX_COLOR: OnceLock<Regex> = OnceLock::new();
    HEX_COLOR.get_or_init(|| {
        Regex::new(r"^#([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$")
            .expect("hex color pattern is valid")
    })
}

/// Parses `#rrggbb` into a color with components in `0.0..=1.0`.
pub fn parse_hex_color(text: &str) -> Option<Vec3> {
    let captures = hex_color_regex().captures(text.trim())?;
    let channel = |i: usize| -> Option<f32> {
        let hex = captures.get(i)?.as_str();
        u8::from_str_radix(hex, 16).ok().map(|c| c as f32 / 255.0)
    };
    Some(Vector3::new(channel(1)?, channel(2)?, channel(3)?))
}
