use cgmath::Vector3;

use crate::math::Vec3;

/// Phong reflectance coefficients plus the texture names an MTL file references.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub ka: Vec3,
    pub kd: Vec3,
    pub ks: Vec3,
    /// Specular exponent.
    pub alpha: f32,
    pub texture_file: Option<String>,
    pub normal_map_file: Option<String>,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            ka: Vector3::new(0.5, 0.5, 0.5),
            kd: Vector3::new(0.5, 0.5, 0.5),
            ks: Vector3::new(0.2, 0.2, 0.2),
            alpha: 12.0,
            texture_file: None,
            normal_map_file: None,
        }
    }
}
