use crate::math::{transform_point, Mat4, Vec3};

#[derive(Clone, Debug, PartialEq)]
pub struct PointLight {
    /// Position in the node's local space.
    pub position: Vec3,
    /// Diffuse intensity.
    pub id: Vec3,
    /// Specular intensity.
    pub is: Vec3,
    /// Distance falloff coefficient.
    pub k: f32,
}

impl PointLight {
    pub fn world_position(&self, world: &Mat4) -> Vec3 {
        transform_point(world, self.position)
    }
}
