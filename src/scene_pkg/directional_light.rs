use crate::math::{transform_direction, Mat4, Vec3};

#[derive(Clone, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Direction the light travels, in the node's local space.
    pub direction: Vec3,
    /// Diffuse intensity.
    pub id: Vec3,
    /// Specular intensity.
    pub is: Vec3,
}

impl DirectionalLight {
    pub fn world_direction(&self, world: &Mat4) -> Vec3 {
        transform_direction(world, self.direction)
    }
}
