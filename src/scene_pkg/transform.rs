use cgmath::Vector3;

use crate::math::{compose_trs, Mat4, Vec3};

/// Parent-relative placement of a scene node. Rotation is in degrees per axis.
#[derive(Clone, Debug, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Transform {
        Transform {
            translation: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Transform {
        Transform {
            translation,
            ..Transform::default()
        }
    }

    pub fn local_matrix(&self) -> Mat4 {
        compose_trs(self.translation, self.rotation, self.scale)
    }
}
