use cgmath::{Deg, EuclideanSpace, Matrix4, Point3, Vector3};

use crate::math::{Mat4, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    /// Vertical field of view in degrees.
    Perspective { fov: f32 },
    Orthographic,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub projection: Projection,
    pub position: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
}

impl Camera {
    pub fn new() -> Camera {
        Camera {
            projection: Projection::Perspective { fov: 45.0 },
            position: Vector3::new(0.0, 0.0, 5.0),
            look_at: Vector3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
        }
    }

    pub fn get_view_matrix(&self) -> Mat4 {
        Matrix4::look_at_rh(
            Point3::from_vec(self.position),
            Point3::from_vec(self.look_at),
            self.up,
        )
    }

    pub fn get_projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        match self.projection {
            Projection::Perspective { fov } => {
                cgmath::perspective(Deg(fov), aspect_ratio, 0.01, 100.0)
            }
            Projection::Orthographic => {
                cgmath::ortho(-aspect_ratio, aspect_ratio, -1.0, 1.0, 0.01, 100.0)
            }
        }
    }
}

impl Default for Camera {
    fn default() -> Camera {
        Camera::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::transform_point;
    use cgmath::InnerSpace;

    #[test]
    fn view_matrix_moves_eye_to_origin() {
        let camera = Camera {
            position: Vector3::new(0.0, 2.0, 10.0),
            look_at: Vector3::new(0.0, 2.0, 0.0),
            ..Camera::new()
        };
        let view = camera.get_view_matrix();
        let eye = transform_point(&view, camera.position);
        assert!(eye.magnitude() < 1e-5);
        let target = transform_point(&view, camera.look_at);
        assert!((target - Vector3::new(0.0, 0.0, -10.0)).magnitude() < 1e-5);
    }

    #[test]
    fn orthographic_keeps_unit_square() {
        let camera = Camera {
            projection: Projection::Orthographic,
            ..Camera::new()
        };
        let projection = camera.get_projection_matrix(1.0);
        let corner = transform_point(&projection, Vector3::new(1.0, 1.0, -1.0));
        assert!((corner.x - 1.0).abs() < 1e-5);
        assert!((corner.y - 1.0).abs() < 1e-5);
    }
}
