use glam::{EulerRot, Mat4, Quat, Vec3};

/// Position / Euler rotation (XYZ, radians) / scale of an object.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn quaternion(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Local-to-world matrix: translate · rotate · scale.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quaternion(), self.position)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn default_is_identity() {
        assert_eq!(Transform::default().matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn position_translates_points() {
        let t = Transform {
            position: Vec3::new(0.0, 1.5, 0.0),
            ..Transform::default()
        };
        assert_eq!(t.matrix().transform_point3(Vec3::ZERO), Vec3::new(0.0, 1.5, 0.0));
    }

    #[test]
    fn y_rotation_turns_x_towards_negative_z() {
        let t = Transform {
            rotation: Vec3::new(0.0, FRAC_PI_2, 0.0),
            ..Transform::default()
        };
        let p = t.matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }
}
