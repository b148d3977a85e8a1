
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: glam::Vec3,
    pub rotation: glam::Quat,
    pub scale:    glam::Vec3,
}

// Constants
impl Transform {
    pub const IDENTITY: Self = Self {
        position: glam::Vec3::ZERO,
        rotation: glam::Quat::IDENTITY,
        scale:    glam::Vec3::ONE,
    };
}

// Factories
impl Transform {
    pub fn from_position(position: glam::Vec3) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    /// Placement at `position` oriented so that local -Z points at `target`.
    pub fn looking_at(position: glam::Vec3, target: glam::Vec3) -> Self {
        let view = glam::Mat4::look_at_rh(position, target, glam::Vec3::Y);
        Self {
            position,
            rotation: glam::Quat::from_mat4(&view.inverse()),
            ..Self::IDENTITY
        }
    }
}

// Getters
impl Transform {
    #[inline]
    pub fn as_mat(&self) -> glam::Mat4 {
        glam::Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

// Builders
impl Transform {
    pub fn with_position(&self, position: glam::Vec3) -> Self {
        Self { position, ..*self }
    }
    pub fn with_rotation(&self, rotation: glam::Quat) -> Self {
        Self { rotation, ..*self }
    }
}

impl Default for Transform {
    fn default() -> Self { Self::IDENTITY }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looking_at_points_forward_axis_to_target() {
        let t = Transform::looking_at(glam::vec3(1.0, 1.0, 2.0), glam::Vec3::ZERO);
        let forward = t.rotation * glam::Vec3::NEG_Z;
        let expected = (glam::Vec3::ZERO - t.position).normalize();
        assert!(forward.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn matrix_translates_origin_to_position() {
        let t = Transform::from_position(glam::vec3(3.0, -1.0, 0.5));
        let p = t.as_mat().transform_point3(glam::Vec3::ZERO);
        assert!(p.abs_diff_eq(t.position, 1e-6));
    }
}
