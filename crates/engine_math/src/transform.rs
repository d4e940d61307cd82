//! 3D transform owned by a game object.
//!
//! [`Transform`] represents position, rotation, and scale in 3D space.
//! Rotation is stored as Euler angles in degrees, which is what the rest of
//! the engine (rigidbody angular velocity, AI facing) works in.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Position, rotation (Euler angles in degrees), and scale in 3D space.
///
/// Every game object owns exactly one `Transform`. There is no parent/child
/// hierarchy; all transforms are world-space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Transform {
    /// World-space position.
    pub position: Vec3,
    /// Rotation as Euler angles, in degrees.
    pub rotation: Vec3,
    /// Per-axis scale factor.
    pub scale: Vec3,
}

impl Transform {
    /// The identity transform: origin, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Create a transform at the given position with default rotation/scale.
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Translate the transform by the given offset.
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Rotate the transform by the given Euler angles (degrees per axis).
    pub fn rotate(&mut self, angles: Vec3) {
        self.rotation += angles;
    }

    /// Reset the transform to identity.
    pub fn reset(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Compute the 4×4 model matrix for this transform.
    #[must_use]
    pub fn to_matrix(&self) -> glam::Mat4 {
        let rotation = glam::Quat::from_euler(
            glam::EulerRot::YXZ,
            self.rotation.y.to_radians(),
            self.rotation.x.to_radians(),
            self.rotation.z.to_radians(),
        );
        glam::Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::fmt::Display for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Transform[pos:({:.2}, {:.2}, {:.2}), rot:({:.2}, {:.2}, {:.2}), scale:({:.2}, {:.2}, {:.2})]",
            self.position.x,
            self.position.y,
            self.position.z,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
            self.scale.x,
            self.scale.y,
            self.scale.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_transform() {
        let t = Transform::IDENTITY;
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(Transform::default(), t);
    }

    #[test]
    fn test_from_position() {
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.scale, Vec3::ONE);
    }

    #[test]
    fn test_translate_accumulates() {
        let mut t = Transform::IDENTITY;
        t.translate(Vec3::new(5.0, 0.0, 0.0));
        t.translate(Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(t.position, Vec3::new(5.0, 1.0, 0.0));
    }

    #[test]
    fn test_rotate_accumulates() {
        let mut t = Transform::IDENTITY;
        t.rotate(Vec3::new(90.0, 0.0, 0.0));
        t.rotate(Vec3::new(45.0, 0.0, 0.0));
        assert_eq!(t.rotation, Vec3::new(135.0, 0.0, 0.0));
    }

    #[test]
    fn test_reset() {
        let mut t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        t.rotate(Vec3::new(0.0, 90.0, 0.0));
        t.reset();
        assert_eq!(t, Transform::IDENTITY);
    }

    #[test]
    fn test_matrix_identity() {
        let t = Transform::IDENTITY;
        assert_eq!(t.to_matrix(), glam::Mat4::IDENTITY);
    }
}
