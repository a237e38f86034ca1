//! Transform component for 3D objects.
//!
//! Provides a [`Transform`] struct with a fluent API for managing position,
//! rotation (quaternion), and scale.

use crate::math::{mat4::Mat4, quat::Quat, vec3::Vec3};

/// A 3D transform with position, quaternion rotation, and scale.
///
/// Mutating methods return `&mut Self` for chaining:
///
/// ```ignore
/// transform
///     .set_position_xyz(5.0, 2.0, 0.0)
///     .rotate(Quat::from_axis_angle(Vec3::UP, 0.1))
///     .set_scale_uniform(2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with default values (position=0, rotation=identity, scale=1).
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Set the position.
    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    /// Set the position from x, y, z components.
    pub fn set_position_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    /// Translate by a delta vector.
    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        self.position = self.position + delta;
        self
    }

    /// Get the rotation.
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Set the rotation.
    pub fn set_rotation(&mut self, rotation: Quat) -> &mut Self {
        self.rotation = rotation;
        self
    }

    /// Apply `delta` on top of the current rotation.
    ///
    /// Composition is world-space: the delta is applied after the existing
    /// rotation. The result is renormalized to keep drift in check.
    pub fn rotate(&mut self, delta: Quat) -> &mut Self {
        self.rotation = (delta * self.rotation).normalized();
        self
    }

    /// Rotate `angle` radians around a world-space axis.
    pub fn rotate_axis(&mut self, axis: Vec3, angle: f32) -> &mut Self {
        self.rotate(Quat::from_axis_angle(axis, angle))
    }

    /// Orient the transform so its forward axis points at `target`.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) -> &mut Self {
        let rotation = self.look_at_rotation(target, up);
        self.rotation = rotation;
        self
    }

    /// The rotation that would face this transform toward `target`.
    pub fn look_at_rotation(&self, target: Vec3, up: Vec3) -> Quat {
        let direction = (target - self.position).normalize();
        Quat::from_rotation_matrix(&Mat4::rotation_toward(direction, up))
    }

    /// Get the scale.
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Set the scale.
    pub fn set_scale(&mut self, scale: Vec3) -> &mut Self {
        self.scale = scale;
        self
    }

    /// Set uniform scale (same value for x, y, z).
    pub fn set_scale_uniform(&mut self, s: f32) -> &mut Self {
        self.scale = Vec3::new(s, s, s);
        self
    }

    /// Generate the transformation matrix.
    ///
    /// Order: Translation * Rotation * Scale
    /// (scale applied first, then rotation, then translation)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::translation(self.position.x, self.position.y, self.position.z)
            * self.rotation.to_rotation_matrix()
            * Mat4::scaling(self.scale.x, self.scale.y, self.scale.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec4::Vec4;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_default() {
        let t = Transform::default();
        assert_eq!(t.position(), Vec3::ZERO);
        assert_eq!(t.rotation(), Quat::IDENTITY);
        assert_eq!(t.scale(), Vec3::ONE);
        assert_eq!(t.to_matrix(), Mat4::identity());
    }

    #[test]
    fn test_fluent_api() {
        let mut t = Transform::new();
        t.set_position_xyz(1.0, 2.0, 3.0)
            .rotate_axis(Vec3::UP, 0.5)
            .set_scale_uniform(2.0);

        assert_eq!(t.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.scale(), Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_matrix_applies_scale_before_translation() {
        let mut t = Transform::new();
        t.set_position_xyz(10.0, 0.0, 0.0).set_scale_uniform(2.0);
        let v = t.to_matrix() * Vec4::point(1.0, 0.0, 0.0);
        assert_relative_eq!(v.x, 12.0);
    }

    #[test]
    fn test_look_at_faces_target() {
        let mut t = Transform::new();
        t.set_position_xyz(0.0, 0.0, -5.0)
            .look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::UP);
        let f = t.rotation().forward();
        assert_relative_eq!(f.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(f.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(f.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_rotate_composes_in_world_space() {
        let mut t = Transform::new();
        t.rotate_axis(Vec3::UP, FRAC_PI_2)
            .rotate_axis(Vec3::UP, FRAC_PI_2);
        let f = t.rotation().forward();
        assert_relative_eq!(f.z, -1.0, epsilon = 1e-5);
    }
}
