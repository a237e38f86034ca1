//! Lighting types for the renderer.

use crate::math::vec3::Vec3;

/// A directional light that illuminates the scene uniformly from a direction.
///
/// Directional lights are ideal for simulating distant light sources like the sun,
/// where all rays are effectively parallel.
pub struct DirectionalLight {
    /// The normalized direction the light is pointing (not where it comes from).
    pub direction: Vec3,
    pub ambient_intensity: f32,
    /// Multiplier for the diffuse lighting contribution (default: 1.0)
    pub diffuse_strength: f32,
}

impl DirectionalLight {
    /// Create a new directional light pointing in the given direction.
    /// The direction will be normalized automatically.
    pub fn new(direction: Vec3) -> Self {
        DirectionalLight {
            direction: direction.normalize(),
            ambient_intensity: 0.1,
            diffuse_strength: 1.0,
        }
    }

    /// Calculate light intensity for flat shading.
    ///
    /// Returns intensity in [0.0, 1.0] range based on the angle between
    /// the surface normal and the light direction.
    pub fn intensity(&self, normal: Vec3) -> f32 {
        // Negate direction: light pointing at surface = positive dot product
        (-self.direction).dot(normal.normalize()).max(0.0)
    }

    /// Per-vertex shade used by the rasterizer: diffuse term plus ambient
    /// floor, saturated to 1.0.
    pub fn shade(&self, normal: Vec3) -> f32 {
        (self.intensity(normal) * self.diffuse_strength + self.ambient_intensity).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_illumination() {
        // Light pointing toward -Z, normal facing +Z (toward the light)
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, -1.0));
        let normal = Vec3::new(0.0, 0.0, 1.0);
        assert!((light.intensity(normal) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_no_illumination() {
        // Light pointing toward -Z, normal facing -Z (away from light)
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, -1.0));
        let normal = Vec3::new(0.0, 0.0, -1.0);
        assert!(light.intensity(normal) == 0.0);
    }

    #[test]
    fn test_shade_keeps_ambient_floor() {
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, -1.0));
        let away = Vec3::new(0.0, 0.0, -1.0);
        assert!((light.shade(away) - light.ambient_intensity).abs() < 1e-6);
    }

    #[test]
    fn test_shade_saturates() {
        let mut light = DirectionalLight::new(Vec3::new(0.0, 0.0, -1.0));
        light.diffuse_strength = 3.0;
        let facing = Vec3::new(0.0, 0.0, 1.0);
        assert_eq!(light.shade(facing), 1.0);
    }
}
