//! 4x4 transformation matrix.
//!
//! # Convention
//! - Storage is `data[row][col]`, row-major.
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//! - The coordinate system is left-handed; the camera looks down +Z.

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Mat4 {
    pub fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a scale matrix.
    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation of `angle` radians around an arbitrary unit axis
    /// (Rodrigues closed form).
    pub fn rotation_axis_angle(axis: Vec3, angle: f32) -> Self {
        let (x, y, z) = (axis.x, axis.y, axis.z);
        let s = angle.sin();
        let c = angle.cos();
        let t = 1.0 - c;

        Mat4::new([
            [c + x * x * t, x * y * t - z * s, x * z * t + y * s, 0.0],
            [y * x * t + z * s, c + y * y * t, y * z * t - x * s, 0.0],
            [z * x * t - y * s, z * y * t + x * s, c + z * z * t, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Euler rotation composed as `Rz * Ry * Rx` (x applied first).
    pub fn rotation_euler(x: f32, y: f32, z: f32) -> Self {
        let rx = Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, x.cos(), -x.sin(), 0.0],
            [0.0, x.sin(), x.cos(), 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let ry = Mat4::new([
            [y.cos(), 0.0, -y.sin(), 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [y.sin(), 0.0, y.cos(), 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let rz = Mat4::new([
            [z.cos(), -z.sin(), 0.0, 0.0],
            [z.sin(), z.cos(), 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        rz * ry * rx
    }

    /// Rotation whose rows are the given orthonormal basis vectors.
    pub fn rotation_from_basis(forward: Vec3, up: Vec3, right: Vec3) -> Self {
        Mat4::new([
            [right.x, right.y, right.z, 0.0],
            [up.x, up.y, up.z, 0.0],
            [forward.x, forward.y, forward.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation aligning +Z with `forward`, deriving an orthonormal basis
    /// from the provided up hint.
    pub fn rotation_toward(forward: Vec3, up: Vec3) -> Self {
        let f = forward.normalize();
        let r = up.normalize().cross(f).normalize();
        let u = f.cross(r);
        Self::rotation_from_basis(f, u, r)
    }

    /// Left-handed perspective projection.
    ///
    /// Maps view-space z in [near, far] to clip z in [-w, w]; the clip-space
    /// w component equals view-space z.
    pub fn perspective(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        let tan_half_fov = (fov_y / 2.0).tan();
        let z_range = z_near - z_far;

        Mat4::new([
            [1.0 / (tan_half_fov * aspect_ratio), 0.0, 0.0, 0.0],
            [0.0, 1.0 / tan_half_fov, 0.0, 0.0],
            [
                0.0,
                0.0,
                (-z_near - z_far) / z_range,
                2.0 * z_far * z_near / z_range,
            ],
            [0.0, 0.0, 1.0, 0.0],
        ])
    }

    /// Orthographic projection from the six clip-box extents.
    pub fn orthographic(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let width = right - left;
        let height = top - bottom;
        let depth = far - near;

        Mat4::new([
            [2.0 / width, 0.0, 0.0, -(right + left) / width],
            [0.0, 2.0 / height, 0.0, -(top + bottom) / height],
            [0.0, 0.0, -2.0 / depth, -(far + near) / depth],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Maps clip-space x,y in [-1, 1] to pixel coordinates.
    ///
    /// Row 0 of the image is the top of the screen, so y is flipped. The
    /// half-pixel offset centers the mapping on pixel centers.
    pub fn screen_space(half_width: f32, half_height: f32) -> Self {
        Mat4::new([
            [half_width, 0.0, 0.0, half_width - 0.5],
            [0.0, -half_height, 0.0, half_height - 0.5],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Apply the linear map to a vector, writing into `out`.
    ///
    /// In-place variant of `Mat4 * Vec4` for hot loops that want to avoid
    /// constructing intermediates.
    #[inline]
    pub fn transform_into(&self, v: Vec4, out: &mut Vec4) {
        let m = &self.data;
        out.x = m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z + m[0][3] * v.w;
        out.y = m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z + m[1][3] * v.w;
        out.z = m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z + m[2][3] * v.w;
        out.w = m[3][0] * v.x + m[3][1] * v.y + m[3][2] * v.z + m[3][3] * v.w;
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// For column vectors, `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for row in 0..4 {
            for col in 0..4 {
                result[row][col] = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        let mut out = Vec4::ZERO;
        self.transform_into(v, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn identity_preserves_vector() {
        let v = Vec4::new(1.0, -2.0, 3.0, 1.0);
        assert_eq!(Mat4::identity() * v, v);
    }

    #[test]
    fn translation_only_moves_points() {
        let m = Mat4::translation(1.0, 2.0, 3.0);
        assert_eq!(m * Vec4::point(0.0, 0.0, 0.0), Vec4::point(1.0, 2.0, 3.0));
        // Directions (w=0) are unaffected by translation.
        let d = Vec4::direction(1.0, 0.0, 0.0);
        assert_eq!(m * d, d);
    }

    #[test]
    fn axis_angle_quarter_turn_about_y() {
        let m = Mat4::rotation_axis_angle(Vec3::UP, FRAC_PI_2);
        let v = m * Vec4::point(1.0, 0.0, 0.0);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn composition_applies_right_to_left() {
        let t = Mat4::translation(1.0, 0.0, 0.0);
        let s = Mat4::scaling(2.0, 2.0, 2.0);
        // scale first, then translate
        let v = (t * s) * Vec4::point(1.0, 0.0, 0.0);
        assert_eq!(v, Vec4::point(3.0, 0.0, 0.0));
    }

    #[test]
    fn perspective_maps_near_and_far_to_clip_extents() {
        let m = Mat4::perspective(FRAC_PI_4, 1.0, 1.0, 10.0);
        let near = m * Vec4::point(0.0, 0.0, 1.0);
        let far = m * Vec4::point(0.0, 0.0, 10.0);
        assert_relative_eq!(near.z / near.w, -1.0, epsilon = 1e-5);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-5);
        // Clip w is view-space z.
        assert_relative_eq!(near.w, 1.0);
        assert_relative_eq!(far.w, 10.0);
    }

    #[test]
    fn screen_space_maps_ndc_corners_to_pixel_centers() {
        let m = Mat4::screen_space(50.0, 50.0);
        let top_left = m * Vec4::point(-1.0, 1.0, 0.0);
        let bottom_right = m * Vec4::point(1.0, -1.0, 0.0);
        assert_relative_eq!(top_left.x, -0.5);
        assert_relative_eq!(top_left.y, -0.5);
        assert_relative_eq!(bottom_right.x, 99.5);
        assert_relative_eq!(bottom_right.y, 99.5);
    }

    #[test]
    fn orthographic_maps_box_to_unit_cube() {
        let m = Mat4::orthographic(-2.0, 2.0, -1.0, 1.0, 0.0, 10.0);
        let v = m * Vec4::point(2.0, 1.0, 10.0);
        assert_relative_eq!(v.x, 1.0);
        assert_relative_eq!(v.y, 1.0);
        assert_relative_eq!(v.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn transform_into_matches_mul() {
        let m = Mat4::rotation_euler(0.3, -0.2, 0.9) * Mat4::translation(1.0, 2.0, 3.0);
        let v = Vec4::point(0.5, -1.5, 2.5);
        let mut out = Vec4::ZERO;
        m.transform_into(v, &mut out);
        assert_eq!(out, m * v);
    }
}
