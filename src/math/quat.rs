//! Unit quaternion for 3D rotations.
//!
//! Rotations compose by multiplication, right-to-left like matrices.
//! A quaternion and its negation encode the same rotation; the shortest-path
//! interpolation helpers account for that.

use std::ops::{Add, Mul, Sub};

use super::mat4::Mat4;
use super::vec3::Vec3;
use super::NEAR_ZERO;

/// When two quaternions are this close to parallel, slerp falls back to
/// nlerp so the 1/sin term stays well conditioned.
const SLERP_PARALLEL_TOLERANCE: f32 = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quat {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians around a unit axis.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let sin_half = (angle / 2.0).sin();
        let cos_half = (angle / 2.0).cos();

        Self::new(
            axis.x * sin_half,
            axis.y * sin_half,
            axis.z * sin_half,
            cos_half,
        )
    }

    /// Extracts the rotation from the upper-left 3x3 of a rotation matrix
    /// (Shepperd's method). The result is normalized.
    pub fn from_rotation_matrix(rot: &Mat4) -> Self {
        let trace = rot.get(0, 0) + rot.get(1, 1) + rot.get(2, 2);

        let q = if trace > 0.0 {
            let s = 0.5 / (trace + 1.0).sqrt();
            Self::new(
                (rot.get(1, 2) - rot.get(2, 1)) * s,
                (rot.get(2, 0) - rot.get(0, 2)) * s,
                (rot.get(0, 1) - rot.get(1, 0)) * s,
                0.25 / s,
            )
        } else if rot.get(0, 0) > rot.get(1, 1) && rot.get(0, 0) > rot.get(2, 2) {
            let s = 2.0 * (1.0 + rot.get(0, 0) - rot.get(1, 1) - rot.get(2, 2)).sqrt();
            Self::new(
                0.25 * s,
                (rot.get(1, 0) + rot.get(0, 1)) / s,
                (rot.get(2, 0) + rot.get(0, 2)) / s,
                (rot.get(1, 2) - rot.get(2, 1)) / s,
            )
        } else if rot.get(1, 1) > rot.get(2, 2) {
            let s = 2.0 * (1.0 + rot.get(1, 1) - rot.get(0, 0) - rot.get(2, 2)).sqrt();
            Self::new(
                (rot.get(1, 0) + rot.get(0, 1)) / s,
                0.25 * s,
                (rot.get(2, 1) + rot.get(1, 2)) / s,
                (rot.get(2, 0) - rot.get(0, 2)) / s,
            )
        } else {
            let s = 2.0 * (1.0 + rot.get(2, 2) - rot.get(0, 0) - rot.get(1, 1)).sqrt();
            Self::new(
                (rot.get(2, 0) + rot.get(0, 2)) / s,
                (rot.get(1, 2) + rot.get(2, 1)) / s,
                0.25 * s,
                (rot.get(0, 1) - rot.get(1, 0)) / s,
            )
        };

        q.normalized()
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Unit quaternion, falling back to identity for a zero-length input.
    pub fn normalized(&self) -> Self {
        let len_sq = self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w;
        if len_sq < NEAR_ZERO {
            return Self::IDENTITY;
        }
        let inv = 1.0 / len_sq.sqrt();
        Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
    }

    /// The inverse rotation (for unit quaternions).
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    fn scale(&self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s, self.w * s)
    }

    /// Hamilton product with a pure-vector quaternion on the right.
    fn mul_vec(&self, r: Vec3) -> Self {
        Self::new(
            self.w * r.x + self.y * r.z - self.z * r.y,
            self.w * r.y + self.z * r.x - self.x * r.z,
            self.w * r.z + self.x * r.y - self.y * r.x,
            -self.x * r.x - self.y * r.y - self.z * r.z,
        )
    }

    /// Rotates a vector by this quaternion (`q * v * q^-1`).
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let r = self.mul_vec(v) * self.conjugate();
        Vec3::new(r.x, r.y, r.z)
    }

    /// The local +Z axis after rotation.
    pub fn forward(&self) -> Vec3 {
        self.rotate(Vec3::FORWARD)
    }

    /// The local +Y axis after rotation.
    pub fn up(&self) -> Vec3 {
        self.rotate(Vec3::UP)
    }

    /// The local +X axis after rotation.
    pub fn right(&self) -> Vec3 {
        self.rotate(Vec3::RIGHT)
    }

    /// Expands the rotation into a 4x4 matrix acting on column vectors.
    pub fn to_rotation_matrix(&self) -> Mat4 {
        let (x, y, z, w) = (self.x, self.y, self.z, self.w);

        let forward = Vec3::new(
            2.0 * (x * z - w * y),
            2.0 * (y * z + w * x),
            1.0 - 2.0 * (x * x + y * y),
        );
        let up = Vec3::new(
            2.0 * (x * y + w * z),
            1.0 - 2.0 * (x * x + z * z),
            2.0 * (y * z - w * x),
        );
        let right = Vec3::new(
            1.0 - 2.0 * (y * y + z * z),
            2.0 * (x * y - w * z),
            2.0 * (x * z + w * y),
        );

        Mat4::rotation_from_basis(forward, up, right)
    }

    /// Normalized linear interpolation. With `shortest`, the destination is
    /// negated when the quaternions lie in opposite hemispheres.
    pub fn nlerp(&self, dest: Self, t: f32, shortest: bool) -> Self {
        let corrected = if shortest && self.dot(dest) < 0.0 {
            dest.scale(-1.0)
        } else {
            dest
        };

        ((corrected - *self).scale(t) + *self).normalized()
    }

    /// Spherical linear interpolation, constant angular velocity.
    pub fn slerp(&self, dest: Self, t: f32, shortest: bool) -> Self {
        let mut cos = self.dot(dest);
        let corrected = if shortest && cos < 0.0 {
            cos = -cos;
            dest.scale(-1.0)
        } else {
            dest
        };

        if cos.abs() >= 1.0 - SLERP_PARALLEL_TOLERANCE {
            return self.nlerp(corrected, t, false);
        }

        let sin = (1.0 - cos * cos).sqrt();
        let angle = sin.atan2(cos);
        let inv_sin = 1.0 / sin;

        let src_factor = (((1.0 - t) * angle).sin()) * inv_sin;
        let dest_factor = ((t * angle).sin()) * inv_sin;

        self.scale(src_factor) + corrected.scale(dest_factor)
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Hamilton product; `a * b` applies `b` first, then `a`.
impl Mul<Quat> for Quat {
    type Output = Quat;

    fn mul(self, r: Quat) -> Self::Output {
        Quat::new(
            self.x * r.w + self.w * r.x + self.y * r.z - self.z * r.y,
            self.y * r.w + self.w * r.y + self.z * r.x - self.x * r.z,
            self.z * r.w + self.w * r.z + self.x * r.y - self.y * r.x,
            self.w * r.w - self.x * r.x - self.y * r.y - self.z * r.z,
        )
    }
}

impl Add<Quat> for Quat {
    type Output = Quat;

    fn add(self, r: Quat) -> Self::Output {
        Quat::new(self.x + r.x, self.y + r.y, self.z + r.z, self.w + r.w)
    }
}

impl Sub<Quat> for Quat {
    type Output = Quat;

    fn sub(self, r: Quat) -> Self::Output {
        Quat::new(self.x - r.x, self.y - r.y, self.z - r.z, self.w - r.w)
    }
}
