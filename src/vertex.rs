//! A mesh vertex as it flows through the pipeline.
//!
//! The same type carries a vertex from model space through clip space to
//! screen space; only the interpretation of `position` changes along the way.

use crate::math::{mat4::Mat4, vec2::Vec2, vec3::Vec3, vec4::Vec4};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: Vec4,
    pub tex_coord: Vec2,
    pub normal: Vec3,
}

impl Vertex {
    pub const fn new(position: Vec4, tex_coord: Vec2, normal: Vec3) -> Self {
        Self {
            position,
            tex_coord,
            normal,
        }
    }

    /// Returns a fresh vertex with the position mapped by `transform` and
    /// the normal mapped by `normal_transform` and renormalized.
    ///
    /// Producing a new value rather than mutating keeps vertices shareable
    /// across threads drawing different triangles.
    pub fn transformed(&self, transform: &Mat4, normal_transform: &Mat4) -> Self {
        let position = *transform * self.position;
        let normal = (*normal_transform
            * Vec4::direction(self.normal.x, self.normal.y, self.normal.z))
        .to_vec3()
        .normalize();

        Self::new(position, self.tex_coord, normal)
    }

    /// Maps only the position, leaving attributes untouched.
    pub fn transform_position(&self, transform: &Mat4) -> Self {
        Self::new(*transform * self.position, self.tex_coord, self.normal)
    }

    /// Divides x, y, z by w, keeping w for perspective-correct
    /// interpolation later.
    pub fn perspective_divide(&self) -> Self {
        let p = self.position;
        Self::new(
            Vec4::new(p.x / p.w, p.y / p.w, p.z / p.w, p.w),
            self.tex_coord,
            self.normal,
        )
    }

    /// Signed doubled area of the screen-space triangle (self, b, c).
    ///
    /// Positive for one winding, negative for the other; the rasterizer uses
    /// the sign for backface culling and handedness.
    pub fn triangle_area_doubled(&self, b: &Vertex, c: &Vertex) -> f32 {
        let x1 = b.position.x - self.position.x;
        let y1 = b.position.y - self.position.y;

        let x2 = c.position.x - self.position.x;
        let y2 = c.position.y - self.position.y;

        x1 * y2 - x2 * y1
    }

    /// Interpolates position and all attributes toward `other`.
    pub fn lerp(&self, other: &Vertex, t: f32) -> Self {
        Self::new(
            self.position.lerp(other.position, t),
            self.tex_coord.lerp(other.tex_coord, t),
            self.normal.lerp(other.normal, t),
        )
    }

    /// True when the clip-space position lies inside the view frustum on
    /// all three axes.
    pub fn is_inside_frustum(&self) -> bool {
        let w = self.position.w.abs();
        self.position.x.abs() <= w && self.position.y.abs() <= w && self.position.z.abs() <= w
    }

    /// Position component by axis index: 0 = x, 1 = y, 2 = z, anything
    /// else = w.
    pub fn component(&self, index: usize) -> f32 {
        match index {
            0 => self.position.x,
            1 => self.position.y,
            2 => self.position.z,
            _ => self.position.w,
        }
    }
}
