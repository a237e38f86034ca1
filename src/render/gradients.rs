//! Per-triangle attribute gradients.
//!
//! For each interpolated attribute the rasterizer needs the amount it
//! changes per screen-space x step and per y step. Attributes that must be
//! perspective-correct (texture coordinates) are premultiplied by 1/w so
//! they interpolate linearly in screen space; the per-pixel divide happens
//! in the scanline loop.

use crate::light::DirectionalLight;
use crate::vertex::Vertex;

const MIN: usize = 0;
const MID: usize = 1;
const MAX: usize = 2;

pub struct Gradients {
    pub one_over_z: [f32; 3],
    pub depth: [f32; 3],
    pub tex_coord_x: [f32; 3],
    pub tex_coord_y: [f32; 3],
    pub light_amt: [f32; 3],

    pub one_over_z_x_step: f32,
    pub one_over_z_y_step: f32,
    pub depth_x_step: f32,
    pub depth_y_step: f32,
    pub tex_coord_x_x_step: f32,
    pub tex_coord_x_y_step: f32,
    pub tex_coord_y_x_step: f32,
    pub tex_coord_y_y_step: f32,
    pub light_amt_x_step: f32,
    pub light_amt_y_step: f32,
}

impl Gradients {
    /// Computes gradients for a y-sorted triangle, or `None` when the
    /// triangle is degenerate in screen space.
    pub fn new(
        min_y: &Vertex,
        mid_y: &Vertex,
        max_y: &Vertex,
        light: &DirectionalLight,
    ) -> Option<Self> {
        let x = [min_y.position.x, mid_y.position.x, max_y.position.x];
        let y = [min_y.position.y, mid_y.position.y, max_y.position.y];

        let denom = (x[MID] - x[MAX]) * (y[MIN] - y[MAX]) - (x[MIN] - x[MAX]) * (y[MID] - y[MAX]);
        if denom == 0.0 {
            return None;
        }
        let one_over_dx = 1.0 / denom;
        let one_over_dy = -one_over_dx;

        // w is the view-space depth after the projective transform.
        let one_over_z = [
            1.0 / min_y.position.w,
            1.0 / mid_y.position.w,
            1.0 / max_y.position.w,
        ];
        let depth = [min_y.position.z, mid_y.position.z, max_y.position.z];
        let tex_coord_x = [
            min_y.tex_coord.x * one_over_z[MIN],
            mid_y.tex_coord.x * one_over_z[MID],
            max_y.tex_coord.x * one_over_z[MAX],
        ];
        let tex_coord_y = [
            min_y.tex_coord.y * one_over_z[MIN],
            mid_y.tex_coord.y * one_over_z[MID],
            max_y.tex_coord.y * one_over_z[MAX],
        ];
        let light_amt = [
            light.shade(min_y.normal),
            light.shade(mid_y.normal),
            light.shade(max_y.normal),
        ];

        let steps = |values: &[f32; 3]| {
            let x_step = ((values[MID] - values[MAX]) * (y[MIN] - y[MAX])
                - (values[MIN] - values[MAX]) * (y[MID] - y[MAX]))
                * one_over_dx;
            let y_step = ((values[MID] - values[MAX]) * (x[MIN] - x[MAX])
                - (values[MIN] - values[MAX]) * (x[MID] - x[MAX]))
                * one_over_dy;
            (x_step, y_step)
        };

        let (one_over_z_x_step, one_over_z_y_step) = steps(&one_over_z);
        let (depth_x_step, depth_y_step) = steps(&depth);
        let (tex_coord_x_x_step, tex_coord_x_y_step) = steps(&tex_coord_x);
        let (tex_coord_y_x_step, tex_coord_y_y_step) = steps(&tex_coord_y);
        let (light_amt_x_step, light_amt_y_step) = steps(&light_amt);

        Some(Self {
            one_over_z,
            depth,
            tex_coord_x,
            tex_coord_y,
            light_amt,
            one_over_z_x_step,
            one_over_z_y_step,
            depth_x_step,
            depth_y_step,
            tex_coord_x_x_step,
            tex_coord_x_y_step,
            tex_coord_y_x_step,
            tex_coord_y_y_step,
            light_amt_x_step,
            light_amt_y_step,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{vec2::Vec2, vec3::Vec3, vec4::Vec4};
    use approx::assert_relative_eq;

    fn vert(x: f32, y: f32, u: f32, v: f32) -> Vertex {
        Vertex::new(Vec4::new(x, y, 0.5, 1.0), Vec2::new(u, v), Vec3::UP)
    }

    fn flat_light() -> DirectionalLight {
        DirectionalLight::new(Vec3::new(0.0, -1.0, 0.0))
    }

    #[test]
    fn degenerate_triangle_is_rejected() {
        let a = vert(0.0, 0.0, 0.0, 0.0);
        let b = vert(5.0, 5.0, 0.0, 0.0);
        let c = vert(10.0, 10.0, 0.0, 0.0);
        assert!(Gradients::new(&a, &b, &c, &flat_light()).is_none());
    }

    #[test]
    fn tex_coord_gradient_matches_linear_ramp() {
        // u ramps 0 -> 1 across 10 pixels in x, w = 1 everywhere.
        let a = vert(0.0, 0.0, 0.0, 0.0);
        let b = vert(0.0, 10.0, 0.0, 0.0);
        let c = vert(10.0, 0.0, 1.0, 0.0);
        let g = Gradients::new(&a, &b, &c, &flat_light()).unwrap();
        assert_relative_eq!(g.tex_coord_x_x_step, 0.1, epsilon = 1e-6);
        assert_relative_eq!(g.tex_coord_x_y_step, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn depth_gradient_follows_z() {
        let mut a = vert(0.0, 0.0, 0.0, 0.0);
        let mut b = vert(0.0, 10.0, 0.0, 0.0);
        let mut c = vert(10.0, 0.0, 0.0, 0.0);
        a.position.z = 0.0;
        b.position.z = 0.0;
        c.position.z = 1.0;
        let g = Gradients::new(&a, &b, &c, &flat_light()).unwrap();
        assert_relative_eq!(g.depth_x_step, 0.1, epsilon = 1e-6);
        assert_relative_eq!(g.depth_y_step, 0.0, epsilon = 1e-6);
    }
}
