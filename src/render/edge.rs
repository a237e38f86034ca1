//! Edge walker for the scanline rasterizer.
//!
//! An `Edge` tracks the x intercept and interpolated attributes of one
//! triangle edge as the scanline moves down the screen. Pixel centers live
//! on the integer grid, so both ends are prestepped from the exact vertex
//! positions to the first covered row.

use super::gradients::Gradients;
use crate::vertex::Vertex;

pub struct Edge {
    x: f32,
    x_step: f32,
    y_start: i32,
    y_end: i32,

    one_over_z: f32,
    one_over_z_step: f32,
    tex_coord_x: f32,
    tex_coord_x_step: f32,
    tex_coord_y: f32,
    tex_coord_y_step: f32,
    depth: f32,
    depth_step: f32,
    light_amt: f32,
    light_amt_step: f32,
}

impl Edge {
    /// Builds the walker for the edge from `top` to `bottom`.
    ///
    /// `top_index` selects which of the gradient's three vertices `top`
    /// is (0 = min-y, 1 = mid-y), so attribute starts read the right slot.
    pub fn new(gradients: &Gradients, top: &Vertex, bottom: &Vertex, top_index: usize) -> Self {
        let y_start = top.position.y.ceil() as i32;
        let y_end = bottom.position.y.ceil() as i32;

        let y_dist = bottom.position.y - top.position.y;
        let x_dist = bottom.position.x - top.position.x;

        let y_prestep = y_start as f32 - top.position.y;
        let x_step = x_dist / y_dist;
        let x = top.position.x + y_prestep * x_step;
        let x_prestep = x - top.position.x;

        let start = |values: &[f32; 3], x_stp: f32, y_stp: f32| {
            values[top_index] + y_stp * y_prestep + x_stp * x_prestep
        };
        let step = |x_stp: f32, y_stp: f32| y_stp + x_stp * x_step;

        Self {
            x,
            x_step,
            y_start,
            y_end,
            one_over_z: start(
                &gradients.one_over_z,
                gradients.one_over_z_x_step,
                gradients.one_over_z_y_step,
            ),
            one_over_z_step: step(gradients.one_over_z_x_step, gradients.one_over_z_y_step),
            tex_coord_x: start(
                &gradients.tex_coord_x,
                gradients.tex_coord_x_x_step,
                gradients.tex_coord_x_y_step,
            ),
            tex_coord_x_step: step(gradients.tex_coord_x_x_step, gradients.tex_coord_x_y_step),
            tex_coord_y: start(
                &gradients.tex_coord_y,
                gradients.tex_coord_y_x_step,
                gradients.tex_coord_y_y_step,
            ),
            tex_coord_y_step: step(gradients.tex_coord_y_x_step, gradients.tex_coord_y_y_step),
            depth: start(
                &gradients.depth,
                gradients.depth_x_step,
                gradients.depth_y_step,
            ),
            depth_step: step(gradients.depth_x_step, gradients.depth_y_step),
            light_amt: start(
                &gradients.light_amt,
                gradients.light_amt_x_step,
                gradients.light_amt_y_step,
            ),
            light_amt_step: step(gradients.light_amt_x_step, gradients.light_amt_y_step),
        }
    }

    /// Advance one scanline down.
    pub fn step(&mut self) {
        self.x += self.x_step;
        self.one_over_z += self.one_over_z_step;
        self.tex_coord_x += self.tex_coord_x_step;
        self.tex_coord_y += self.tex_coord_y_step;
        self.depth += self.depth_step;
        self.light_amt += self.light_amt_step;
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y_start(&self) -> i32 {
        self.y_start
    }

    pub fn y_end(&self) -> i32 {
        self.y_end
    }

    pub fn one_over_z(&self) -> f32 {
        self.one_over_z
    }

    pub fn tex_coord_x(&self) -> f32 {
        self.tex_coord_x
    }

    pub fn tex_coord_y(&self) -> f32 {
        self.tex_coord_y
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn light_amt(&self) -> f32 {
        self.light_amt
    }
}
