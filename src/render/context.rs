//! Triangle rasterization into the shared frame buffer.
//!
//! The context takes triangles in clip space and walks them with the
//! scanline/gradient pipeline: screen transform, perspective divide,
//! backface cull, y-sort, then two edge pairs scanned top to bottom.
//! Every method takes `&self`; the frame buffer's atomics make it safe to
//! feed triangles from many threads at once.

use crate::clipper;
use crate::colors;
use crate::light::DirectionalLight;
use crate::math::mat4::Mat4;
use crate::texture::Texture;
use crate::vertex::Vertex;

use super::edge::Edge;
use super::framebuffer::FrameBuffer;
use super::gradients::Gradients;

pub struct RenderContext {
    framebuffer: FrameBuffer,
    screen_matrix: Mat4,
    light: DirectionalLight,
}

impl RenderContext {
    pub fn new(width: u32, height: u32, light: DirectionalLight) -> Self {
        Self {
            framebuffer: FrameBuffer::new(width, height),
            screen_matrix: Mat4::screen_space(width as f32 / 2.0, height as f32 / 2.0),
            light,
        }
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn light(&self) -> &DirectionalLight {
        &self.light
    }

    pub fn set_light(&mut self, light: DirectionalLight) {
        self.light = light;
    }

    /// Clear the color buffer to a uniform shade.
    pub fn clear(&self, shade: u8) {
        self.framebuffer.clear(shade);
    }

    /// Reset the depth buffer for a new frame.
    pub fn clear_depth(&self) {
        self.framebuffer.clear_depth();
    }

    /// Rasterize one clip-space triangle.
    ///
    /// Triangles entirely inside the frustum skip clipping; anything else
    /// is clipped and the surviving polygon fan-triangulated.
    pub fn draw_triangle(&self, v1: &Vertex, v2: &Vertex, v3: &Vertex, texture: &Texture) {
        if v1.is_inside_frustum() && v2.is_inside_frustum() && v3.is_inside_frustum() {
            self.fill_triangle(v1, v2, v3, texture);
            return;
        }

        let mut vertices = vec![*v1, *v2, *v3];
        let mut scratch = Vec::with_capacity(6);

        if clipper::clip_polygon(&mut vertices, &mut scratch) {
            let first = vertices[0];
            for pair in vertices[1..].windows(2) {
                self.fill_triangle(&first, &pair[0], &pair[1], texture);
            }
        }
    }

    fn fill_triangle(&self, v1: &Vertex, v2: &Vertex, v3: &Vertex, texture: &Texture) {
        // Clipping keeps w >= |z| >= 0; a w this small means the triangle
        // collapsed onto the camera plane.
        if v1.position.w < 1e-6 || v2.position.w < 1e-6 || v3.position.w < 1e-6 {
            return;
        }

        let mut min_y = v1
            .transform_position(&self.screen_matrix)
            .perspective_divide();
        let mut mid_y = v2
            .transform_position(&self.screen_matrix)
            .perspective_divide();
        let mut max_y = v3
            .transform_position(&self.screen_matrix)
            .perspective_divide();

        // Backface cull; screen y grows downward so front faces come out
        // with negative doubled area.
        if min_y.triangle_area_doubled(&max_y, &mid_y) >= 0.0 {
            return;
        }

        if max_y.position.y < mid_y.position.y {
            std::mem::swap(&mut max_y, &mut mid_y);
        }
        if mid_y.position.y < min_y.position.y {
            std::mem::swap(&mut mid_y, &mut min_y);
        }
        if max_y.position.y < mid_y.position.y {
            std::mem::swap(&mut max_y, &mut mid_y);
        }

        let handedness = min_y.triangle_area_doubled(&max_y, &mid_y) >= 0.0;
        self.scan_triangle(&min_y, &mid_y, &max_y, handedness, texture);
    }

    fn scan_triangle(
        &self,
        min_y: &Vertex,
        mid_y: &Vertex,
        max_y: &Vertex,
        handedness: bool,
        texture: &Texture,
    ) {
        let gradients = match Gradients::new(min_y, mid_y, max_y, &self.light) {
            Some(g) => g,
            None => return,
        };

        let mut top_to_bottom = Edge::new(&gradients, min_y, max_y, 0);
        let mut top_to_middle = Edge::new(&gradients, min_y, mid_y, 0);
        let mut middle_to_bottom = Edge::new(&gradients, mid_y, max_y, 1);

        self.scan_edges(&gradients, &mut top_to_bottom, &mut top_to_middle, handedness, texture);
        self.scan_edges(&gradients, &mut top_to_bottom, &mut middle_to_bottom, handedness, texture);
    }

    /// Walks the rows spanned by edge `b`, drawing a span between the two
    /// edges on each. `a` always spans the whole triangle.
    fn scan_edges(
        &self,
        gradients: &Gradients,
        a: &mut Edge,
        b: &mut Edge,
        handedness: bool,
        texture: &Texture,
    ) {
        let y_start = b.y_start();
        let y_end = b.y_end();

        for j in y_start..y_end {
            if j >= 0 && (j as u32) < self.framebuffer.height() {
                if handedness {
                    self.draw_scan_line(gradients, b, a, j, texture);
                } else {
                    self.draw_scan_line(gradients, a, b, j, texture);
                }
            }
            a.step();
            b.step();
        }
    }

    fn draw_scan_line(
        &self,
        gradients: &Gradients,
        left: &Edge,
        right: &Edge,
        j: i32,
        texture: &Texture,
    ) {
        let x_min = left.x().ceil() as i32;
        let x_max = right.x().ceil() as i32;
        let x_prestep = x_min as f32 - left.x();

        let mut one_over_z = left.one_over_z() + gradients.one_over_z_x_step * x_prestep;
        let mut tex_coord_x = left.tex_coord_x() + gradients.tex_coord_x_x_step * x_prestep;
        let mut tex_coord_y = left.tex_coord_y() + gradients.tex_coord_y_x_step * x_prestep;
        let mut depth = left.depth() + gradients.depth_x_step * x_prestep;
        let mut light_amt = left.light_amt() + gradients.light_amt_x_step * x_prestep;

        let tex_w = (texture.width() - 1) as f32 + 0.5;
        let tex_h = (texture.height() - 1) as f32 + 0.5;
        let width = self.framebuffer.width() as i32;
        let row_start = j * width;

        for i in x_min..x_max {
            if i >= 0 && i < width {
                let index = (row_start + i) as usize;

                if self.framebuffer.test_depth(index, depth) {
                    let z = 1.0 / one_over_z;
                    let src_x = ((tex_coord_x * z) * tex_w) as i32;
                    let src_y = ((tex_coord_y * z) * tex_h) as i32;
                    let src_x = src_x.clamp(0, texture.width() as i32 - 1) as u32;
                    let src_y = src_y.clamp(0, texture.height() as i32 - 1) as u32;

                    let color = colors::modulate(texture.texel(src_x, src_y), light_amt);
                    self.framebuffer.store_color(index, color);
                }
            }

            one_over_z += gradients.one_over_z_x_step;
            tex_coord_x += gradients.tex_coord_x_x_step;
            tex_coord_y += gradients.tex_coord_y_x_step;
            depth += gradients.depth_x_step;
            light_amt += gradients.light_amt_x_step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{vec2::Vec2, vec3::Vec3, vec4::Vec4};

    fn context(size: u32) -> RenderContext {
        // Light shining straight down +Z onto normals facing -Z gives a
        // shade of exactly 1.0, so texels arrive unmodulated.
        let mut light = DirectionalLight::new(Vec3::new(0.0, 0.0, 1.0));
        light.ambient_intensity = 0.0;
        RenderContext::new(size, size, light)
    }

    fn vert(x: f32, y: f32, z: f32) -> Vertex {
        Vertex::new(
            Vec4::new(x, y, z, 1.0),
            Vec2::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
        )
    }

    fn coverage(ctx: &RenderContext) -> usize {
        let (w, h) = (ctx.framebuffer().width(), ctx.framebuffer().height());
        (0..w * h)
            .filter(|i| ctx.framebuffer().pixel(i % w, i / w) != 0)
            .count()
    }

    #[test]
    fn front_facing_triangle_is_drawn() {
        let ctx = context(50);
        ctx.clear(0);
        ctx.clear_depth();
        let tex = Texture::solid(colors::WHITE);
        // Clockwise in y-up clip space; the screen-space y flip makes this
        // the front-facing winding.
        ctx.draw_triangle(
            &vert(-0.5, -0.5, 0.0),
            &vert(0.0, 0.5, 0.0),
            &vert(0.5, -0.5, 0.0),
            &tex,
        );
        assert!(coverage(&ctx) > 100);
    }

    #[test]
    fn backfacing_triangle_is_culled() {
        let ctx = context(50);
        ctx.clear(0);
        ctx.clear_depth();
        let tex = Texture::solid(colors::WHITE);
        ctx.draw_triangle(
            &vert(-0.5, -0.5, 0.0),
            &vert(0.5, -0.5, 0.0),
            &vert(0.0, 0.5, 0.0),
            &tex,
        );
        assert_eq!(coverage(&ctx), 0);
    }

    #[test]
    fn nearer_triangle_wins_the_depth_test() {
        let ctx = context(50);
        ctx.clear(0);
        ctx.clear_depth();
        let red = Texture::solid(colors::RED);
        let blue = Texture::solid(colors::BLUE);

        let far = [vert(-0.8, -0.8, 0.8), vert(0.0, 0.8, 0.8), vert(0.8, -0.8, 0.8)];
        let near = [vert(-0.8, -0.8, 0.2), vert(0.0, 0.8, 0.2), vert(0.8, -0.8, 0.2)];

        ctx.draw_triangle(&far[0], &far[1], &far[2], &blue);
        ctx.draw_triangle(&near[0], &near[1], &near[2], &red);

        // Sample the centroid region; the near (red) triangle must cover it.
        assert_eq!(ctx.framebuffer().pixel(25, 25), colors::RED);

        // Draw order must not matter.
        ctx.clear(0);
        ctx.clear_depth();
        ctx.draw_triangle(&near[0], &near[1], &near[2], &red);
        ctx.draw_triangle(&far[0], &far[1], &far[2], &blue);
        assert_eq!(ctx.framebuffer().pixel(25, 25), colors::RED);
    }

    #[test]
    fn offscreen_triangle_is_clipped_away() {
        let ctx = context(50);
        ctx.clear(0);
        ctx.clear_depth();
        let tex = Texture::solid(colors::WHITE);
        ctx.draw_triangle(
            &vert(5.0, 5.0, 0.0),
            &vert(6.0, 5.0, 0.0),
            &vert(5.0, 6.0, 0.0),
            &tex,
        );
        assert_eq!(coverage(&ctx), 0);
    }

    #[test]
    fn partially_offscreen_triangle_stays_in_bounds() {
        let ctx = context(50);
        ctx.clear(0);
        ctx.clear_depth();
        let tex = Texture::solid(colors::WHITE);
        ctx.draw_triangle(
            &vert(-2.0, -0.5, 0.0),
            &vert(0.0, 0.5, 0.0),
            &vert(2.0, -0.5, 0.0),
            &tex,
        );
        assert!(coverage(&ctx) > 100);
    }
}
