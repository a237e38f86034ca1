//! Homogeneous-space polygon clipping.
//!
//! Sutherland-Hodgman run in clip space before the perspective divide.
//! Each axis is clipped against its two frustum planes, `component <= w`
//! and `-component <= w`. Working in homogeneous coordinates means a
//! single linear interpolation finds the exact plane crossing even when
//! the triangle straddles the camera plane.

use crate::vertex::Vertex;

/// Clips a convex polygon in place against all six frustum planes.
///
/// Returns false when nothing survives; in that case the contents of
/// `vertices` are unspecified. The scratch vector is caller-provided so a
/// render worker can reuse its allocations across triangles.
pub fn clip_polygon(vertices: &mut Vec<Vertex>, scratch: &mut Vec<Vertex>) -> bool {
    clip_axis(vertices, scratch, 0) && clip_axis(vertices, scratch, 1) && clip_axis(vertices, scratch, 2)
}

fn clip_axis(vertices: &mut Vec<Vertex>, scratch: &mut Vec<Vertex>, axis: usize) -> bool {
    scratch.clear();
    clip_component(vertices, axis, 1.0, scratch);
    vertices.clear();

    if scratch.is_empty() {
        return false;
    }

    clip_component(scratch, axis, -1.0, vertices);
    !vertices.is_empty()
}

fn clip_component(vertices: &[Vertex], axis: usize, factor: f32, result: &mut Vec<Vertex>) {
    let mut previous = match vertices.last() {
        Some(v) => v,
        None => return,
    };
    let mut previous_component = previous.component(axis) * factor;
    let mut previous_inside = previous_component <= previous.position.w;

    for current in vertices {
        let current_component = current.component(axis) * factor;
        let current_inside = current_component <= current.position.w;

        if current_inside != previous_inside {
            let t = (previous.position.w - previous_component)
                / ((previous.position.w - previous_component)
                    - (current.position.w - current_component));
            result.push(previous.lerp(current, t));
        }

        if current_inside {
            result.push(*current);
        }

        previous = current;
        previous_component = current_component;
        previous_inside = current_inside;
    }
}
