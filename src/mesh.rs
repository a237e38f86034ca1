//! Triangle meshes and the draw call.

use std::io::BufRead;
use std::path::Path;

use log::info;
use rayon::prelude::*;

use crate::math::mat4::Mat4;
use crate::obj::{IndexedModel, ObjError, ObjModel};
use crate::render::RenderContext;
use crate::texture::Texture;
use crate::vertex::Vertex;

/// A deduplicated vertex buffer plus a flat index buffer, three indices
/// per triangle.
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<usize>,
}

const UNIT_CUBE_OBJ: &str = "\
v -1 -1 -1
v -1 1 -1
v 1 1 -1
v 1 -1 -1
v -1 -1 1
v -1 1 1
v 1 1 1
v 1 -1 1
vt 0 0
vt 0 1
vt 1 1
vt 1 0
f 1/1 2/2 3/3 4/4
f 8/1 7/2 6/3 5/4
f 5/1 6/2 2/3 1/4
f 4/1 3/2 7/3 8/4
f 2/1 6/2 7/3 3/4
f 1/1 4/2 8/3 5/4
";

impl Mesh {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ObjError> {
        let mesh = Self::from_indexed_model(ObjModel::from_file(&path)?.to_indexed_model());
        info!(
            "loaded mesh {}: {} vertices, {} triangles",
            path.as_ref().display(),
            mesh.vertices.len(),
            mesh.indices.len() / 3
        );
        Ok(mesh)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ObjError> {
        Ok(Self::from_indexed_model(
            ObjModel::from_reader(reader)?.to_indexed_model(),
        ))
    }

    pub fn from_indexed_model(model: IndexedModel) -> Self {
        let vertices = (0..model.positions.len())
            .map(|i| Vertex::new(model.positions[i], model.tex_coords[i], model.normals[i]))
            .collect();

        Self {
            vertices,
            indices: model.indices,
        }
    }

    /// An axis-aligned cube spanning [-1, 1] on every axis, faces wound
    /// outward, with generated normals.
    pub fn unit_cube() -> Self {
        // The inline model is well formed, so parsing cannot fail.
        match Self::from_reader(UNIT_CUBE_OBJ.as_bytes()) {
            Ok(mesh) => mesh,
            Err(_) => unreachable!("builtin cube model is valid"),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Rasterize the whole mesh.
    ///
    /// Triangles are distributed across the rayon pool; the context's
    /// atomic frame buffer makes the concurrent writes safe. Returns once
    /// every triangle has been processed.
    pub fn draw(
        &self,
        context: &RenderContext,
        view_projection: &Mat4,
        world: &Mat4,
        texture: &Texture,
    ) {
        let mvp = *view_projection * *world;

        self.indices.par_chunks_exact(3).for_each(|tri| {
            let a = self.vertices[tri[0]].transformed(&mvp, world);
            let b = self.vertices[tri[1]].transformed(&mvp, world);
            let c = self.vertices[tri[2]].transformed(&mvp, world);
            context.draw_triangle(&a, &b, &c, texture);
        });
    }

    /// Serial variant of [`Mesh::draw`], drawing triangles in index order.
    pub fn draw_serial(
        &self,
        context: &RenderContext,
        view_projection: &Mat4,
        world: &Mat4,
        texture: &Texture,
    ) {
        let mvp = *view_projection * *world;

        for tri in self.indices.chunks_exact(3) {
            let a = self.vertices[tri[0]].transformed(&mvp, world);
            let b = self.vertices[tri[1]].transformed(&mvp, world);
            let c = self.vertices[tri[2]].transformed(&mvp, world);
            context.draw_triangle(&a, &b, &c, texture);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn unit_cube_has_six_quads() {
        let cube = Mesh::unit_cube();
        assert_eq!(cube.indices().len(), 36);
        // Corners are shared per face-corner attribute triple, never merged
        // across faces with different texcoords.
        assert!(cube.vertices().len() <= 24);
        assert!(cube.vertices().len() >= 8);
    }

    #[test]
    fn unit_cube_normals_are_unit_length() {
        let cube = Mesh::unit_cube();
        for v in cube.vertices() {
            assert_relative_eq!(v.normal.magnitude(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn unit_cube_spans_the_expected_extent() {
        let cube = Mesh::unit_cube();
        for v in cube.vertices() {
            assert_eq!(v.position.x.abs(), 1.0);
            assert_eq!(v.position.y.abs(), 1.0);
            assert_eq!(v.position.z.abs(), 1.0);
            assert_eq!(v.position.w, 1.0);
        }
    }
}
