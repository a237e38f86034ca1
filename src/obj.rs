//! OBJ-style mesh ingestion.
//!
//! Parses the line-oriented subset the pipeline needs (`v`, `vt`, `vn`,
//! `f`, with fan triangulation for larger faces) and converts it into an
//! [`IndexedModel`]: one deduplicated vertex per distinct
//! position/texcoord/normal triple. Missing normals and tangents are
//! generated from face geometry.
//!
//! Texture V coordinates are flipped (`1 - v`) on ingestion so that UV
//! origin matches the top-left origin of the texture buffers.
//!
//! Texcoords and normals are all-or-nothing: a single face corner without
//! one degrades that attribute for the whole model, falling back to zero
//! texcoords or generated normals.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::math::{vec2::Vec2, vec3::Vec3, vec4::Vec4};

#[derive(Debug, Error)]
pub enum ObjError {
    #[error("failed to read model")]
    Io(#[from] std::io::Error),
    #[error("line {line}: malformed `{record}` record")]
    MalformedRecord { line: usize, record: String },
    #[error("line {line}: invalid number `{token}`")]
    InvalidNumber { line: usize, token: String },
    #[error("face references {kind} index {index} but only {len} were declared")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },
}

/// One corner of a face: indices into the position/texcoord/normal pools.
/// Absent components stay at 0, mirrored by the model-level has-flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct ObjIndex {
    position: usize,
    tex_coord: usize,
    normal: usize,
}

/// Raw parsed OBJ data, still with per-face index triples.
#[derive(Debug)]
pub struct ObjModel {
    positions: Vec<Vec4>,
    tex_coords: Vec<Vec2>,
    normals: Vec<Vec3>,
    indices: Vec<ObjIndex>,
    has_tex_coords: bool,
    has_normals: bool,
    missing_tex_coords: bool,
    missing_normals: bool,
}

impl ObjModel {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ObjError> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ObjError> {
        let mut model = ObjModel {
            positions: Vec::new(),
            tex_coords: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
            has_tex_coords: false,
            has_normals: false,
            missing_tex_coords: false,
            missing_normals: false,
        };

        for (line_number, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = line_number + 1;
            let tokens: Vec<&str> = line.split_whitespace().collect();

            match tokens.first() {
                Some(&"v") => {
                    let [x, y, z] = parse_floats(&tokens, line_number)?;
                    model.positions.push(Vec4::point(x, y, z));
                }
                Some(&"vt") => {
                    if tokens.len() < 3 {
                        return Err(malformed(line_number, "vt"));
                    }
                    let u = parse_float(tokens[1], line_number)?;
                    let v = parse_float(tokens[2], line_number)?;
                    model.tex_coords.push(Vec2::new(u, 1.0 - v));
                }
                Some(&"vn") => {
                    let [x, y, z] = parse_floats(&tokens, line_number)?;
                    model.normals.push(Vec3::new(x, y, z));
                }
                Some(&"f") => {
                    if tokens.len() < 4 {
                        return Err(malformed(line_number, "f"));
                    }
                    let mut corners = Vec::with_capacity(tokens.len() - 1);
                    for token in &tokens[1..] {
                        corners.push(model.parse_obj_index(token, line_number)?);
                    }
                    // Fan triangulation from the first corner.
                    for i in 0..corners.len() - 2 {
                        model.indices.push(corners[0]);
                        model.indices.push(corners[i + 1]);
                        model.indices.push(corners[i + 2]);
                    }
                }
                // Comments and unsupported records (o, g, s, usemtl, ...)
                _ => {}
            }
        }

        // A corner without an attribute poisons it for the whole model.
        if model.missing_tex_coords {
            model.has_tex_coords = false;
        }
        if model.missing_normals {
            model.has_normals = false;
        }

        model.validate()?;

        debug!(
            "parsed obj: {} positions, {} texcoords, {} normals, {} face corners",
            model.positions.len(),
            model.tex_coords.len(),
            model.normals.len(),
            model.indices.len()
        );

        Ok(model)
    }

    fn parse_obj_index(&mut self, token: &str, line: usize) -> Result<ObjIndex, ObjError> {
        let mut values = token.split('/');

        let position = match values.next() {
            Some(v) if !v.is_empty() => parse_index(v, line)?,
            _ => return Err(malformed(line, "f")),
        };

        let mut result = ObjIndex {
            position,
            tex_coord: 0,
            normal: 0,
        };

        match values.next() {
            Some(v) if !v.is_empty() => {
                self.has_tex_coords = true;
                result.tex_coord = parse_index(v, line)?;
            }
            _ => self.missing_tex_coords = true,
        }
        match values.next() {
            Some(v) if !v.is_empty() => {
                self.has_normals = true;
                result.normal = parse_index(v, line)?;
            }
            _ => self.missing_normals = true,
        }

        Ok(result)
    }

    fn validate(&self) -> Result<(), ObjError> {
        for index in &self.indices {
            if index.position >= self.positions.len() {
                return Err(ObjError::IndexOutOfRange {
                    kind: "position",
                    index: index.position,
                    len: self.positions.len(),
                });
            }
            if self.has_tex_coords && index.tex_coord >= self.tex_coords.len() {
                return Err(ObjError::IndexOutOfRange {
                    kind: "texcoord",
                    index: index.tex_coord,
                    len: self.tex_coords.len(),
                });
            }
            if self.has_normals && index.normal >= self.normals.len() {
                return Err(ObjError::IndexOutOfRange {
                    kind: "normal",
                    index: index.normal,
                    len: self.normals.len(),
                });
            }
        }
        Ok(())
    }

    /// Deduplicates face corners into an indexed vertex buffer.
    ///
    /// Two models are built side by side: the result (keyed by the full
    /// index triple) and a position-keyed model whose shared vertices let
    /// generated normals and tangents accumulate across seams. The
    /// correspondence table copies the generated attributes back.
    pub fn to_indexed_model(&self) -> IndexedModel {
        let mut result = IndexedModel::default();
        let mut normal_model = IndexedModel::default();

        let mut result_index_map: HashMap<ObjIndex, usize> = HashMap::new();
        let mut normal_index_map: HashMap<usize, usize> = HashMap::new();
        let mut index_map: HashMap<usize, usize> = HashMap::new();

        for current_index in &self.indices {
            let current_position = self.positions[current_index.position];
            let current_tex_coord = if self.has_tex_coords {
                self.tex_coords[current_index.tex_coord]
            } else {
                Vec2::ZERO
            };
            let current_normal = if self.has_normals {
                self.normals[current_index.normal]
            } else {
                Vec3::ZERO
            };

            let model_vertex_index = *result_index_map.entry(*current_index).or_insert_with(|| {
                let next = result.positions.len();
                result.positions.push(current_position);
                result.tex_coords.push(current_tex_coord);
                if self.has_normals {
                    result.normals.push(current_normal);
                }
                next
            });

            let normal_model_index = *normal_index_map
                .entry(current_index.position)
                .or_insert_with(|| {
                    let next = normal_model.positions.len();
                    normal_model.positions.push(current_position);
                    normal_model.tex_coords.push(current_tex_coord);
                    normal_model.normals.push(current_normal);
                    normal_model.tangents.push(Vec3::ZERO);
                    next
                });

            result.indices.push(model_vertex_index);
            normal_model.indices.push(normal_model_index);
            index_map.entry(model_vertex_index).or_insert(normal_model_index);
        }

        if !self.has_normals {
            normal_model.calc_normals();
            for i in 0..result.positions.len() {
                result.normals.push(normal_model.normals[index_map[&i]]);
            }
        }

        normal_model.calc_tangents();
        for i in 0..result.positions.len() {
            result.tangents.push(normal_model.tangents[index_map[&i]]);
        }

        result
    }

    pub fn has_tex_coords(&self) -> bool {
        self.has_tex_coords
    }

    pub fn has_normals(&self) -> bool {
        self.has_normals
    }
}

fn malformed(line: usize, record: &str) -> ObjError {
    ObjError::MalformedRecord {
        line,
        record: record.to_string(),
    }
}

fn parse_float(token: &str, line: usize) -> Result<f32, ObjError> {
    token.parse().map_err(|_| ObjError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

fn parse_floats(tokens: &[&str], line: usize) -> Result<[f32; 3], ObjError> {
    if tokens.len() < 4 {
        return Err(malformed(line, tokens[0]));
    }
    Ok([
        parse_float(tokens[1], line)?,
        parse_float(tokens[2], line)?,
        parse_float(tokens[3], line)?,
    ])
}

fn parse_index(token: &str, line: usize) -> Result<usize, ObjError> {
    let value: usize = token.parse().map_err(|_| ObjError::InvalidNumber {
        line,
        token: token.to_string(),
    })?;
    if value == 0 {
        return Err(ObjError::InvalidNumber {
            line,
            token: token.to_string(),
        });
    }
    Ok(value - 1)
}

/// Deduplicated vertex data with a flat index buffer.
#[derive(Default)]
pub struct IndexedModel {
    pub positions: Vec<Vec4>,
    pub tex_coords: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub tangents: Vec<Vec3>,
    pub indices: Vec<usize>,
}

impl IndexedModel {
    /// Accumulates normalized face normals onto each referenced vertex,
    /// then renormalizes. Shared vertices end up with smooth normals.
    pub fn calc_normals(&mut self) {
        for tri in self.indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0], tri[1], tri[2]);

            let v1 = (self.positions[i1] - self.positions[i0]).to_vec3();
            let v2 = (self.positions[i2] - self.positions[i0]).to_vec3();
            let normal = v1.cross(v2).normalize();

            self.normals[i0] = self.normals[i0] + normal;
            self.normals[i1] = self.normals[i1] + normal;
            self.normals[i2] = self.normals[i2] + normal;
        }

        for normal in &mut self.normals {
            *normal = normal.normalize();
        }
    }

    /// Per-vertex tangents from the UV derivative along each face. Faces
    /// with a degenerate UV mapping contribute nothing.
    pub fn calc_tangents(&mut self) {
        for tri in self.indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0], tri[1], tri[2]);

            let edge1 = (self.positions[i1] - self.positions[i0]).to_vec3();
            let edge2 = (self.positions[i2] - self.positions[i0]).to_vec3();

            let delta_u1 = self.tex_coords[i1].x - self.tex_coords[i0].x;
            let delta_v1 = self.tex_coords[i1].y - self.tex_coords[i0].y;
            let delta_u2 = self.tex_coords[i2].x - self.tex_coords[i0].x;
            let delta_v2 = self.tex_coords[i2].y - self.tex_coords[i0].y;

            let dividend = delta_u1 * delta_v2 - delta_u2 * delta_v1;
            let f = if dividend == 0.0 { 0.0 } else { 1.0 / dividend };

            let tangent = Vec3::new(
                f * (delta_v2 * edge1.x - delta_v1 * edge2.x),
                f * (delta_v2 * edge1.y - delta_v1 * edge2.y),
                f * (delta_v2 * edge1.z - delta_v1 * edge2.z),
            );

            self.tangents[i0] = self.tangents[i0] + tangent;
            self.tangents[i1] = self.tangents[i1] + tangent;
            self.tangents[i2] = self.tangents[i2] + tangent;
        }

        for tangent in &mut self.tangents {
            *tangent = tangent.normalize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Cursor;

    const SQUARE: &str = "\
# a unit square from two triangles
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
f 1/1 2/2 3/3
f 1/1 3/3 4/4
";

    fn parse(text: &str) -> ObjModel {
        ObjModel::from_reader(Cursor::new(text)).unwrap()
    }

    #[test]
    fn square_shares_corner_vertices() {
        let model = parse(SQUARE).to_indexed_model();
        assert_eq!(model.positions.len(), 4);
        assert_eq!(model.indices.len(), 6);
        // The two triangles share the 0 and 2 corners.
        assert_eq!(model.indices[0], model.indices[3]);
        assert_eq!(model.indices[2], model.indices[4]);
    }

    #[test]
    fn texture_v_is_flipped() {
        let model = parse(SQUARE);
        let indexed = model.to_indexed_model();
        // vt 1 1 becomes (1, 0)
        assert_relative_eq!(indexed.tex_coords[2].x, 1.0);
        assert_relative_eq!(indexed.tex_coords[2].y, 0.0);
    }

    #[test]
    fn missing_normals_are_generated() {
        let model = parse(SQUARE);
        assert!(!model.has_normals());
        let indexed = model.to_indexed_model();
        assert_eq!(indexed.normals.len(), 4);
        for n in &indexed.normals {
            assert_relative_eq!(n.z, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn quads_are_fan_triangulated() {
        let model = parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n");
        let indexed = model.to_indexed_model();
        assert_eq!(indexed.indices.len(), 6);
        assert_eq!(indexed.positions.len(), 4);
    }

    #[test]
    fn declared_normals_are_kept() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 1 0\nf 1//1 2//1 3//1\n";
        let model = parse(text);
        assert!(model.has_normals());
        assert!(!model.has_tex_coords());
        let indexed = model.to_indexed_model();
        assert_eq!(indexed.normals[0], Vec3::UP);
    }

    #[test]
    fn bad_number_is_reported_with_line() {
        let err = ObjModel::from_reader(Cursor::new("v 0 zero 0\n")).unwrap_err();
        match err {
            ObjError::InvalidNumber { line, token } => {
                assert_eq!(line, 1);
                assert_eq!(token, "zero");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn out_of_range_face_index_is_rejected() {
        let err = ObjModel::from_reader(Cursor::new("v 0 0 0\nf 1 2 3\n")).unwrap_err();
        assert!(matches!(err, ObjError::IndexOutOfRange { .. }));
    }

    #[test]
    fn short_face_record_is_rejected() {
        let err = ObjModel::from_reader(Cursor::new("v 0 0 0\nf 1 1\n")).unwrap_err();
        assert!(matches!(err, ObjError::MalformedRecord { .. }));
    }

    #[test]
    fn mixed_face_corners_degrade_the_whole_attribute() {
        // The third corner has no texcoord, so every declared one is
        // dropped rather than letting the bare corner sample texcoord 0.
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nf 1/1 2/2 3\n";
        let model = parse(text);
        assert!(!model.has_tex_coords());
        let indexed = model.to_indexed_model();
        assert_eq!(indexed.tex_coords.len(), 3);
        for uv in &indexed.tex_coords {
            assert_eq!(*uv, Vec2::ZERO);
        }
    }

    #[test]
    fn mixed_normal_corners_regenerate_all_normals() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 1 0 0\nf 1//1 2//1 3\n";
        let model = parse(text);
        assert!(!model.has_normals());
        let indexed = model.to_indexed_model();
        // The declared +x normal is ignored; the face lies in the z plane.
        for n in &indexed.normals {
            assert_relative_eq!(n.z, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn tangents_follow_the_u_axis() {
        let model = parse(SQUARE).to_indexed_model();
        // UVs increase with +x, so tangents point along +x.
        for t in &model.tangents {
            assert_relative_eq!(t.x.abs(), 1.0, epsilon = 1e-5);
        }
    }
}
