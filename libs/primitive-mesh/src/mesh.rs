//! # Mesh Data Structure
//!
//! Triangle mesh with texture coordinates and optional smoothing groups,
//! plus the axis-aligned bounds used by shapes.

use crate::error::MeshError;
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// One triangle: three position indices paired with three texture
/// coordinate indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Face {
    /// Indices into [`Mesh::positions`]
    pub vertices: [u32; 3],
    /// Indices into [`Mesh::tex_coords`]
    pub tex_coords: [u32; 3],
}

impl Face {
    /// Creates a face from interleaved `(point, tex coord)` index pairs.
    #[inline]
    pub const fn new(p0: u32, t0: u32, p1: u32, t1: u32, p2: u32, t2: u32) -> Self {
        Self {
            vertices: [p0, p1, p2],
            tex_coords: [t0, t1, t2],
        }
    }
}

/// An immutable triangle mesh.
///
/// All geometry is stored in f64. Export to f32 only happens at the
/// buffer boundary (see [`crate::export`]).
///
/// Meshes are assembled through [`MeshBuilder`] and shared as
/// `Arc<Mesh>` once published to the cache.
///
/// # Example
///
/// ```rust
/// use primitive_mesh::mesh::{Face, MeshBuilder};
/// use glam::{DVec2, DVec3};
///
/// let mut builder = MeshBuilder::new();
/// builder.add_point(DVec3::new(0.0, 0.0, 0.0));
/// builder.add_point(DVec3::new(1.0, 0.0, 0.0));
/// builder.add_point(DVec3::new(0.0, 1.0, 0.0));
/// builder.add_tex_coord(DVec2::ZERO);
/// builder.add_face(Face::new(0, 0, 1, 0, 2, 0));
/// let mesh = builder.build();
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Vertex positions
    positions: Vec<DVec3>,
    /// Texture coordinates
    tex_coords: Vec<DVec2>,
    /// Triangles
    faces: Vec<Face>,
    /// Optional per-face smoothing group bitmask
    smoothing_groups: Option<Vec<u32>>,
}

impl Mesh {
    /// Builds a mesh from flat arrays: `points` as `[x, y, z, ...]`,
    /// `tex_coords` as `[u, v, ...]`, `faces` as `[p0, t0, p1, t1, p2, t2, ...]`.
    ///
    /// # Errors
    ///
    /// Returns an error when a buffer is ragged, an index is out of range,
    /// or the smoothing group count differs from the face count.
    pub fn from_raw_parts(
        points: &[f64],
        tex_coords: &[f64],
        faces: &[u32],
        smoothing_groups: Option<Vec<u32>>,
    ) -> Result<Self, MeshError> {
        if points.len() % 3 != 0 {
            return Err(MeshError::malformed("points", points.len(), 3));
        }
        if tex_coords.len() % 2 != 0 {
            return Err(MeshError::malformed("tex_coords", tex_coords.len(), 2));
        }
        if faces.len() % 6 != 0 {
            return Err(MeshError::malformed("faces", faces.len(), 6));
        }

        let mesh = Self {
            positions: points
                .chunks_exact(3)
                .map(|p| DVec3::new(p[0], p[1], p[2]))
                .collect(),
            tex_coords: tex_coords
                .chunks_exact(2)
                .map(|t| DVec2::new(t[0], t[1]))
                .collect(),
            faces: faces
                .chunks_exact(6)
                .map(|f| Face::new(f[0], f[1], f[2], f[3], f[4], f[5]))
                .collect(),
            smoothing_groups,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Returns the number of vertex positions.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of texture coordinates.
    #[inline]
    pub fn tex_coord_count(&self) -> usize {
        self.tex_coords.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns a reference to the vertex positions.
    #[inline]
    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    /// Returns a reference to the texture coordinates.
    #[inline]
    pub fn tex_coords(&self) -> &[DVec2] {
        &self.tex_coords
    }

    /// Returns a reference to the faces.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Returns the per-face smoothing groups, if the mesh carries them.
    pub fn smoothing_groups(&self) -> Option<&[u32]> {
        self.smoothing_groups.as_deref()
    }

    /// Returns the position at the given index.
    #[inline]
    pub fn position(&self, index: u32) -> DVec3 {
        self.positions[index as usize]
    }

    /// Returns the face at the given index.
    #[inline]
    pub fn face(&self, index: usize) -> Face {
        self.faces[index]
    }

    /// Returns the three corner positions of a face.
    pub fn face_corners(&self, index: usize) -> [DVec3; 3] {
        let [a, b, c] = self.faces[index].vertices;
        [self.position(a), self.position(b), self.position(c)]
    }

    /// Unit normal of a face following counter-clockwise winding, or zero
    /// for a degenerate triangle.
    pub fn face_normal(&self, index: usize) -> DVec3 {
        let [v0, v1, v2] = self.face_corners(index);
        (v1 - v0).cross(v2 - v0).normalize_or_zero()
    }

    /// Computes the axis-aligned bounding box of all positions.
    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_points(&self.positions)
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All face position indices are in range
    /// - All face texture coordinate indices are in range
    /// - Smoothing groups, when present, match the face count
    pub fn validate(&self) -> Result<(), MeshError> {
        let vertex_count = self.positions.len();
        let tex_count = self.tex_coords.len();

        for (face_index, face) in self.faces.iter().enumerate() {
            if let Some(&index) = face.vertices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::VertexIndexOutOfRange {
                    face: face_index,
                    index,
                    count: vertex_count,
                });
            }
            if let Some(&index) = face.tex_coords.iter().find(|&&i| i as usize >= tex_count) {
                return Err(MeshError::TexCoordIndexOutOfRange {
                    face: face_index,
                    index,
                    count: tex_count,
                });
            }
        }

        if let Some(groups) = &self.smoothing_groups {
            if groups.len() != self.faces.len() {
                return Err(MeshError::SmoothingGroupMismatch {
                    groups: groups.len(),
                    faces: self.faces.len(),
                });
            }
        }

        Ok(())
    }

    /// Exports positions as f32 array for GPU.
    ///
    /// Returns flattened [x, y, z, x, y, z, ...] array.
    pub fn positions_f32(&self) -> Vec<f32> {
        let mut result = Vec::with_capacity(self.positions.len() * 3);
        for p in &self.positions {
            result.push(p.x as f32);
            result.push(p.y as f32);
            result.push(p.z as f32);
        }
        result
    }

    /// Exports texture coordinates as f32 array.
    ///
    /// Returns flattened [u, v, u, v, ...] array.
    pub fn tex_coords_f32(&self) -> Vec<f32> {
        let mut result = Vec::with_capacity(self.tex_coords.len() * 2);
        for t in &self.tex_coords {
            result.push(t.x as f32);
            result.push(t.y as f32);
        }
        result
    }

    /// Exports faces as interleaved [p0, t0, p1, t1, p2, t2, ...] indices.
    pub fn face_indices_u32(&self) -> Vec<u32> {
        let mut result = Vec::with_capacity(self.faces.len() * 6);
        for face in &self.faces {
            for corner in 0..3 {
                result.push(face.vertices[corner]);
                result.push(face.tex_coords[corner]);
            }
        }
        result
    }
}

/// Incremental mesh assembly used by the tessellators.
#[derive(Debug, Default)]
pub struct MeshBuilder {
    positions: Vec<DVec3>,
    tex_coords: Vec<DVec2>,
    faces: Vec<Face>,
    smoothing_groups: Option<Vec<u32>>,
}

impl MeshBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with pre-allocated capacity.
    pub fn with_capacity(point_count: usize, tex_count: usize, face_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(point_count),
            tex_coords: Vec::with_capacity(tex_count),
            faces: Vec::with_capacity(face_count),
            smoothing_groups: None,
        }
    }

    /// Adds a position and returns its index.
    pub fn add_point(&mut self, position: DVec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        index
    }

    /// Adds a texture coordinate and returns its index.
    pub fn add_tex_coord(&mut self, tex_coord: DVec2) -> u32 {
        let index = self.tex_coords.len() as u32;
        self.tex_coords.push(tex_coord);
        index
    }

    /// Adds a face without a smoothing group.
    pub fn add_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    /// Adds a face tagged with a smoothing group bitmask.
    ///
    /// Once any face carries a group, every face added afterwards should too.
    pub fn add_smoothed_face(&mut self, face: Face, group: u32) {
        let capacity = self.faces.capacity();
        self.faces.push(face);
        self.smoothing_groups
            .get_or_insert_with(|| Vec::with_capacity(capacity))
            .push(group);
    }

    /// Returns the number of positions added so far.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.positions.len()
    }

    /// Finishes the mesh.
    pub fn build(self) -> Mesh {
        Mesh {
            positions: self.positions,
            tex_coords: self.tex_coords,
            faces: self.faces,
            smoothing_groups: self.smoothing_groups,
        }
    }
}

/// Axis-aligned bounding box with an explicit empty state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner (x, y, z)
    pub min: DVec3,
    /// Maximum corner (x, y, z)
    pub max: DVec3,
}

impl Aabb {
    /// Creates a bounding box from min/max corners.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Creates an empty (inverted) bounding box.
    pub fn empty() -> Self {
        Self {
            min: DVec3::splat(f64::INFINITY),
            max: DVec3::splat(f64::NEG_INFINITY),
        }
    }

    /// Box centered at the origin with the given half extents.
    pub fn centered(half_extents: DVec3) -> Self {
        Self {
            min: -half_extents,
            max: half_extents,
        }
    }

    /// Bounds of a point set; empty for no points.
    pub fn from_points(points: &[DVec3]) -> Self {
        points.iter().fold(Self::empty(), |acc, &p| Self {
            min: acc.min.min(p),
            max: acc.max.max(p),
        })
    }

    /// Returns true if the box encloses nothing.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Extent along each axis (zero for an empty box).
    pub fn size(&self) -> DVec3 {
        if self.is_empty() {
            DVec3::ZERO
        } else {
            self.max - self.min
        }
    }

    /// Returns true if the point lies inside or on the box.
    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}
