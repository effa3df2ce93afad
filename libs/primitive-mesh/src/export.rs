//! # Mesh Export
//!
//! Flat GPU-ready buffers for handing a mesh to a renderer or across a
//! host boundary.
//!
//! ## Layout
//!
//! ```text
//! positions:  [x, y, z, x, y, z, ...]            f32, vertex_count * 3
//! tex_coords: [u, v, u, v, ...]                  f32, tex_coord_count * 2
//! faces:      [p0, t0, p1, t1, p2, t2, ...]      u32, face_count * 6
//! ```

use crate::mesh::{Aabb, Mesh};
use serde::Serialize;

/// Flat buffers of one mesh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshBuffers {
    /// Vertex positions
    pub positions: Vec<f32>,
    /// Texture coordinates
    pub tex_coords: Vec<f32>,
    /// Interleaved point and texture coordinate indices
    pub faces: Vec<u32>,
    /// One smoothing bitmask per face, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smoothing_groups: Option<Vec<u32>>,
    /// Bounds of the positions
    pub bounds: Aabb,
    /// Number of vertices
    pub vertex_count: u32,
    /// Number of triangles
    pub face_count: u32,
}

impl MeshBuffers {
    /// Copies a mesh into flat buffers.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self {
            positions: mesh.positions_f32(),
            tex_coords: mesh.tex_coords_f32(),
            faces: mesh.face_indices_u32(),
            smoothing_groups: mesh.smoothing_groups().map(<[u32]>::to_vec),
            bounds: mesh.bounding_box(),
            vertex_count: mesh.vertex_count() as u32,
            face_count: mesh.face_count() as u32,
        }
    }
}

impl From<&Mesh> for MeshBuffers {
    fn from(mesh: &Mesh) -> Self {
        Self::from_mesh(mesh)
    }
}
