//! # Box Primitive
//!
//! Generates the mesh for an axis-aligned box centered at the origin.

use crate::mesh::{Face, Mesh, MeshBuilder};
use glam::{DVec2, DVec3};

/// Smoothing group shared by every box face: no face smooths into another.
pub const BOX_SMOOTHING_GROUP: u32 = 0;

/// Faces as `(p0, t0, p1, t1, p2, t2)`, two per side, counter-clockwise
/// seen from outside.
const BOX_FACES: [Face; 12] = [
    // -z
    Face::new(0, 0, 2, 2, 1, 1),
    Face::new(2, 2, 0, 0, 3, 3),
    // +x
    Face::new(1, 0, 6, 2, 5, 1),
    Face::new(6, 2, 1, 0, 2, 3),
    // +z
    Face::new(5, 0, 7, 2, 4, 1),
    Face::new(7, 2, 5, 0, 6, 3),
    // -x
    Face::new(4, 0, 3, 2, 0, 1),
    Face::new(3, 2, 4, 0, 7, 3),
    // +y
    Face::new(3, 0, 6, 2, 2, 1),
    Face::new(6, 2, 3, 0, 7, 3),
    // -y
    Face::new(4, 0, 1, 2, 5, 1),
    Face::new(1, 2, 4, 0, 0, 3),
];

/// Creates a box mesh with the given extents.
///
/// # Arguments
///
/// * `width` - Extent along X
/// * `height` - Extent along Y
/// * `depth` - Extent along Z
///
/// # Returns
///
/// A mesh with 8 vertices, 4 texture coordinates (the unit square, reused on
/// every side) and 12 triangles, all in smoothing group 0.
///
/// # Example
///
/// ```rust
/// use primitive_mesh::primitives::create_box;
///
/// let mesh = create_box(10.0, 10.0, 10.0);
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.face_count(), 12);
/// ```
pub fn create_box(width: f64, height: f64, depth: f64) -> Mesh {
    let half = DVec3::new(width, height, depth) / 2.0;
    let mut mesh = MeshBuilder::with_capacity(8, 4, 12);

    // Back (-z) ring, then front (+z) ring, each -x-y, +x-y, +x+y, -x+y
    for z in [-half.z, half.z] {
        mesh.add_point(DVec3::new(-half.x, -half.y, z));
        mesh.add_point(DVec3::new(half.x, -half.y, z));
        mesh.add_point(DVec3::new(half.x, half.y, z));
        mesh.add_point(DVec3::new(-half.x, half.y, z));
    }

    mesh.add_tex_coord(DVec2::new(0.0, 0.0));
    mesh.add_tex_coord(DVec2::new(1.0, 0.0));
    mesh.add_tex_coord(DVec2::new(1.0, 1.0));
    mesh.add_tex_coord(DVec2::new(0.0, 1.0));

    for face in BOX_FACES {
        mesh.add_smoothed_face(face, BOX_SMOOTHING_GROUP);
    }

    mesh.build()
}
