//! # Sphere Primitive
//!
//! Generates the mesh for a sphere using latitude/longitude tessellation
//! with explicit pole vertices.

use crate::mesh::{Face, Mesh, MeshBuilder};
use config::constants::{normalize_sphere_divisions, TEXTURE_EDGE_INSET};
use glam::{DVec2, DVec3};
use std::f64::consts::TAU;

/// Number of vertices a sphere mesh has for the given (raw) division count.
///
/// # Example
///
/// ```rust
/// use primitive_mesh::primitives::sphere::sphere_vertex_count;
///
/// assert_eq!(sphere_vertex_count(64), 64 * 31 + 2);
/// assert_eq!(sphere_vertex_count(1), 6);
/// ```
pub fn sphere_vertex_count(divisions: u32) -> usize {
    let div = normalize_sphere_divisions(divisions) as usize;
    div.saturating_mul(div / 2 - 1).saturating_add(2)
}

/// Creates a sphere mesh centered at the origin.
///
/// # Arguments
///
/// * `radius` - The radius of the sphere
/// * `divisions` - Longitude slices; rounded up to a multiple of 4
///
/// # Algorithm
///
/// - `div2 = divisions / 2` latitude bands
/// - `div2 - 1` rings of `divisions` vertices strictly between the poles,
///   south to north, then the south pole and the north pole
/// - Texture coordinates are equirectangular; each ring gets a seam
///   duplicate at `u = 0`, and each pole gets one coordinate per fan
///   triangle so the poles do not pinch the texture
/// - Bands are split into two triangles per quad; the caps are fans from
///   each pole, wrapping index `divisions` back to 0 at the seam
///
/// No smoothing groups are emitted.
///
/// # Example
///
/// ```rust
/// use primitive_mesh::primitives::create_sphere;
///
/// let mesh = create_sphere(5.0, 32);
/// assert_eq!(mesh.vertex_count(), 32 * 15 + 2);
/// ```
pub fn create_sphere(radius: f64, divisions: u32) -> Mesh {
    let div = normalize_sphere_divisions(divisions);
    let div2 = div / 2;

    let (n, n2) = (div as usize, div2 as usize);
    let point_count = sphere_vertex_count(div);
    let tex_count = (n + 1).saturating_mul(n2 - 1).saturating_add(n.saturating_mul(2));
    let face_count = n.saturating_mul(n2 - 1).saturating_mul(2);

    let r_div = 1.0 / div as f64;
    let mut mesh = MeshBuilder::with_capacity(point_count, tex_count, face_count);

    // Rings, south to north
    for y in 0..div2 - 1 {
        let band = y as f64 + 1.0 - (div2 / 2) as f64;
        let latitude = r_div * band * TAU;
        let (sin_lat, cos_lat) = latitude.sin_cos();
        let v = 0.5 + sin_lat * 0.5;

        for i in 0..div {
            let longitude = r_div * i as f64 * TAU;
            let (sin_lon, cos_lon) = longitude.sin_cos();
            mesh.add_point(DVec3::new(
                sin_lon * cos_lat * radius,
                sin_lat * radius,
                cos_lon * cos_lat * radius,
            ));
            mesh.add_tex_coord(DVec2::new(1.0 - r_div * i as f64, v));
        }
        // Seam duplicate
        mesh.add_tex_coord(DVec2::new(0.0, v));
    }

    let south_pole = mesh.add_point(DVec3::new(0.0, -radius, 0.0));
    let north_pole = mesh.add_point(DVec3::new(0.0, radius, 0.0));

    // One pole tex coord per fan slice, centered on the slice
    for v in [TEXTURE_EDGE_INSET, 1.0 - TEXTURE_EDGE_INSET] {
        for i in 0..div {
            mesh.add_tex_coord(DVec2::new(1.0 - r_div * (0.5 + i as f64), v));
        }
    }

    let wrap = |p: u32| if p % div == 0 { p - div } else { p };

    // Bands between adjacent rings
    for y in 0..div2.saturating_sub(2) {
        for x in 0..div {
            let p0 = y * div + x;
            let p1 = p0 + 1;
            let p2 = p0 + div;
            let p3 = p1 + div;

            let t0 = p0 + y;
            let t1 = t0 + 1;
            let t2 = t0 + div + 1;
            let t3 = t1 + div + 1;

            mesh.add_face(Face::new(p0, t0, wrap(p1), t1, p2, t2));
            mesh.add_face(Face::new(wrap(p3), t3, p2, t2, wrap(p1), t1));
        }
    }

    // South cap: fan from the pole to the first ring
    let south_tex = (div2 - 1) * (div + 1);
    for x in 0..div {
        let p1 = x + 1;
        let p2 = x;
        let next = if p1 == div { 0 } else { p1 };
        mesh.add_face(Face::new(south_pole, south_tex + x, next, p1, p2, p2));
    }

    // North cap: fan from the pole to the last ring
    let north_tex = south_tex + div;
    let last_ring = (div2 - 2) * div;
    let last_ring_tex = (div2 - 2) * (div + 1);
    for x in 0..div {
        let p1 = last_ring + x;
        let p2 = p1 + 1;
        let t1 = last_ring_tex + x;
        mesh.add_face(Face::new(north_pole, north_tex + x, p1, t1, wrap(p2), t1 + 1));
    }

    mesh.build()
}
