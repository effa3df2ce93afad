//! # Cylinder Primitive
//!
//! Generates the mesh for a capped cylinder centered at the origin with its
//! axis along Y.

use crate::mesh::{Face, Mesh, MeshBuilder};
use config::constants::{clamp_cylinder_divisions, TEXTURE_EDGE_INSET};
use glam::{DVec2, DVec3};
use std::f64::consts::TAU;

/// Smoothing group of the side wall.
pub const SIDE_SMOOTHING_GROUP: u32 = 1;

/// Smoothing group of both caps; never shared with the side wall.
pub const CAP_SMOOTHING_GROUP: u32 = 2;

/// Creates a cylinder mesh.
///
/// # Arguments
///
/// * `height` - Extent along Y
/// * `radius` - Radius of both caps
/// * `divisions` - Segments around the circumference (clamped to at least 3)
///
/// # Layout
///
/// - Vertices: the `+h/2` rim, the `-h/2` rim, then the `+h/2` cap center
///   and the `-h/2` cap center (`2 * divisions + 2`)
/// - Texture coordinates: each rim wraps horizontally with a seam duplicate
///   and is inset by 1/256 from the texture edge; each cap has its own fan
///   of `divisions + 1` coordinates; one shared cap center at (0.5, 0.5)
/// - Faces: `2 * divisions` side triangles (group 1), then `divisions`
///   triangles per cap (group 2)
///
/// # Example
///
/// ```rust
/// use primitive_mesh::primitives::create_cylinder;
///
/// let mesh = create_cylinder(10.0, 5.0, 32);
/// assert_eq!(mesh.vertex_count(), 66);
/// assert_eq!(mesh.face_count(), 128);
/// ```
pub fn create_cylinder(height: f64, radius: f64, divisions: u32) -> Mesh {
    let div = clamp_cylinder_divisions(divisions);

    let n = div as usize;
    let point_count = n.saturating_mul(2).saturating_add(2);
    let tex_count = (n + 1).saturating_mul(4).saturating_add(1);
    let face_count = n.saturating_mul(4);

    let step = 1.0 / div as f64;
    let half_height = height * 0.5;
    let mut mesh = MeshBuilder::with_capacity(point_count, tex_count, face_count);

    // Rims: +h/2 first, then -h/2
    for (y, v) in [
        (half_height, 1.0 - TEXTURE_EDGE_INSET),
        (-half_height, TEXTURE_EDGE_INSET),
    ] {
        for i in 0..div {
            let angle = step * i as f64 * TAU;
            let (sin, cos) = angle.sin_cos();
            mesh.add_point(DVec3::new(sin * radius, y, cos * radius));
            mesh.add_tex_coord(DVec2::new(1.0 - step * i as f64, v));
        }
        // Seam duplicate
        mesh.add_tex_coord(DVec2::new(0.0, v));
    }

    let upper_center = mesh.add_point(DVec3::new(0.0, half_height, 0.0));
    let lower_center = mesh.add_point(DVec3::new(0.0, -half_height, 0.0));

    // Cap fans; the last entry closes the fan at angle 0
    for flip in [1.0, -1.0] {
        for i in 0..=div {
            let angle = if i < div { step * i as f64 * TAU } else { 0.0 };
            let (sin, cos) = angle.sin_cos();
            mesh.add_tex_coord(DVec2::new(0.5 + sin * 0.5, 0.5 + flip * cos * 0.5));
        }
    }
    let cap_center_tex = mesh.add_tex_coord(DVec2::new(0.5, 0.5));

    let wrap = |p: u32| if p % div == 0 { p - div } else { p };

    // Side wall
    for p0 in 0..div {
        let p1 = p0 + 1;
        let p2 = p0 + div;
        let p3 = p1 + div;

        mesh.add_smoothed_face(
            Face::new(p0, p0, p2, p2 + 1, wrap(p1), p1),
            SIDE_SMOOTHING_GROUP,
        );
        mesh.add_smoothed_face(
            Face::new(wrap(p3), p3 + 1, wrap(p1), p1, p2, p2 + 1),
            SIDE_SMOOTHING_GROUP,
        );
    }

    // +h/2 cap
    let fan_start = (div + 1) * 2;
    for p0 in 0..div {
        let t0 = fan_start + p0;
        mesh.add_smoothed_face(
            Face::new(p0, t0, wrap(p0 + 1), t0 + 1, upper_center, cap_center_tex),
            CAP_SMOOTHING_GROUP,
        );
    }

    // -h/2 cap
    let fan_start = (div + 1) * 3;
    for p0 in 0..div {
        let t0 = fan_start + p0;
        mesh.add_smoothed_face(
            Face::new(p0 + div, t0, lower_center, cap_center_tex, wrap(p0 + 1 + div), t0 + 1),
            CAP_SMOOTHING_GROUP,
        );
    }

    mesh.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cylinder_counts() {
        let mesh = create_cylinder(2.0, 1.0, 64);
        assert_eq!(mesh.vertex_count(), 130);
        assert_eq!(mesh.tex_coord_count(), 65 * 4 + 1);
        assert_eq!(mesh.face_count(), 256);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_cylinder_clamps_divisions() {
        assert_eq!(create_cylinder(1.0, 1.0, 0), create_cylinder(1.0, 1.0, 3));
        assert_eq!(create_cylinder(1.0, 1.0, 2).vertex_count(), 8);
    }

    #[test]
    fn test_cylinder_centers_follow_rims() {
        let mesh = create_cylinder(4.0, 1.0, 8);
        assert_eq!(mesh.position(16), DVec3::new(0.0, 2.0, 0.0));
        assert_eq!(mesh.position(17), DVec3::new(0.0, -2.0, 0.0));
    }

    #[test]
    fn test_cylinder_smoothing_groups() {
        let div = 12;
        let mesh = create_cylinder(1.0, 1.0, div);
        let groups = mesh.smoothing_groups().unwrap();
        let (side, caps) = groups.split_at(2 * div as usize);
        assert!(side.iter().all(|&g| g == SIDE_SMOOTHING_GROUP));
        assert!(caps.iter().all(|&g| g == CAP_SMOOTHING_GROUP));
        assert_eq!(caps.len(), 2 * div as usize);
    }

    #[test]
    fn test_cylinder_rim_radius() {
        let mesh = create_cylinder(3.0, 2.0, 20);
        for p in &mesh.positions()[..40] {
            assert_relative_eq!((p.x * p.x + p.z * p.z).sqrt(), 2.0, epsilon = 1e-12);
            assert_relative_eq!(p.y.abs(), 1.5);
        }
    }

    #[test]
    fn test_cylinder_side_tex_inset() {
        let mesh = create_cylinder(1.0, 1.0, 6);
        let tex = mesh.tex_coords();
        assert!(tex[..7].iter().all(|t| t.y == 1.0 - TEXTURE_EDGE_INSET));
        assert!(tex[7..14].iter().all(|t| t.y == TEXTURE_EDGE_INSET));
        assert_eq!(tex[tex.len() - 1], DVec2::new(0.5, 0.5));
    }

    #[test]
    fn test_cylinder_cap_faces_use_center() {
        let div = 5;
        let mesh = create_cylinder(1.0, 1.0, div);
        let upper = mesh.face(2 * div as usize);
        let lower = mesh.face(3 * div as usize);
        assert_eq!(upper.vertices[2], 2 * div);
        assert_eq!(lower.vertices[1], 2 * div + 1);
    }
}
