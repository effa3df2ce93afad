//! # Picking
//!
//! Ray intersection against meshes and against the exact solids they
//! approximate.
//!
//! Mesh picking tests every face with the Möller–Trumbore algorithm and
//! interpolates the hit's texture coordinate barycentrically. Analytic
//! picking ([`analytic`]) solves the solid's surface equations directly and
//! reports the texture coordinate the tessellated mesh would produce at the
//! same point.

pub mod analytic;

use crate::mesh::Mesh;
use config::constants::PICK_EPSILON;
use glam::{DVec2, DVec3};

/// A pick ray with a clip range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin
    pub origin: DVec3,
    /// Ray direction; distances are measured in multiples of its length
    pub direction: DVec3,
    /// Nearest accepted ray parameter
    pub near: f64,
    /// Farthest accepted ray parameter
    pub far: f64,
}

impl Ray {
    /// Creates an unclipped ray with a normalized direction.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
            near: 0.0,
            far: f64::INFINITY,
        }
    }

    /// Restricts accepted hits to `[near, far]`.
    pub fn with_clip(mut self, near: f64, far: f64) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Point at parameter `t`.
    #[inline]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Returns true if `t` lies inside the clip range.
    #[inline]
    pub fn accepts(&self, t: f64) -> bool {
        t >= self.near && t <= self.far
    }
}

/// Which side of a surface is ignored when picking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CullFace {
    /// Both sides are hit
    None,
    /// Surfaces facing away from the ray are ignored
    #[default]
    Back,
    /// Surfaces facing the ray are ignored
    Front,
}

impl CullFace {
    /// Returns true if a hit is kept, given the cosine between the ray
    /// direction and the outward surface normal.
    pub fn keeps(self, facing: f64) -> bool {
        match self {
            CullFace::None => true,
            CullFace::Back => facing <= 0.0,
            CullFace::Front => facing >= 0.0,
        }
    }
}

/// The closest intersection of a ray with a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// Ray parameter of the hit
    pub distance: f64,
    /// Intersection point in shape-local coordinates
    pub point: DVec3,
    /// Texture coordinate at the intersection
    pub tex_coord: DVec2,
    /// Index of the hit face; `None` for analytic hits
    pub face: Option<usize>,
}

/// Möller–Trumbore ray-triangle intersection.
///
/// Returns `(t, u, v, det)`: the ray parameter, the barycentric weights of
/// `v1` and `v2`, and the determinant, which is positive when the triangle
/// winds counter-clockwise as seen from the ray.
fn ray_triangle_intersection(
    ray: &Ray,
    v0: DVec3,
    v1: DVec3,
    v2: DVec3,
) -> Option<(f64, f64, f64, f64)> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < PICK_EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    Some((t, u, v, a))
}

impl Mesh {
    /// Finds the closest face hit by `ray` within its clip range.
    ///
    /// # Arguments
    ///
    /// * `ray` - Ray in mesh-local coordinates
    /// * `cull_face` - Side of each face to ignore
    ///
    /// # Returns
    ///
    /// The nearest hit with its barycentrically interpolated texture
    /// coordinate, or `None` if no accepted face is hit.
    pub fn intersect_ray(&self, ray: &Ray, cull_face: CullFace) -> Option<PickHit> {
        let mut closest: Option<PickHit> = None;

        for index in 0..self.face_count() {
            let [v0, v1, v2] = self.face_corners(index);
            let Some((t, u, v, det)) = ray_triangle_intersection(ray, v0, v1, v2) else {
                continue;
            };
            // det > 0 means the face looks back at the ray
            if !ray.accepts(t) || !cull_face.keeps(-det) {
                continue;
            }
            if closest.is_some_and(|hit| hit.distance <= t) {
                continue;
            }

            let [t0, t1, t2] = self.face(index).tex_coords;
            let tex = self.tex_coords();
            let tex_coord = tex[t0 as usize] * (1.0 - u - v)
                + tex[t1 as usize] * u
                + tex[t2 as usize] * v;

            closest = Some(PickHit {
                distance: t,
                point: ray.at(t),
                tex_coord,
                face: Some(index),
            });
        }

        closest
    }
}
