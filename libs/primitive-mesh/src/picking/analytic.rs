//! Exact ray intersection with the solids, centered at the origin.
//!
//! Texture coordinates follow the tessellated layouts so that a pick
//! against the solid and a pick against its mesh agree on the surface
//! parameterization.

use super::{CullFace, PickHit, Ray};
use config::constants::PICK_EPSILON;
use glam::{DVec2, DVec3};
use std::f64::consts::TAU;

/// A surface crossing before clip and cull tests.
#[derive(Debug, Clone, Copy)]
struct Crossing {
    t: f64,
    normal: DVec3,
}

/// Picks the nearest crossing inside the clip range that survives culling.
fn nearest(
    ray: &Ray,
    cull_face: CullFace,
    crossings: impl IntoIterator<Item = Crossing>,
) -> Option<Crossing> {
    crossings
        .into_iter()
        .filter(|c| ray.accepts(c.t) && cull_face.keeps(ray.direction.dot(c.normal)))
        .min_by(|a, b| a.t.total_cmp(&b.t))
}

fn hit(ray: &Ray, t: f64, tex_coord: DVec2) -> PickHit {
    PickHit {
        distance: t,
        point: ray.at(t),
        tex_coord,
        face: None,
    }
}

/// Position of `coord` across an extent, 0 at the low side and 1 at the high.
#[inline]
fn across(coord: f64, extent: f64) -> f64 {
    if extent > 0.0 {
        0.5 + coord / extent
    } else {
        0.5
    }
}

/// Longitude parameter around the Y axis: 1 at angle 0, decreasing toward
/// +x, wrapped into `[0, 1)`.
fn longitude(point: DVec3) -> f64 {
    let u = 1.0 - point.x.atan2(point.z).rem_euclid(TAU) / TAU;
    if u >= 1.0 {
        u - 1.0
    } else {
        u
    }
}

/// Intersects a ray with a box of the given extents (slab method).
pub fn intersect_box(ray: &Ray, size: DVec3, cull_face: CullFace) -> Option<PickHit> {
    let half = size * 0.5;
    let mut enter = Crossing {
        t: f64::NEG_INFINITY,
        normal: DVec3::ZERO,
    };
    let mut exit = Crossing {
        t: f64::INFINITY,
        normal: DVec3::ZERO,
    };

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let dir = ray.direction[axis];

        if dir.abs() < PICK_EPSILON {
            // Parallel to this slab: miss unless already between its planes
            if origin < -half[axis] || origin > half[axis] {
                return None;
            }
            continue;
        }

        let mut normal = DVec3::ZERO;
        normal[axis] = -dir.signum();
        let t_low = (-half[axis] - origin) / dir;
        let t_high = (half[axis] - origin) / dir;
        let (t_in, t_out) = if t_low < t_high {
            (t_low, t_high)
        } else {
            (t_high, t_low)
        };

        if t_in > enter.t {
            enter = Crossing { t: t_in, normal };
        }
        if t_out < exit.t {
            exit = Crossing {
                t: t_out,
                normal: -normal,
            };
        }
    }

    if enter.t > exit.t || enter.normal == DVec3::ZERO {
        return None;
    }

    let crossing = nearest(ray, cull_face, [enter, exit])?;
    let point = ray.at(crossing.t);
    let (x, y, z) = (
        across(point.x, size.x),
        across(point.y, size.y),
        across(point.z, size.z),
    );
    let n = crossing.normal;

    let tex_coord = if n.x > 0.0 {
        DVec2::new(z, y)
    } else if n.x < 0.0 {
        DVec2::new(1.0 - z, y)
    } else if n.y > 0.0 {
        DVec2::new(x, z)
    } else if n.y < 0.0 {
        DVec2::new(x, 1.0 - z)
    } else if n.z > 0.0 {
        DVec2::new(1.0 - x, y)
    } else {
        DVec2::new(x, y)
    };

    Some(hit(ray, crossing.t, tex_coord))
}

/// Intersects a ray with a sphere (quadratic equation).
pub fn intersect_sphere(ray: &Ray, radius: f64, cull_face: CullFace) -> Option<PickHit> {
    let o = ray.origin;
    let d = ray.direction;

    // |o + t*d|^2 = r^2, with b halved
    let a = d.dot(d);
    let b = o.dot(d);
    let c = o.dot(o) - radius * radius;

    let discriminant = b * b - a * c;
    if a < PICK_EPSILON || discriminant < 0.0 || radius <= 0.0 {
        return None;
    }

    let sqrt_disc = discriminant.sqrt();
    let crossings = [(-b - sqrt_disc) / a, (-b + sqrt_disc) / a].map(|t| Crossing {
        t,
        normal: ray.at(t) / radius,
    });

    let crossing = nearest(ray, cull_face, crossings)?;
    let point = ray.at(crossing.t);
    let tex_coord = DVec2::new(longitude(point), 0.5 + point.y / (2.0 * radius));

    Some(hit(ray, crossing.t, tex_coord))
}

/// Intersects a ray with a capped cylinder around the Y axis.
pub fn intersect_cylinder(
    ray: &Ray,
    height: f64,
    radius: f64,
    cull_face: CullFace,
) -> Option<PickHit> {
    if radius <= 0.0 {
        return None;
    }

    let o = ray.origin;
    let d = ray.direction;
    let half_height = height * 0.5;
    let mut crossings = Vec::with_capacity(4);

    // Side wall: x^2 + z^2 = r^2
    let a = d.x * d.x + d.z * d.z;
    if a >= PICK_EPSILON {
        let b = o.x * d.x + o.z * d.z;
        let c = o.x * o.x + o.z * o.z - radius * radius;
        let discriminant = b * b - a * c;
        if discriminant >= 0.0 {
            let sqrt_disc = discriminant.sqrt();
            for t in [(-b - sqrt_disc) / a, (-b + sqrt_disc) / a] {
                let p = ray.at(t);
                if p.y.abs() <= half_height {
                    crossings.push(Crossing {
                        t,
                        normal: DVec3::new(p.x, 0.0, p.z) / radius,
                    });
                }
            }
        }
    }

    // Caps
    if d.y.abs() >= PICK_EPSILON {
        for y in [half_height, -half_height] {
            let t = (y - o.y) / d.y;
            let p = ray.at(t);
            if p.x * p.x + p.z * p.z <= radius * radius {
                crossings.push(Crossing {
                    t,
                    normal: DVec3::new(0.0, y.signum(), 0.0),
                });
            }
        }
    }

    let crossing = nearest(ray, cull_face, crossings)?;
    let p = ray.at(crossing.t);
    let cap_u = 0.5 + p.x / (2.0 * radius);
    let cap_v = p.z / (2.0 * radius);

    let tex_coord = if crossing.normal.y > 0.0 {
        DVec2::new(cap_u, 0.5 + cap_v)
    } else if crossing.normal.y < 0.0 {
        DVec2::new(cap_u, 0.5 - cap_v)
    } else {
        DVec2::new(longitude(p), across(p.y, height))
    };

    Some(hit(ray, crossing.t, tex_coord))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_box_entry_and_exit() {
        let size = DVec3::splat(2.0);
        let ray = Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::NEG_Z);

        let front = intersect_box(&ray, size, CullFace::Back).unwrap();
        assert_relative_eq!(front.distance, 4.0);
        assert_relative_eq!(front.tex_coord.x, 0.5);
        assert!(front.face.is_none());

        let back = intersect_box(&ray, size, CullFace::Front).unwrap();
        assert_relative_eq!(back.distance, 6.0);
        assert_relative_eq!(back.point.z, -1.0);
    }

    #[test]
    fn test_box_from_inside() {
        let ray = Ray::new(DVec3::ZERO, DVec3::X);
        let size = DVec3::new(4.0, 1.0, 1.0);
        assert!(intersect_box(&ray, size, CullFace::Back).is_none());
        let hit = intersect_box(&ray, size, CullFace::None).unwrap();
        assert_relative_eq!(hit.distance, 2.0);
    }

    #[test]
    fn test_box_parallel_miss() {
        let ray = Ray::new(DVec3::new(0.0, 3.0, 5.0), DVec3::NEG_Z);
        assert!(intersect_box(&ray, DVec3::splat(2.0), CullFace::None).is_none());
    }

    #[test]
    fn test_box_side_tex_coords() {
        let size = DVec3::splat(2.0);
        // +x side: u follows z, v follows y
        let ray = Ray::new(DVec3::new(5.0, 0.5, -0.5), DVec3::NEG_X);
        let hit = intersect_box(&ray, size, CullFace::Back).unwrap();
        assert_relative_eq!(hit.tex_coord.x, 0.25);
        assert_relative_eq!(hit.tex_coord.y, 0.75);

        // -y side: v runs against z
        let ray = Ray::new(DVec3::new(0.5, -5.0, 0.5), DVec3::Y);
        let hit = intersect_box(&ray, size, CullFace::Back).unwrap();
        assert_relative_eq!(hit.tex_coord.x, 0.75);
        assert_relative_eq!(hit.tex_coord.y, 0.25);
    }

    #[test]
    fn test_sphere_hit() {
        let ray = Ray::new(DVec3::new(5.0, 0.0, 0.0), DVec3::NEG_X);
        let hit = intersect_sphere(&ray, 1.0, CullFace::Back).unwrap();
        assert_relative_eq!(hit.distance, 4.0);
        assert_relative_eq!(hit.tex_coord.x, 0.75);
        assert_relative_eq!(hit.tex_coord.y, 0.5);
    }

    #[test]
    fn test_sphere_seam_wraps() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::NEG_Z);
        let hit = intersect_sphere(&ray, 1.0, CullFace::Back).unwrap();
        assert!(hit.tex_coord.x >= 0.0 && hit.tex_coord.x < 1.0);
        assert_relative_eq!(hit.tex_coord.x, 0.0);
    }

    #[test]
    fn test_sphere_poles() {
        let ray = Ray::new(DVec3::new(0.0, 5.0, 0.0), DVec3::NEG_Y);
        let hit = intersect_sphere(&ray, 2.0, CullFace::Back).unwrap();
        assert_relative_eq!(hit.distance, 3.0);
        assert_relative_eq!(hit.tex_coord.y, 1.0);
    }

    #[test]
    fn test_sphere_miss_and_clip() {
        let ray = Ray::new(DVec3::new(0.0, 2.0, 5.0), DVec3::NEG_Z);
        assert!(intersect_sphere(&ray, 1.0, CullFace::None).is_none());

        let ray = Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::NEG_Z).with_clip(0.0, 3.0);
        assert!(intersect_sphere(&ray, 1.0, CullFace::None).is_none());
    }

    #[test]
    fn test_sphere_from_inside() {
        let ray = Ray::new(DVec3::ZERO, DVec3::Y);
        assert!(intersect_sphere(&ray, 1.0, CullFace::Back).is_none());
        let hit = intersect_sphere(&ray, 1.0, CullFace::Front).unwrap();
        assert_relative_eq!(hit.distance, 1.0);
    }

    #[test]
    fn test_cylinder_side() {
        let ray = Ray::new(DVec3::new(5.0, 0.5, 0.0), DVec3::NEG_X);
        let hit = intersect_cylinder(&ray, 2.0, 1.0, CullFace::Back).unwrap();
        assert_relative_eq!(hit.distance, 4.0);
        assert_relative_eq!(hit.tex_coord.x, 0.75);
        assert_relative_eq!(hit.tex_coord.y, 0.75);
    }

    #[test]
    fn test_cylinder_caps() {
        let ray = Ray::new(DVec3::new(0.3, 5.0, 0.4), DVec3::NEG_Y);
        let hit = intersect_cylinder(&ray, 2.0, 1.0, CullFace::Back).unwrap();
        assert_relative_eq!(hit.distance, 4.0);
        assert_relative_eq!(hit.tex_coord.x, 0.65);
        assert_relative_eq!(hit.tex_coord.y, 0.7);

        let ray = Ray::new(DVec3::new(0.3, -5.0, 0.4), DVec3::Y);
        let hit = intersect_cylinder(&ray, 2.0, 1.0, CullFace::Back).unwrap();
        assert_relative_eq!(hit.tex_coord.y, 0.3);
    }

    #[test]
    fn test_cylinder_passes_above() {
        let ray = Ray::new(DVec3::new(5.0, 1.5, 0.0), DVec3::NEG_X);
        assert!(intersect_cylinder(&ray, 2.0, 1.0, CullFace::None).is_none());
    }

    #[test]
    fn test_cylinder_degenerate_radius() {
        let ray = Ray::new(DVec3::new(0.0, 5.0, 0.0), DVec3::NEG_Y);
        assert!(intersect_cylinder(&ray, 2.0, 0.0, CullFace::None).is_none());
    }
}
