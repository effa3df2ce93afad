//! Sphere shape.

use super::{dimensions_valid, CachedMesh};
use crate::cache::{MeshManager, SphereKey};
use crate::mesh::{Aabb, Mesh};
use crate::picking::analytic::intersect_sphere;
use crate::picking::{CullFace, PickHit, Ray};
use config::constants::{normalize_sphere_divisions, DEFAULT_DIVISIONS, DEFAULT_SPHERE_RADIUS};
use glam::DVec3;
use std::sync::Arc;

/// A sphere centered at the origin.
///
/// Divisions are normalized on the way in (at least 1, rounded up to a
/// multiple of 4), so spheres of 1 and 4 divisions share one mesh.
#[derive(Debug)]
pub struct SphereShape {
    radius: f64,
    divisions: u32,
    cull_face: CullFace,
    cached: CachedMesh<SphereKey>,
}

impl SphereShape {
    /// Creates a sphere with the default radius and divisions.
    pub fn new(manager: Arc<MeshManager>) -> Self {
        Self::with_divisions(manager, DEFAULT_SPHERE_RADIUS, DEFAULT_DIVISIONS)
    }

    /// Creates a sphere with the given radius and default divisions.
    pub fn with_radius(manager: Arc<MeshManager>, radius: f64) -> Self {
        Self::with_divisions(manager, radius, DEFAULT_DIVISIONS)
    }

    /// Creates a shape with explicit dimensions and divisions.
    pub fn with_divisions(manager: Arc<MeshManager>, radius: f64, divisions: u32) -> Self {
        Self {
            radius,
            divisions: normalize_sphere_divisions(divisions),
            cull_face: CullFace::default(),
            cached: CachedMesh::new(manager),
        }
    }

    /// Radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Normalized divisions.
    pub fn divisions(&self) -> u32 {
        self.divisions
    }

    /// Sets the radius, releasing the held mesh if it changes.
    pub fn set_radius(&mut self, radius: f64) {
        if radius.to_bits() != self.radius.to_bits() {
            self.radius = radius;
            self.cached.release();
        }
    }

    /// Sets the divisions, releasing the held mesh if the normalized value changes.
    pub fn set_divisions(&mut self, divisions: u32) {
        let divisions = normalize_sphere_divisions(divisions);
        if divisions != self.divisions {
            self.divisions = divisions;
            self.cached.release();
        }
    }

    /// Side of the surface ignored when picking.
    pub fn cull_face(&self) -> CullFace {
        self.cull_face
    }

    /// Sets the side ignored when picking.
    pub fn set_cull_face(&mut self, cull_face: CullFace) {
        self.cull_face = cull_face;
    }

    /// Cache key for the current dimensions.
    pub fn key(&self) -> SphereKey {
        SphereKey::new(self.radius, self.divisions)
    }

    /// The manager this shape draws its mesh from.
    pub fn manager(&self) -> &Arc<MeshManager> {
        self.cached.manager()
    }

    fn is_valid(&self) -> bool {
        dimensions_valid(&[self.radius])
    }

    /// Returns the shared mesh, acquiring it on first use.
    ///
    /// `None` when the radius is negative.
    pub fn mesh(&mut self) -> Option<Arc<Mesh>> {
        if !self.is_valid() {
            return None;
        }
        Some(self.cached.get(self.key()))
    }

    /// Local bounds; empty when a dimension is negative.
    pub fn bounds(&self) -> Aabb {
        if !self.is_valid() {
            return Aabb::empty();
        }
        Aabb::centered(DVec3::splat(self.radius))
    }

    /// Picks the sphere.
    ///
    /// Coarse spheres (fewer divisions than the default) are picked against
    /// their mesh so hits land on the visible facets; finer ones against
    /// the exact sphere.
    pub fn intersect(&mut self, ray: &Ray) -> Option<PickHit> {
        if self.divisions < DEFAULT_DIVISIONS {
            return self.mesh()?.intersect_ray(ray, self.cull_face);
        }
        if !self.is_valid() {
            return None;
        }
        intersect_sphere(ray, self.radius, self.cull_face)
    }
}
