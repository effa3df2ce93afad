//! Capped cylinder shape, axis along Y.

use super::{dimensions_valid, CachedMesh};
use crate::cache::{CylinderKey, MeshManager};
use crate::mesh::{Aabb, Mesh};
use crate::picking::analytic::intersect_cylinder;
use crate::picking::{CullFace, PickHit, Ray};
use config::constants::{
    clamp_cylinder_divisions, DEFAULT_CYLINDER_HEIGHT, DEFAULT_CYLINDER_RADIUS, DEFAULT_DIVISIONS,
};
use glam::DVec3;
use std::sync::Arc;

/// A cylinder centered at the origin.
///
/// Divisions below 3 are raised to 3.
#[derive(Debug)]
pub struct CylinderShape {
    height: f64,
    radius: f64,
    divisions: u32,
    cull_face: CullFace,
    cached: CachedMesh<CylinderKey>,
}

impl CylinderShape {
    /// Creates a cylinder with the default height, radius and divisions.
    pub fn new(manager: Arc<MeshManager>) -> Self {
        Self::with_divisions(
            manager,
            DEFAULT_CYLINDER_HEIGHT,
            DEFAULT_CYLINDER_RADIUS,
            DEFAULT_DIVISIONS,
        )
    }

    /// Creates a shape with the given dimensions and default divisions.
    pub fn with_size(manager: Arc<MeshManager>, height: f64, radius: f64) -> Self {
        Self::with_divisions(manager, height, radius, DEFAULT_DIVISIONS)
    }

    /// Creates a shape with explicit dimensions and divisions.
    pub fn with_divisions(
        manager: Arc<MeshManager>,
        height: f64,
        radius: f64,
        divisions: u32,
    ) -> Self {
        Self {
            height,
            radius,
            divisions: clamp_cylinder_divisions(divisions),
            cull_face: CullFace::default(),
            cached: CachedMesh::new(manager),
        }
    }

    /// Extent along the Y axis.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Division count after clamping.
    pub fn divisions(&self) -> u32 {
        self.divisions
    }

    /// Sets the Y extent, releasing the held mesh if it changes.
    pub fn set_height(&mut self, height: f64) {
        if height.to_bits() != self.height.to_bits() {
            self.height = height;
            self.cached.release();
        }
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
        let divisions = clamp_cylinder_divisions(divisions);
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
    pub fn key(&self) -> CylinderKey {
        CylinderKey::new(self.height, self.radius, self.divisions)
    }

    /// The manager this shape draws its mesh from.
    pub fn manager(&self) -> &Arc<MeshManager> {
        self.cached.manager()
    }

    fn is_valid(&self) -> bool {
        dimensions_valid(&[self.height, self.radius])
    }

    /// Returns the shared mesh, acquiring it on first use.
    ///
    /// `None` when the height or radius is negative.
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
        Aabb::centered(DVec3::new(self.radius, self.height * 0.5, self.radius))
    }

    /// Picks the cylinder, against its mesh when coarser than the default
    /// divisions and against the exact solid otherwise.
    pub fn intersect(&mut self, ray: &Ray) -> Option<PickHit> {
        if self.divisions < DEFAULT_DIVISIONS {
            return self.mesh()?.intersect_ray(ray, self.cull_face);
        }
        if !self.is_valid() {
            return None;
        }
        intersect_cylinder(ray, self.height, self.radius, self.cull_face)
    }
}
