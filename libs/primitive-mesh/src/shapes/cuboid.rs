//! Axis-aligned box shape.

use super::{dimensions_valid, CachedMesh};
use crate::cache::{BoxKey, MeshManager};
use crate::mesh::{Aabb, Mesh};
use crate::picking::analytic::intersect_box;
use crate::picking::{CullFace, PickHit, Ray};
use config::constants::DEFAULT_BOX_SIZE;
use glam::DVec3;
use std::sync::Arc;

/// A box centered at the origin.
///
/// # Example
///
/// ```rust
/// use primitive_mesh::cache::MeshManager;
/// use primitive_mesh::shapes::BoxShape;
///
/// let manager = MeshManager::shared(Default::default());
/// let mut shape = BoxShape::with_size(manager.clone(), 1.0, 2.0, 3.0);
/// let mesh = shape.mesh().unwrap();
/// assert_eq!(mesh.face_count(), 12);
/// assert_eq!(manager.box_ref_count(&shape.key()), Some(1));
/// ```
#[derive(Debug)]
pub struct BoxShape {
    width: f64,
    height: f64,
    depth: f64,
    cull_face: CullFace,
    cached: CachedMesh<BoxKey>,
}

impl BoxShape {
    /// Creates a box with the default extents.
    pub fn new(manager: Arc<MeshManager>) -> Self {
        Self::with_size(manager, DEFAULT_BOX_SIZE, DEFAULT_BOX_SIZE, DEFAULT_BOX_SIZE)
    }

    /// Creates a box with the given extents.
    pub fn with_size(manager: Arc<MeshManager>, width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
            cull_face: CullFace::default(),
            cached: CachedMesh::new(manager),
        }
    }

    /// Extent along X.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Extent along Y.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Extent along Z.
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Sets the X extent, releasing the held mesh if it changes.
    pub fn set_width(&mut self, width: f64) {
        if width.to_bits() != self.width.to_bits() {
            self.width = width;
            self.cached.release();
        }
    }

    /// Sets the Y extent, releasing the held mesh if it changes.
    pub fn set_height(&mut self, height: f64) {
        if height.to_bits() != self.height.to_bits() {
            self.height = height;
            self.cached.release();
        }
    }

    /// Sets the Z extent, releasing the held mesh if it changes.
    pub fn set_depth(&mut self, depth: f64) {
        if depth.to_bits() != self.depth.to_bits() {
            self.depth = depth;
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

    /// Cache key for the current extents.
    pub fn key(&self) -> BoxKey {
        BoxKey::new(self.width, self.height, self.depth)
    }

    /// The manager this shape draws its mesh from.
    pub fn manager(&self) -> &Arc<MeshManager> {
        self.cached.manager()
    }

    fn is_valid(&self) -> bool {
        dimensions_valid(&[self.width, self.height, self.depth])
    }

    fn size(&self) -> DVec3 {
        DVec3::new(self.width, self.height, self.depth)
    }

    /// Returns the shared mesh, acquiring it on first use.
    ///
    /// `None` when any extent is negative.
    pub fn mesh(&mut self) -> Option<Arc<Mesh>> {
        if !self.is_valid() {
            return None;
        }
        Some(self.cached.get(self.key()))
    }

    /// Local bounds; empty when any extent is negative.
    pub fn bounds(&self) -> Aabb {
        if !self.is_valid() {
            return Aabb::empty();
        }
        Aabb::centered(self.size() * 0.5)
    }

    /// Picks the box; its mesh is exact, so the solid is intersected
    /// directly.
    pub fn intersect(&self, ray: &Ray) -> Option<PickHit> {
        if !self.is_valid() {
            return None;
        }
        intersect_box(ray, self.size(), self.cull_face)
    }
}
