//! # Shapes
//!
//! Box, sphere and cylinder objects that draw their meshes from a shared
//! [`MeshManager`].
//!
//! A shape acquires its mesh lazily on the first [`mesh`](BoxShape::mesh)
//! call and holds exactly one cache reference while it has a mesh. Changing
//! a dimension releases that reference; dropping the shape releases it too.
//! Shapes with a negative dimension never ask the cache.

pub mod cuboid;
pub mod cylinder;
pub mod sphere;

pub use cuboid::BoxShape;
pub use cylinder::CylinderShape;
pub use sphere::SphereShape;

use crate::cache::{BoxKey, CylinderKey, MeshManager, SphereKey, TessellationKey};
use crate::mesh::Mesh;
use std::sync::Arc;

/// A key the manager can acquire and release on a shape's behalf.
trait ManagedKey: TessellationKey {
    fn acquire(&self, manager: &MeshManager) -> Arc<Mesh>;
    fn release(&self, manager: &MeshManager);
}

impl ManagedKey for BoxKey {
    fn acquire(&self, manager: &MeshManager) -> Arc<Mesh> {
        manager.get_box_mesh(self.width, self.height, self.depth, self)
    }

    fn release(&self, manager: &MeshManager) {
        manager.invalidate_box_mesh(self);
    }
}

impl ManagedKey for SphereKey {
    fn acquire(&self, manager: &MeshManager) -> Arc<Mesh> {
        manager.get_sphere_mesh(self.radius, self.divisions, self)
    }

    fn release(&self, manager: &MeshManager) {
        manager.invalidate_sphere_mesh(self);
    }
}

impl ManagedKey for CylinderKey {
    fn acquire(&self, manager: &MeshManager) -> Arc<Mesh> {
        manager.get_cylinder_mesh(self.height, self.radius, self.divisions, self)
    }

    fn release(&self, manager: &MeshManager) {
        manager.invalidate_cylinder_mesh(self);
    }
}

/// A shape's single reference into the cache.
///
/// Holds at most one key; the key is released exactly once, either when a
/// different key is requested, on [`release`](Self::release) or on drop.
#[derive(Debug)]
struct CachedMesh<K: ManagedKey> {
    manager: Arc<MeshManager>,
    key: Option<K>,
    mesh: Option<Arc<Mesh>>,
}

impl<K: ManagedKey> CachedMesh<K> {
    fn new(manager: Arc<MeshManager>) -> Self {
        Self {
            manager,
            key: None,
            mesh: None,
        }
    }

    fn manager(&self) -> &Arc<MeshManager> {
        &self.manager
    }

    /// Returns the mesh for `key`, acquiring it if not already held.
    fn get(&mut self, key: K) -> Arc<Mesh> {
        if self.key == Some(key) {
            if let Some(mesh) = &self.mesh {
                return Arc::clone(mesh);
            }
        }

        self.release();
        let mesh = key.acquire(&self.manager);
        self.key = Some(key);
        self.mesh = Some(Arc::clone(&mesh));
        mesh
    }

    fn release(&mut self) {
        self.mesh = None;
        if let Some(key) = self.key.take() {
            key.release(&self.manager);
        }
    }
}

impl<K: ManagedKey> Drop for CachedMesh<K> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Returns true if no dimension is negative or NaN.
fn dimensions_valid(dimensions: &[f64]) -> bool {
    dimensions.iter().all(|&d| d >= 0.0)
}
