//! # Mesh Manager
//!
//! Shared, per-kind caches of predefined solid meshes.
//!
//! The manager is constructed explicitly and handed to shapes as an
//! `Arc<MeshManager>`; there is no hidden global instance. Each kind (box,
//! sphere, cylinder) has its own lock, so operations on one kind never wait
//! on another.

use super::key::{BoxKey, CylinderKey, SphereKey, TessellationKey};
use super::soft::{CacheStats, Lookup, Release, SoftCache};
use crate::mesh::Mesh;
use crate::primitives::{create_box, create_cylinder, create_sphere, MeshKind};
use config::constants::CacheConfig;
use parking_lot::Mutex;
use std::sync::Arc;

/// One kind's cache, created lazily inside its lock on first use.
#[derive(Debug)]
struct KindCache<K> {
    inner: Mutex<Option<SoftCache<K, Mesh>>>,
}

impl<K: TessellationKey> KindCache<K> {
    const fn new() -> Self {
        Self {
            inner: Mutex::new(None),
        }
    }

    fn acquire<F>(&self, key: &K, tessellate: F, soft_limit: Option<usize>) -> Arc<Mesh>
    where
        F: FnOnce() -> Mesh,
    {
        let mut guard = self.inner.lock();
        let cache = guard.get_or_insert_with(SoftCache::new);

        let (mesh, lookup) = cache.acquire(*key, tessellate);
        match lookup {
            Lookup::Hit => {
                log::trace!(
                    "{} mesh cache hit for {:?} (refs: {:?})",
                    K::KIND,
                    key,
                    cache.ref_count(key)
                );
                return mesh;
            }
            Lookup::Miss => {
                log::debug!(
                    "{} mesh cache miss for {:?}, tessellated {} vertices",
                    K::KIND,
                    key,
                    mesh.vertex_count()
                );
            }
            Lookup::Reclaimed => {
                log::debug!(
                    "{} mesh for {:?} was reclaimed, re-tessellated",
                    K::KIND,
                    key
                );
            }
        }

        if let Some(limit) = soft_limit {
            let resident = cache.resident_weight(Mesh::vertex_count);
            if resident > limit {
                let demoted = cache.soften();
                log::info!(
                    "{} mesh cache holds {} vertices (limit {}), softened {} entries",
                    K::KIND,
                    resident,
                    limit,
                    demoted
                );
            }
        }

        mesh
    }

    fn release(&self, key: &K) {
        let mut guard = self.inner.lock();
        let Some(cache) = guard.as_mut() else {
            return;
        };

        match cache.release(key) {
            Release::Absent => {}
            Release::Reclaimed => {
                log::debug!("{} mesh for {:?} already reclaimed, purged", K::KIND, key);
            }
            Release::Retained(refs) => {
                log::trace!("{} mesh released for {:?} (refs: {})", K::KIND, key, refs);
            }
            Release::Removed => {
                log::debug!("{} mesh for {:?} has no referents, removed", K::KIND, key);
            }
        }
    }

    fn ref_count(&self, key: &K) -> Option<usize> {
        self.inner.lock().as_ref().and_then(|cache| cache.ref_count(key))
    }

    fn len(&self) -> usize {
        self.inner.lock().as_ref().map_or(0, SoftCache::len)
    }

    fn stats(&self) -> CacheStats {
        self.inner
            .lock()
            .as_ref()
            .map(|cache| cache.stats().clone())
            .unwrap_or_default()
    }

    fn soften(&self) -> usize {
        self.inner.lock().as_mut().map_or(0, SoftCache::soften)
    }

    fn clear(&self) {
        if let Some(cache) = self.inner.lock().as_mut() {
            cache.clear();
        }
    }
}

/// Shared cache of box, sphere and cylinder meshes.
///
/// Identical keys share one mesh instance. Every `get_*` call counts as one
/// reference and must be balanced by one `invalidate_*` call with the same
/// key; the entry is removed when its count returns to zero.
///
/// # Thread Safety
///
/// `MeshManager` is `Send + Sync`. Each kind's operations execute in a
/// single total order; no ordering exists between different kinds.
///
/// # Example
///
/// ```rust
/// use primitive_mesh::cache::{BoxKey, MeshManager};
/// use std::sync::Arc;
///
/// let manager = MeshManager::default();
/// let key = BoxKey::new(1.0, 2.0, 3.0);
///
/// let a = manager.get_box_mesh(1.0, 2.0, 3.0, &key);
/// let b = manager.get_box_mesh(1.0, 2.0, 3.0, &BoxKey::new(1.0, 2.0, 3.0));
/// assert!(Arc::ptr_eq(&a, &b));
/// assert_eq!(manager.box_ref_count(&key), Some(2));
///
/// manager.invalidate_box_mesh(&key);
/// manager.invalidate_box_mesh(&key);
/// assert_eq!(manager.box_ref_count(&key), None);
/// ```
#[derive(Debug)]
pub struct MeshManager {
    config: CacheConfig,
    boxes: KindCache<BoxKey>,
    spheres: KindCache<SphereKey>,
    cylinders: KindCache<CylinderKey>,
}

impl Default for MeshManager {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl MeshManager {
    /// Creates a manager with empty caches.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            boxes: KindCache::new(),
            spheres: KindCache::new(),
            cylinders: KindCache::new(),
        }
    }

    /// Creates a manager wrapped for sharing between shapes.
    pub fn shared(config: CacheConfig) -> Arc<Self> {
        Arc::new(Self::new(config))
    }

    /// Returns the configuration this manager was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Returns the box mesh for `key`, tessellating it from the given
    /// extents on a miss.
    pub fn get_box_mesh(&self, width: f64, height: f64, depth: f64, key: &BoxKey) -> Arc<Mesh> {
        self.boxes.acquire(
            key,
            || create_box(width, height, depth),
            self.config.soft_limit_vertices,
        )
    }

    /// Returns the sphere mesh for `key`, tessellating it on a miss.
    pub fn get_sphere_mesh(&self, radius: f64, divisions: u32, key: &SphereKey) -> Arc<Mesh> {
        self.spheres.acquire(
            key,
            || create_sphere(radius, divisions),
            self.config.soft_limit_vertices,
        )
    }

    /// Returns the cylinder mesh for `key`, tessellating it on a miss.
    pub fn get_cylinder_mesh(
        &self,
        height: f64,
        radius: f64,
        divisions: u32,
        key: &CylinderKey,
    ) -> Arc<Mesh> {
        self.cylinders.acquire(
            key,
            || create_cylinder(height, radius, divisions),
            self.config.soft_limit_vertices,
        )
    }

    /// Releases one reference to a box mesh. No-op for unknown keys.
    pub fn invalidate_box_mesh(&self, key: &BoxKey) {
        self.boxes.release(key);
    }

    /// Releases one reference to a sphere mesh. No-op for unknown keys.
    pub fn invalidate_sphere_mesh(&self, key: &SphereKey) {
        self.spheres.release(key);
    }

    /// Releases one reference to a cylinder mesh. No-op for unknown keys.
    pub fn invalidate_cylinder_mesh(&self, key: &CylinderKey) {
        self.cylinders.release(key);
    }

    /// Reference count of a live box entry.
    pub fn box_ref_count(&self, key: &BoxKey) -> Option<usize> {
        self.boxes.ref_count(key)
    }

    /// Reference count of a live sphere entry.
    pub fn sphere_ref_count(&self, key: &SphereKey) -> Option<usize> {
        self.spheres.ref_count(key)
    }

    /// Reference count of a live cylinder entry.
    pub fn cylinder_ref_count(&self, key: &CylinderKey) -> Option<usize> {
        self.cylinders.ref_count(key)
    }

    /// Demotes every cached mesh to a soft reference.
    ///
    /// Meshes still held by a shape stay alive and are promoted again on
    /// their next lookup; all others are freed, and their entries purged the
    /// next time they are touched.
    ///
    /// # Returns
    ///
    /// The number of entries demoted across all kinds.
    pub fn relieve_memory_pressure(&self) -> usize {
        let demoted = self.boxes.soften() + self.spheres.soften() + self.cylinders.soften();
        log::info!("Relieved mesh cache memory pressure, softened {} entries", demoted);
        demoted
    }

    /// Number of entries in one kind's cache (diagnostics only).
    pub fn cache_len(&self, kind: MeshKind) -> usize {
        match kind {
            MeshKind::Box => self.boxes.len(),
            MeshKind::Sphere => self.spheres.len(),
            MeshKind::Cylinder => self.cylinders.len(),
        }
    }

    /// Statistics of one kind's cache.
    pub fn stats(&self, kind: MeshKind) -> CacheStats {
        match kind {
            MeshKind::Box => self.boxes.stats(),
            MeshKind::Sphere => self.spheres.stats(),
            MeshKind::Cylinder => self.cylinders.stats(),
        }
    }

    /// Drops every entry of every kind (diagnostics only).
    pub fn clear(&self) {
        self.boxes.clear();
        self.spheres.clear();
        self.cylinders.clear();
        log::info!("Cleared all mesh caches");
    }
}
