//! # Mesh Cache
//!
//! Deduplicates predefined solid meshes across every shape that needs one.
//!
//! ## Features
//!
//! - **Value keys**: bit-exact keys per solid kind ([`key`])
//! - **Reference counting**: one reference per `get`, released by `invalidate`
//! - **Soft residency**: memory pressure demotes entries to weak references;
//!   meshes nobody holds are reclaimed and re-tessellated on demand ([`soft`])
//! - **Statistics**: hit/miss/reclaim counts per kind
//!
//! ## Example
//!
//! ```rust
//! use primitive_mesh::cache::{MeshManager, SphereKey};
//!
//! let manager = MeshManager::default();
//! let key = SphereKey::new(5.0, 32);
//! let mesh = manager.get_sphere_mesh(5.0, 32, &key);
//! assert_eq!(mesh.vertex_count(), 32 * 15 + 2);
//! manager.invalidate_sphere_mesh(&key);
//! ```

pub mod key;
pub mod manager;
pub mod soft;

pub use key::{BoxKey, CylinderKey, SphereKey, TessellationKey};
pub use manager::MeshManager;
pub use soft::CacheStats;

#[cfg(test)]
mod tests;
