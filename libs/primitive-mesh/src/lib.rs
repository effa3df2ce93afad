//! # Primitive Mesh
//!
//! Tessellation of predefined solids (box, sphere, cylinder) and a shared,
//! reference-counted cache that lets every shape with the same parameters
//! draw from one mesh instance.
//!
//! ## Architecture
//!
//! ```text
//! primitives (pure tessellators)
//!     → cache (keys → SoftCache → MeshManager)
//!         → shapes (BoxShape, SphereShape, CylinderShape)
//!             → picking / export
//! ```
//!
//! ## Features
//!
//! - **Deterministic tessellation**: identical parameters yield identical
//!   vertex, texture coordinate and face arrays
//! - **Shared meshes**: one mesh per distinct key, counted per acquisition
//! - **Soft residency**: memory pressure drops meshes no shape is holding
//! - **Picking**: mesh and exact-solid ray intersection
//!
//! ## Usage
//!
//! ```rust
//! use primitive_mesh::{MeshManager, SphereShape};
//!
//! let manager = MeshManager::shared(Default::default());
//! let mut a = SphereShape::with_radius(manager.clone(), 2.0);
//! let mut b = SphereShape::with_radius(manager.clone(), 2.0);
//!
//! let mesh_a = a.mesh().unwrap();
//! let mesh_b = b.mesh().unwrap();
//! assert!(std::sync::Arc::ptr_eq(&mesh_a, &mesh_b));
//! ```

pub mod cache;
pub mod error;
pub mod export;
pub mod mesh;
pub mod picking;
pub mod primitives;
pub mod shapes;

pub use cache::{BoxKey, CylinderKey, MeshManager, SphereKey};
pub use error::MeshError;
pub use export::MeshBuffers;
pub use mesh::{Aabb, Face, Mesh, MeshBuilder};
pub use picking::{CullFace, PickHit, Ray};
pub use primitives::{create_box, create_cylinder, create_sphere, MeshKind};
pub use shapes::{BoxShape, CylinderShape, SphereShape};
