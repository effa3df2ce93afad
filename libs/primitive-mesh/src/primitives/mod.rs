//! # Primitives
//!
//! Tessellation of the predefined solids (box, sphere, cylinder).
//!
//! Every tessellator is a pure function of its parameters: identical inputs
//! produce identical vertex, texture coordinate and face arrays. Sizes are
//! not validated here; shapes reject negative dimensions before asking.

pub mod cuboid;
pub mod cylinder;
pub mod sphere;

pub use cuboid::create_box;
pub use cylinder::create_cylinder;
pub use sphere::create_sphere;

/// Distinguishes the three predefined solids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    /// Axis-aligned box
    Box,
    /// Latitude/longitude sphere
    Sphere,
    /// Capped cylinder
    Cylinder,
}

impl MeshKind {
    /// Every kind, in cache order.
    pub const ALL: [MeshKind; 3] = [MeshKind::Box, MeshKind::Sphere, MeshKind::Cylinder];

    /// Returns the kind name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            MeshKind::Box => "box",
            MeshKind::Sphere => "sphere",
            MeshKind::Cylinder => "cylinder",
        }
    }
}

impl std::fmt::Display for MeshKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
