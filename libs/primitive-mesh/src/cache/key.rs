//! # Tessellation Keys
//!
//! Value objects capturing exactly the parameters that determine a mesh.
//!
//! Float fields compare and hash by their bit patterns, so two keys are
//! equal only when every dimension is bit-for-bit identical. `0.0` and
//! `-0.0` are distinct keys; a NaN matches only the same NaN payload.

use crate::primitives::MeshKind;
use std::hash::{Hash, Hasher};

/// A cache key that knows which kind of solid it names.
pub trait TessellationKey: Copy + Eq + Hash + std::fmt::Debug + Send + Sync + 'static {
    /// Kind of solid this key identifies.
    const KIND: MeshKind;
}

/// Key of a box mesh.
#[derive(Debug, Clone, Copy)]
pub struct BoxKey {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl BoxKey {
    /// Creates a key for a box with the given extents.
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    fn bits(&self) -> [u64; 3] {
        [self.width.to_bits(), self.height.to_bits(), self.depth.to_bits()]
    }
}

impl PartialEq for BoxKey {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for BoxKey {}

impl Hash for BoxKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

impl TessellationKey for BoxKey {
    const KIND: MeshKind = MeshKind::Box;
}

/// Key of a sphere mesh.
#[derive(Debug, Clone, Copy)]
pub struct SphereKey {
    pub radius: f64,
    pub divisions: u32,
}

impl SphereKey {
    /// Creates a key for a sphere.
    ///
    /// `divisions` is stored as given; shapes normalize it first so that
    /// equivalent resolutions share one key.
    pub fn new(radius: f64, divisions: u32) -> Self {
        Self { radius, divisions }
    }
}

impl PartialEq for SphereKey {
    fn eq(&self, other: &Self) -> bool {
        self.radius.to_bits() == other.radius.to_bits() && self.divisions == other.divisions
    }
}

impl Eq for SphereKey {}

impl Hash for SphereKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.radius.to_bits().hash(state);
        self.divisions.hash(state);
    }
}

impl TessellationKey for SphereKey {
    const KIND: MeshKind = MeshKind::Sphere;
}

/// Key of a cylinder mesh.
#[derive(Debug, Clone, Copy)]
pub struct CylinderKey {
    pub height: f64,
    pub radius: f64,
    pub divisions: u32,
}

impl CylinderKey {
    /// Creates a key for a cylinder.
    pub fn new(height: f64, radius: f64, divisions: u32) -> Self {
        Self {
            height,
            radius,
            divisions,
        }
    }
}

impl PartialEq for CylinderKey {
    fn eq(&self, other: &Self) -> bool {
        self.height.to_bits() == other.height.to_bits()
            && self.radius.to_bits() == other.radius.to_bits()
            && self.divisions == other.divisions
    }
}

impl Eq for CylinderKey {}

impl Hash for CylinderKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.height.to_bits().hash(state);
        self.radius.to_bits().hash(state);
        self.divisions.hash(state);
    }
}

impl TessellationKey for CylinderKey {
    const KIND: MeshKind = MeshKind::Cylinder;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_separately_built_keys_equal() {
        let a = BoxKey::new(1.0, 2.0, 3.0);
        let b = BoxKey::new(1.0, 2.0, 3.0);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_keys_compare_bitwise() {
        assert_ne!(SphereKey::new(0.0, 64), SphereKey::new(-0.0, 64));
        assert_eq!(SphereKey::new(f64::NAN, 64), SphereKey::new(f64::NAN, 64));
        assert_ne!(
            BoxKey::new(0.1 + 0.2, 1.0, 1.0),
            BoxKey::new(0.3, 1.0, 1.0)
        );
    }

    #[test]
    fn test_divisions_participate() {
        assert_ne!(SphereKey::new(1.0, 32), SphereKey::new(1.0, 64));
        assert_ne!(
            CylinderKey::new(2.0, 1.0, 16),
            CylinderKey::new(2.0, 1.0, 17)
        );
    }

    #[test]
    fn test_cylinder_fields_not_interchangeable() {
        assert_ne!(CylinderKey::new(1.0, 2.0, 8), CylinderKey::new(2.0, 1.0, 8));
    }

    #[test]
    fn test_keys_dedupe_in_set() {
        let set: HashSet<_> = [
            CylinderKey::new(1.0, 1.0, 8),
            CylinderKey::new(1.0, 1.0, 8),
            CylinderKey::new(1.0, 1.0, 9),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_key_kinds() {
        assert_eq!(BoxKey::KIND, MeshKind::Box);
        assert_eq!(SphereKey::KIND, MeshKind::Sphere);
        assert_eq!(CylinderKey::KIND, MeshKind::Cylinder);
    }
}
