//! # Configuration Constants
//!
//! Constants shared by the tessellators, the mesh cache and the shape
//! objects that sit on top of them.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point tolerance for picking
//! - **Dimensions**: Default sizes of the predefined solids
//! - **Resolution**: Division defaults and clamps
//! - **Texturing**: Texture-space insets
//! - **Cache**: Soft memory budget for resident meshes

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Threshold below which a ray is treated as parallel to a triangle, slab
/// or cap during picking.
pub const PICK_EPSILON: f64 = 1e-9;

// =============================================================================
// DIMENSION CONSTANTS
// =============================================================================

/// Default edge length of a box along each axis.
pub const DEFAULT_BOX_SIZE: f64 = 2.0;

/// Default sphere radius.
pub const DEFAULT_SPHERE_RADIUS: f64 = 1.0;

/// Default cylinder height.
pub const DEFAULT_CYLINDER_HEIGHT: f64 = 2.0;

/// Default cylinder radius.
pub const DEFAULT_CYLINDER_RADIUS: f64 = 1.0;

// =============================================================================
// RESOLUTION CONSTANTS
// =============================================================================

/// Default number of divisions for spheres and cylinders.
///
/// Shapes at or above this resolution are picked analytically; below it
/// they are picked against their tessellated mesh.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_DIVISIONS;
/// assert_eq!(DEFAULT_DIVISIONS % 4, 0);
/// ```
pub const DEFAULT_DIVISIONS: u32 = 64;

/// Smallest division count accepted for a sphere before rounding.
pub const MIN_SPHERE_DIVISIONS: u32 = 1;

/// Sphere divisions are rounded up to a multiple of this step.
pub const SPHERE_DIVISION_STEP: u32 = 4;

/// Largest sphere division count; values above it saturate here.
pub const MAX_SPHERE_DIVISIONS: u32 = u32::MAX - u32::MAX % SPHERE_DIVISION_STEP;

/// Smallest division count accepted for a cylinder.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_CYLINDER_DIVISIONS;
///
/// let requested = 2;
/// assert_eq!(requested.max(MIN_CYLINDER_DIVISIONS), 3);
/// ```
pub const MIN_CYLINDER_DIVISIONS: u32 = 3;

// =============================================================================
// TEXTURING CONSTANTS
// =============================================================================

/// Inset applied to texture coordinates that touch the top or bottom edge
/// of texture space, so samplers do not bleed across the border.
pub const TEXTURE_EDGE_INSET: f64 = 1.0 / 256.0;

// =============================================================================
// CACHE CONSTANTS
// =============================================================================

/// Default resident-vertex budget per mesh kind.
///
/// When a kind's cached meshes exceed this many vertices after an insert,
/// every entry of that kind is demoted to a soft reference.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_SOFT_LIMIT_VERTICES, DEFAULT_DIVISIONS};
///
/// // Room for many default-resolution spheres
/// let sphere_vertices = (DEFAULT_DIVISIONS * (DEFAULT_DIVISIONS / 2 - 1) + 2) as usize;
/// assert!(DEFAULT_SOFT_LIMIT_VERTICES > sphere_vertices * 100);
/// ```
pub const DEFAULT_SOFT_LIMIT_VERTICES: usize = 4_000_000;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Clamps sphere divisions to the minimum and rounds them up to the next
/// multiple of [`SPHERE_DIVISION_STEP`], saturating at
/// [`MAX_SPHERE_DIVISIONS`].
///
/// # Example
///
/// ```rust
/// use config::constants::normalize_sphere_divisions;
///
/// assert_eq!(normalize_sphere_divisions(0), 4);
/// assert_eq!(normalize_sphere_divisions(5), 8);
/// assert_eq!(normalize_sphere_divisions(64), 64);
/// assert_eq!(normalize_sphere_divisions(u32::MAX), u32::MAX - 3);
/// ```
pub fn normalize_sphere_divisions(divisions: u32) -> u32 {
    divisions
        .max(MIN_SPHERE_DIVISIONS)
        .checked_next_multiple_of(SPHERE_DIVISION_STEP)
        .unwrap_or(MAX_SPHERE_DIVISIONS)
}

/// Clamps cylinder divisions to [`MIN_CYLINDER_DIVISIONS`].
///
/// # Example
///
/// ```rust
/// use config::constants::clamp_cylinder_divisions;
///
/// assert_eq!(clamp_cylinder_divisions(1), 3);
/// assert_eq!(clamp_cylinder_divisions(17), 17);
/// ```
#[inline]
pub fn clamp_cylinder_divisions(divisions: u32) -> u32 {
    divisions.max(MIN_CYLINDER_DIVISIONS)
}

// =============================================================================
// CACHE CONFIGURATION
// =============================================================================

/// Tunables for the shared mesh cache.
///
/// # Examples
/// ```
/// use config::constants::CacheConfig;
/// let config = CacheConfig::default();
/// assert!(config.soft_limit_vertices.is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Resident-vertex budget per mesh kind. `None` disables automatic
    /// demotion; memory pressure must then be signalled explicitly.
    pub soft_limit_vertices: Option<usize>,
}

impl CacheConfig {
    /// Builds a configuration, rejecting a zero vertex budget.
    ///
    /// # Examples
    /// ```
    /// use config::constants::CacheConfig;
    /// let cfg = CacheConfig::new(Some(10_000)).expect("valid config");
    /// assert_eq!(cfg.soft_limit_vertices, Some(10_000));
    /// ```
    pub fn new(soft_limit_vertices: Option<usize>) -> Result<Self, ConfigError> {
        if soft_limit_vertices == Some(0) {
            return Err(ConfigError::InvalidSoftLimit(0));
        }
        Ok(Self {
            soft_limit_vertices,
        })
    }

    /// Configuration that never demotes entries on its own.
    pub fn unbounded() -> Self {
        Self {
            soft_limit_vertices: None,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            soft_limit_vertices: Some(DEFAULT_SOFT_LIMIT_VERTICES),
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Raised when the soft vertex budget is zero.
    InvalidSoftLimit(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSoftLimit(value) => {
                write!(f, "soft_limit_vertices must be positive: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests;
