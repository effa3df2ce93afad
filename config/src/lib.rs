//! # Config Crate
//!
//! Centralized constants for predefined solid tessellation and the shared
//! mesh cache. Default dimensions, division clamps, texture insets and the
//! cache's soft memory budget are all defined here so the mesh crate never
//! carries bare literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{normalize_sphere_divisions, DEFAULT_DIVISIONS};
//!
//! // Sphere divisions always land on a multiple of four
//! assert_eq!(normalize_sphere_divisions(1), 4);
//! assert_eq!(normalize_sphere_divisions(DEFAULT_DIVISIONS), 64);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Plain Rust, usable from any crate in the workspace
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
