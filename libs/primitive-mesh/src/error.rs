//! # Mesh Errors
//!
//! Error types for assembling and validating meshes.
//!
//! Tessellation and the shared cache never fail; these errors only surface
//! when a mesh is built from caller-supplied buffers or checked explicitly.

use thiserror::Error;

/// Errors that can occur while assembling or validating a mesh.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    /// A face references a vertex past the end of the position list
    #[error("Face {face} references vertex {index} (vertex count: {count})")]
    VertexIndexOutOfRange { face: usize, index: u32, count: usize },

    /// A face references a texture coordinate past the end of the list
    #[error("Face {face} references tex coord {index} (tex coord count: {count})")]
    TexCoordIndexOutOfRange { face: usize, index: u32, count: usize },

    /// A flat buffer length is not a multiple of its element stride
    #[error("Malformed {buffer} buffer: length {len} is not a multiple of {stride}")]
    MalformedBuffer {
        buffer: &'static str,
        len: usize,
        stride: usize,
    },

    /// Smoothing groups present but not one per face
    #[error("Smoothing group count {groups} does not match face count {faces}")]
    SmoothingGroupMismatch { groups: usize, faces: usize },
}

impl MeshError {
    /// Creates a malformed buffer error.
    pub fn malformed(buffer: &'static str, len: usize, stride: usize) -> Self {
        Self::MalformedBuffer {
            buffer,
            len,
            stride,
        }
    }
}
