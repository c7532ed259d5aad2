//! Type definitions for the adjacency mesh.

use serde::{Deserialize, Serialize};

/// Type-safe vertex identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub u32);

impl VertexId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Type-safe face identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FaceId(pub u32);

impl FaceId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A triangle of the mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub id: FaceId,
    pub vertices: [VertexId; 3],
}

impl Face {
    /// Whether `vertex` is one of the three corners
    pub fn contains(&self, vertex: VertexId) -> bool {
        self.vertices.contains(&vertex)
    }
}

/// Frozen adjacency of a single vertex.
///
/// Both lists are sorted ascending and free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct VertexAdjacency {
    pub neighbors: Box<[VertexId]>,
    pub faces: Box<[FaceId]>,
}

/// Errors that can occur while importing or updating mesh data
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    #[error("Index count {len} is not divisible by 3")]
    IndexCountNotTriangles { len: usize },
    #[error("Face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfBounds {
        face: usize,
        index: u32,
        vertex_count: usize,
    },
    #[error("Attribute `{attribute}` has {actual} entries, expected {expected}")]
    AttributeLengthMismatch {
        attribute: &'static str,
        expected: usize,
        actual: usize,
    },
}
