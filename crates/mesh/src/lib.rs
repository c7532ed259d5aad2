//! Vertex/face adjacency mesh for brush-based mesh editing
//!
//! Provides the topology information a sculpting brush needs (vertex
//! neighbors and incident faces) without an edge data structure, plus
//! world-space caches of positions and normals that are refreshed only when
//! the host asks for it.
//!
//! - [`AdjacencyMesh`] - immutable topology, mutable vertex attributes
//! - [`Transform`] - host transform used to fill the world caches
//! - [`VertexView`] - borrowed view of one vertex for iteration

mod construction;
mod normals;
mod topology;
mod transform;
mod types;
mod world;

use glam::Vec3;
use sculptor_config::NormalTransformPolicy;

pub use topology::{VertexView, Vertices};
pub use transform::Transform;
pub use types::{Face, FaceId, MeshError, VertexId};

use types::VertexAdjacency;

/// Triangle mesh with frozen vertex-to-vertex and vertex-to-face adjacency.
///
/// Vertex and face counts are fixed at build time. Only positions, normals
/// and the world caches change afterwards.
#[derive(Debug, Clone)]
pub struct AdjacencyMesh {
    pub(crate) positions: Vec<Vec3>,
    pub(crate) normals: Vec<Vec3>,
    pub(crate) faces: Vec<Face>,
    pub(crate) adjacency: Vec<VertexAdjacency>,
    pub(crate) world_positions: Vec<Vec3>,
    pub(crate) world_normals: Vec<Vec3>,
    /// Last transform written into the world caches
    pub(crate) transform: Transform,
    pub(crate) normal_policy: NormalTransformPolicy,
}
