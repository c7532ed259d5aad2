//! Topology queries and vertex traversal for AdjacencyMesh.

use glam::Vec3;

use super::types::{Face, FaceId, MeshError, VertexId};
use super::AdjacencyMesh;

/// Borrowed view of one vertex and its adjacency.
#[derive(Debug, Clone, Copy)]
pub struct VertexView<'a> {
    pub id: VertexId,
    pub position: Vec3,
    pub normal: Vec3,
    pub world_position: Vec3,
    pub world_normal: Vec3,
    pub neighbors: &'a [VertexId],
    pub faces: &'a [FaceId],
}

/// Iterator over every vertex in index order.
///
/// Each call to [`AdjacencyMesh::vertices`] starts a fresh traversal.
#[derive(Debug, Clone)]
pub struct Vertices<'a> {
    mesh: &'a AdjacencyMesh,
    range: std::ops::Range<u32>,
}

impl<'a> Iterator for Vertices<'a> {
    type Item = VertexView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.range.next()?;
        self.mesh.vertex(VertexId(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl ExactSizeIterator for Vertices<'_> {}

impl AdjacencyMesh {
    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Local-space positions
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Local-space normals
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// World-space positions as of the last cache update
    pub fn world_positions(&self) -> &[Vec3] {
        &self.world_positions
    }

    /// World-space normals as of the last cache update
    pub fn world_normals(&self) -> &[Vec3] {
        &self.world_normals
    }

    /// Get face by ID
    pub fn face(&self, id: FaceId) -> Option<&Face> {
        self.faces.get(id.index())
    }

    /// Get all faces
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Get a view of one vertex
    pub fn vertex(&self, id: VertexId) -> Option<VertexView<'_>> {
        let i = id.index();
        let adjacency = self.adjacency.get(i)?;
        Some(VertexView {
            id,
            position: self.positions[i],
            normal: self.normals[i],
            world_position: self.world_positions[i],
            world_normal: self.world_normals[i],
            neighbors: &adjacency.neighbors,
            faces: &adjacency.faces,
        })
    }

    /// Traverse all vertices in increasing index order
    pub fn vertices(&self) -> Vertices<'_> {
        Vertices {
            mesh: self,
            range: 0..self.vertex_count() as u32,
        }
    }

    // ========================================================================
    // Topology Queries
    // ========================================================================

    /// Vertices sharing at least one face with `id`, sorted ascending.
    ///
    /// Empty for unknown ids.
    pub fn neighbors_of(&self, id: VertexId) -> &[VertexId] {
        self.adjacency
            .get(id.index())
            .map(|a| &*a.neighbors)
            .unwrap_or(&[])
    }

    /// Faces containing `id`, sorted ascending.
    ///
    /// Empty for unknown ids.
    pub fn faces_of(&self, id: VertexId) -> &[FaceId] {
        self.adjacency
            .get(id.index())
            .map(|a| &*a.faces)
            .unwrap_or(&[])
    }

    /// Unit normal of a face from its current local positions.
    ///
    /// Zero for degenerate triangles and unknown ids.
    pub fn face_normal(&self, id: FaceId) -> Vec3 {
        let Some(face) = self.face(id) else {
            return Vec3::ZERO;
        };
        let [a, b, c] = face.vertices.map(|v| self.positions[v.index()]);
        (b - a).cross(c - b).normalize_or_zero()
    }

    /// Mean of the neighbor positions of `id`, read from `positions`.
    ///
    /// `positions` may be any array parallel to the mesh vertices. Returns
    /// `None` for vertices without neighbors.
    pub fn neighbor_average(&self, id: VertexId, positions: &[Vec3]) -> Option<Vec3> {
        let neighbors = self.neighbors_of(id);
        if neighbors.is_empty() {
            return None;
        }
        let sum: Vec3 = neighbors.iter().map(|n| positions[n.index()]).sum();
        Some(sum / neighbors.len() as f32)
    }

    // ========================================================================
    // Attribute Updates
    // ========================================================================

    /// Replace all local positions at once.
    ///
    /// World positions are left untouched until the next cache refresh.
    pub fn set_positions(&mut self, positions: Vec<Vec3>) -> Result<Vec<Vec3>, MeshError> {
        self.check_len("positions", positions.len())?;
        Ok(std::mem::replace(&mut self.positions, positions))
    }

    /// Replace all local normals at once.
    pub fn set_normals(&mut self, normals: Vec<Vec3>) -> Result<Vec<Vec3>, MeshError> {
        self.check_len("normals", normals.len())?;
        Ok(std::mem::replace(&mut self.normals, normals))
    }

    pub(crate) fn check_len(&self, attribute: &'static str, actual: usize) -> Result<(), MeshError> {
        let expected = self.vertex_count();
        if actual != expected {
            return Err(MeshError::AttributeLengthMismatch {
                attribute,
                expected,
                actual,
            });
        }
        Ok(())
    }
}
